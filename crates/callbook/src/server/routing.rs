//! Axum router configuration for all endpoints

use axum::{
  extract::DefaultBodyLimit,
  http::StatusCode,
  middleware,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::server::handlers::{calls, status, webhook};
use crate::server::middleware::request_context_middleware;
use crate::server::state::AppState;
use crate::server::types::ErrorResponse;

/// Largest accepted request body (webhook payloads carry full transcripts)
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  let expose_errors = state.config.is_development();

  Router::new()
    .route("/health", get(status::health))
    .route("/webhook/call-transcription", post(webhook::receive_call))
    .route("/api/calls", get(calls::list_calls).delete(calls::clear_calls))
    .route("/api/calls/{id}", get(calls::get_call))
    .route("/api/test-call", post(calls::add_test_call))
    .route("/api/stats", get(calls::stats))
    .fallback(status::not_found)
    .layer(middleware::from_fn(request_context_middleware))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
      panic_response(panic, expose_errors)
    }))
    .with_state(state)
}

/// Turn a handler panic into the generic 500 body
fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_errors: bool) -> Response {
  let detail = if let Some(s) = panic.downcast_ref::<String>() {
    s.clone()
  } else if let Some(s) = panic.downcast_ref::<&str>() {
    s.to_string()
  } else {
    "unknown panic".to_string()
  };

  tracing::error!(panic = %detail, "unhandled error in request handler");

  let error = if expose_errors { detail } else { "Something went wrong".to_string() };
  (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new("Internal server error", Some(error))))
    .into_response()
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
  }

  #[tokio::test]
  async fn test_panic_response_hides_details_outside_development() {
    let response = panic_response(Box::new("boom"), false);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Something went wrong");
  }

  #[tokio::test]
  async fn test_panic_response_exposes_details_in_development() {
    let value = body_json(panic_response(Box::new("boom".to_string()), true)).await;

    assert_eq!(value["success"], false);
    assert_eq!(value["message"], "Internal server error");
    assert_eq!(value["error"], "boom");
  }
}
