pub mod calls;
pub mod status;
pub mod webhook;

use axum::{http::StatusCode, response::Json};

use crate::server::error::CallError;
use crate::server::types::ErrorResponse;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a store error onto the response the dashboard expects
pub(crate) fn call_error_response(err: &CallError) -> ApiError {
  match err {
    CallError::InvalidPayload { .. } => (
      StatusCode::BAD_REQUEST,
      Json(ErrorResponse::new("Error processing call data", Some(err.to_string()))),
    ),
    CallError::NotFound { .. } => {
      (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Call not found", None)))
    }
  }
}
