//! Request context and middleware for the callbook REST API
//!
//! Every request gets a unique id that is attached to its log lines and
//! returned to the client in the `x-request-id` header.

use axum::{
  extract::Request,
  http::{HeaderName, HeaderValue, Method, Uri},
  middleware::Next,
  response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request metadata injected into handlers as an extension
#[derive(Debug, Clone)]
pub struct RequestContext {
  /// Unique ID for this request
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub user_agent: Option<String>,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, user_agent: Option<String>) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, user_agent }
  }

  pub fn path(&self) -> &str {
    self.uri.path()
  }
}

/// Middleware to inject RequestContext into all requests
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
  let user_agent = request
    .headers()
    .get("user-agent")
    .and_then(|v| v.to_str().ok())
    .map(str::to_string);

  let context = RequestContext::new(request.method().clone(), request.uri().clone(), user_agent);

  let start_time = Instant::now();
  tracing::debug!(
    request_id = %context.request_id,
    method = %context.method,
    path = context.path(),
    user_agent = context.user_agent.as_deref().unwrap_or("none"),
    "request started"
  );

  request.extensions_mut().insert(context.clone());
  let mut response = next.run(request).await;

  let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
  tracing::info!(
    request_id = %context.request_id,
    method = %context.method,
    path = context.path(),
    status = response.status().as_u16(),
    duration_ms,
    "request completed"
  );

  if let Ok(value) = HeaderValue::from_str(&context.request_id.to_string()) {
    response.headers_mut().insert(REQUEST_ID_HEADER, value);
  }

  response
}
