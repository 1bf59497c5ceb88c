//! Health and fallback handlers

use axum::{
  extract::{Request, State},
  http::StatusCode,
  response::Json,
};
use chrono::Utc;

use crate::server::state::AppState;
use crate::server::types::{EndpointNotFound, HealthResponse};

/// Routes advertised by the 404 handler
pub const AVAILABLE_ENDPOINTS: [&str; 7] = [
  "GET /health - Health check",
  "GET /api/calls - Get all calls (with pagination)",
  "GET /api/calls/{id} - Get specific call",
  "POST /webhook/call-transcription - Webhook endpoint",
  "DELETE /api/calls - Clear all calls",
  "POST /api/test-call - Add test call",
  "GET /api/stats - Get statistics",
];

/// GET /health - Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "healthy".to_string(),
    timestamp: Utc::now(),
    calls: state.store.len().await,
    version: env!("CARGO_PKG_VERSION").to_string(),
  })
}

/// Fallback for unknown routes
pub async fn not_found(request: Request) -> (StatusCode, Json<EndpointNotFound>) {
  (
    StatusCode::NOT_FOUND,
    Json(EndpointNotFound {
      success: false,
      message: "Endpoint not found".to_string(),
      requested_path: request.uri().path().to_string(),
      method: request.method().to_string(),
      available_endpoints: AVAILABLE_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
      timestamp: Utc::now(),
    }),
  )
}
