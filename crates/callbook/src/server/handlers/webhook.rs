//! Webhook ingress for the voice-agent platform

use axum::{
  body::Bytes,
  extract::{Extension, State},
  response::Json,
};
use chrono::Utc;

use crate::server::handlers::{call_error_response, ApiError};
use crate::server::middleware::RequestContext;
use crate::server::models::normalize::parse_payload;
use crate::server::state::AppState;
use crate::server::types::WebhookAck;

/// POST /webhook/call-transcription - Normalize and store a call event
pub async fn receive_call(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
  let payload = parse_payload(&body).map_err(|e| {
    tracing::warn!(request_id = %context.request_id, error = %e, "rejected webhook payload");
    call_error_response(&e)
  })?;

  tracing::debug!(request_id = %context.request_id, %payload, "received webhook payload");

  let call = state.store.ingest(payload).await.map_err(|e| call_error_response(&e))?;

  tracing::info!(
    request_id = %context.request_id,
    call_id = %call.id,
    name = %call.name,
    phone = %call.phone,
    duration_secs = call.duration_secs,
    "new call processed"
  );

  Ok(Json(WebhookAck {
    success: true,
    message: "Call data received and processed successfully".to_string(),
    call_id: call.id,
    timestamp: Utc::now(),
  }))
}
