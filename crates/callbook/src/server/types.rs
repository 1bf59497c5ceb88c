//! REST API types shared by the server handlers and the CLI client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::models::call::CallRecord;

// Status Endpoint
// ===============

/// Response for /health
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  pub timestamp: DateTime<Utc>,
  /// Number of calls currently retained
  pub calls: usize,
  pub version: String,
}

// Call Endpoints
// ==============

/// Query string for GET /api/calls, kept as raw text so bad values fall back to defaults
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListCallsQuery {
  pub page: Option<String>,
  pub limit: Option<String>,
}

/// Response for POST /webhook/call-transcription
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
  pub success: bool,
  pub message: String,
  pub call_id: String,
  pub timestamp: DateTime<Utc>,
}

/// Response for DELETE /api/calls
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
  pub success: bool,
  pub message: String,
  pub cleared: usize,
  pub timestamp: DateTime<Utc>,
}

/// Response for POST /api/test-call
#[derive(Debug, Serialize, Deserialize)]
pub struct TestCallResponse {
  pub success: bool,
  pub message: String,
  pub call: CallRecord,
  pub timestamp: DateTime<Utc>,
}

// Errors
// ======

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub success: bool,
  pub message: String,

  /// Underlying error text, when it may be shown to the client
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub error: Option<String>,

  pub timestamp: DateTime<Utc>,
}

/// Body returned for unknown routes
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointNotFound {
  pub success: bool,
  pub message: String,
  pub requested_path: String,
  pub method: String,
  pub available_endpoints: Vec<String>,
  pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
  pub fn new(message: &str, error: Option<String>) -> Self {
    Self { success: false, message: message.to_string(), error, timestamp: Utc::now() }
  }
}
