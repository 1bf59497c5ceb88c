//! Error types for call ingestion and lookup

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
  /// The inbound document is not a JSON object at the top level
  #[error("Invalid payload: {reason}")]
  InvalidPayload { reason: String },

  #[error("Call '{id}' not found")]
  NotFound { id: String },
}

impl CallError {
  pub fn invalid_payload(reason: impl Into<String>) -> Self {
    Self::InvalidPayload { reason: reason.into() }
  }

  pub fn not_found(id: impl Into<String>) -> Self {
    Self::NotFound { id: id.into() }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

pub type Result<T> = std::result::Result<T, CallError>;
