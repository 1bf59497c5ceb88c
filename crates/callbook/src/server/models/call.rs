use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder for a name or phone number that could not be derived
pub const UNKNOWN: &str = "Unbekannt";

/// Placeholder for a caller concern that was not captured
pub const NOT_CAPTURED: &str = "Nicht erfasst";

/// Status assigned when the event carries none
pub const DEFAULT_STATUS: &str = "received";

/// One turn of a call transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptTurn {
  pub role: String,
  pub message: String,
  /// Offset of this turn from the start of the call
  pub time_in_call_secs: f64,
}

impl TranscriptTurn {
  pub fn new(role: impl Into<String>, message: impl Into<String>, time_in_call_secs: f64) -> Self {
    Self { role: role.into(), message: message.into(), time_in_call_secs }
  }
}

/// Canonical record of one ingested call.
///
/// Field names on the wire follow what the dashboard reads (`date`,
/// `duration`, `anliegen`, `analysis`, `rawData`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
  pub id: String,
  pub name: String,
  pub phone: String,

  #[serde(rename = "date")]
  pub occurred_at: DateTime<Utc>,

  #[serde(rename = "duration")]
  pub duration_secs: u64,

  /// What the caller wanted ("Anliegen")
  #[serde(rename = "anliegen")]
  pub subject_summary: String,

  pub status: String,
  pub transcript: Vec<TranscriptTurn>,

  /// Analysis block from the platform, passed through untouched
  #[serde(rename = "analysis")]
  pub analysis_result: Value,

  /// Original inbound document, absent for synthetic records
  #[serde(rename = "rawData", default, skip_serializing_if = "Option::is_none")]
  pub raw_payload: Option<Value>,
}

impl CallRecord {
  /// Cost of this call at the given per-minute rate
  pub fn cost(&self, cost_per_minute: f64) -> f64 {
    (self.duration_secs as f64 / 60.0) * cost_per_minute
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn record(duration_secs: u64) -> CallRecord {
    CallRecord {
      id: "conv_1".to_string(),
      name: "Max Mustermann".to_string(),
      phone: "+49 30 1234".to_string(),
      occurred_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
      duration_secs,
      subject_summary: NOT_CAPTURED.to_string(),
      status: DEFAULT_STATUS.to_string(),
      transcript: vec![TranscriptTurn::new("agent", "Hallo", 0.0)],
      analysis_result: json!({}),
      raw_payload: Some(json!({"type": "post_call_transcription"})),
    }
  }

  #[test]
  fn test_serializes_with_dashboard_field_names() {
    let value = serde_json::to_value(record(90)).unwrap();

    assert_eq!(value["date"], "2023-11-14T22:13:20Z");
    assert_eq!(value["duration"], 90);
    assert_eq!(value["anliegen"], "Nicht erfasst");
    assert_eq!(value["rawData"]["type"], "post_call_transcription");
    assert_eq!(value["transcript"][0]["time_in_call_secs"], 0.0);
    assert!(value.get("occurred_at").is_none());
  }

  #[test]
  fn test_synthetic_record_omits_raw_data() {
    let mut call = record(30);
    call.raw_payload = None;

    let value = serde_json::to_value(call).unwrap();
    assert!(value.get("rawData").is_none());
  }

  #[test]
  fn test_cost_is_prorated_per_minute() {
    assert!((record(90).cost(0.29) - 0.435).abs() < 1e-9);
    assert_eq!(record(0).cost(0.29), 0.0);
  }
}
