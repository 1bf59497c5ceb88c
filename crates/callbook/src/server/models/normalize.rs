//! Normalization of inbound webhook documents into call records
//!
//! The platform's event shape is not contractually fixed, so every field is
//! extracted through an optional lookup with a declared fallback. Only a
//! document that is not a JSON object at the top level is rejected.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::server::error::{CallError, Result};
use crate::server::models::call::{
  CallRecord, TranscriptTurn, DEFAULT_STATUS, NOT_CAPTURED, UNKNOWN,
};

const FIRST_NAME_KEYS: [&str; 2] = ["Vorname", "vorname"];
const LAST_NAME_KEYS: [&str; 2] = ["Nachname", "nachname"];

/// Parse a raw request body into a JSON object document
pub fn parse_payload(body: &[u8]) -> Result<Value> {
  let document: Value = serde_json::from_slice(body)
    .map_err(|e| CallError::invalid_payload(format!("body is not valid JSON: {e}")))?;

  if !document.is_object() {
    return Err(CallError::invalid_payload(format!(
      "expected a JSON object, got {}",
      kind_of(&document)
    )));
  }

  Ok(document)
}

/// Map an inbound event document into a `CallRecord`.
///
/// `received_at` stands in for the call time when the event carries no
/// `event_timestamp`. The document itself is kept verbatim as `raw_payload`.
pub fn normalize(raw: Value, received_at: DateTime<Utc>) -> Result<CallRecord> {
  if !raw.is_object() {
    return Err(CallError::invalid_payload(format!(
      "expected a JSON object, got {}",
      kind_of(&raw)
    )));
  }

  let collected = raw.pointer("/data/analysis/data_collection_results");

  let record = CallRecord {
    id: text(raw.pointer("/data/conversation_id")).unwrap_or_else(fallback_id),
    name: extract_name(collected),
    phone: text(raw.pointer("/data/metadata/phone_call/external_number"))
      .unwrap_or_else(|| UNKNOWN.to_string()),
    occurred_at: event_time(raw.get("event_timestamp")).unwrap_or(received_at),
    duration_secs: duration_secs(raw.pointer("/data/metadata/call_duration_secs")),
    subject_summary: text(collected.and_then(|c| c.pointer("/Anliegen/value")))
      .unwrap_or_else(|| NOT_CAPTURED.to_string()),
    status: text(raw.pointer("/data/status")).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
    transcript: transcript(raw.pointer("/data/transcript")),
    analysis_result: match raw.pointer("/data/analysis") {
      Some(analysis) if !analysis.is_null() => analysis.clone(),
      _ => Value::Object(Map::new()),
    },
    raw_payload: None,
  };

  Ok(CallRecord { raw_payload: Some(raw), ..record })
}

/// Derive a display name from the data-collection results.
///
/// First and last name are each looked up under a capitalized and a
/// lower-cased key, since the platform delivers both spellings.
pub fn extract_name(collected: Option<&Value>) -> String {
  let Some(collected) = collected else {
    return UNKNOWN.to_string();
  };

  let first = collected_value(collected, &FIRST_NAME_KEYS);
  let last = collected_value(collected, &LAST_NAME_KEYS);

  match (first, last) {
    (Some(first), Some(last)) => format!("{first} {last}"),
    (Some(only), None) | (None, Some(only)) => only,
    (None, None) => UNKNOWN.to_string(),
  }
}

/// Unique id for events that carry no conversation id
pub fn fallback_id() -> String {
  format!("call_{}", Uuid::new_v4().simple())
}

fn collected_value(collected: &Value, keys: &[&str]) -> Option<String> {
  keys.iter().find_map(|key| text(collected.get(*key).and_then(|field| field.get("value"))))
}

/// Non-empty string or number rendered as text
fn text(value: Option<&Value>) -> Option<String> {
  match value? {
    Value::String(s) if !s.is_empty() => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

fn event_time(value: Option<&Value>) -> Option<DateTime<Utc>> {
  let seconds = value?.as_f64().filter(|s| s.is_finite() && *s > 0.0)?;
  DateTime::from_timestamp_millis((seconds * 1000.0) as i64)
}

fn duration_secs(value: Option<&Value>) -> u64 {
  match value {
    Some(v) => v
      .as_u64()
      .or_else(|| v.as_f64().filter(|s| s.is_finite() && *s > 0.0).map(|s| s as u64))
      .unwrap_or(0),
    None => 0,
  }
}

fn transcript(value: Option<&Value>) -> Vec<TranscriptTurn> {
  let Some(turns) = value.and_then(Value::as_array) else {
    return Vec::new();
  };

  turns
    .iter()
    .filter(|turn| turn.is_object())
    .map(|turn| TranscriptTurn {
      role: text(turn.get("role")).unwrap_or_default(),
      message: text(turn.get("message")).unwrap_or_default(),
      time_in_call_secs: turn.get("time_in_call_secs").and_then(Value::as_f64).unwrap_or(0.0),
    })
    .collect()
}

fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
