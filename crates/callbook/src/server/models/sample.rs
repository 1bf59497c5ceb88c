//! Synthetic demo call for exercising the dashboard without the platform

use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use crate::server::models::call::{CallRecord, TranscriptTurn};

pub const SAMPLE_MIN_DURATION_SECS: u64 = 30;
pub const SAMPLE_MAX_DURATION_SECS: u64 = 330;

const SAMPLE_NAME: &str = "Max Mustermann";
const SAMPLE_PHONE: &str = "+49 123 456789";
const SAMPLE_CONCERN: &str = "Terminvereinbarung für Beratungsgespräch";

/// Build a fully populated sample call dated `now`
pub fn sample_call(now: DateTime<Utc>) -> CallRecord {
  let duration_secs = rand::rng().random_range(SAMPLE_MIN_DURATION_SECS..=SAMPLE_MAX_DURATION_SECS);

  CallRecord {
    id: format!("test_{}", Uuid::new_v4().simple()),
    name: SAMPLE_NAME.to_string(),
    phone: SAMPLE_PHONE.to_string(),
    occurred_at: now,
    duration_secs,
    subject_summary: SAMPLE_CONCERN.to_string(),
    status: "done".to_string(),
    transcript: vec![
      TranscriptTurn::new(
        "agent",
        "Guten Tag, hier ist der Telefonagent von Roh-Architekten. Wie kann ich Ihnen heute helfen?",
        0.0,
      ),
      TranscriptTurn::new(
        "user",
        "Hallo, ich würde gerne einen Termin für ein Beratungsgespräch vereinbaren. Wir planen einen Hausumbau.",
        8.0,
      ),
      TranscriptTurn::new(
        "agent",
        "Das ist wunderbar! Gerne helfe ich Ihnen bei der Terminvereinbarung. Darf ich zunächst Ihren Namen erfragen?",
        15.0,
      ),
      TranscriptTurn::new("user", "Ja, mein Name ist Max Mustermann.", 22.0),
    ],
    analysis_result: json!({
      "data_collection_results": {
        "Vorname": {"value": "Max"},
        "Nachname": {"value": "Mustermann"},
        "Anliegen": {"value": SAMPLE_CONCERN},
        "Telefonnummer": {"value": SAMPLE_PHONE}
      }
    }),
    raw_payload: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::server::models::normalize::extract_name;

  #[test]
  fn test_sample_call_shape() {
    let now = Utc::now();
    let call = sample_call(now);

    assert!(call.id.starts_with("test_"));
    assert_eq!(call.occurred_at, now);
    assert!((SAMPLE_MIN_DURATION_SECS..=SAMPLE_MAX_DURATION_SECS).contains(&call.duration_secs));
    assert_eq!(call.transcript.len(), 4);
    assert!(call.raw_payload.is_none());
  }

  #[test]
  fn test_sample_analysis_matches_record() {
    let call = sample_call(Utc::now());
    let collected = call.analysis_result.get("data_collection_results");

    assert_eq!(extract_name(collected), call.name);
  }

  #[test]
  fn test_sample_ids_are_unique() {
    let now = Utc::now();
    assert_ne!(sample_call(now).id, sample_call(now).id);
  }
}
