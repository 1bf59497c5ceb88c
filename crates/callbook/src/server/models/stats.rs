//! Aggregate statistics over the retained call history

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::server::models::call::CallRecord;

/// Default telephony cost per call minute, in currency units
pub const DEFAULT_COST_PER_MINUTE: f64 = 0.29;

/// Length of the rolling "this week" window
pub const WEEK_WINDOW_HOURS: i64 = 7 * 24;

/// Point-in-time statistics for the dashboard header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
  pub total: usize,
  pub today: usize,
  pub this_week: usize,
  pub this_month: usize,
  #[serde(rename = "totalDuration")]
  pub total_duration_secs: u64,
  #[serde(rename = "averageDuration")]
  pub average_duration_secs: f64,
  pub total_cost: f64,
}

/// Boundaries the counters are measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindows {
  pub start_of_day: DateTime<Utc>,
  pub week_start: DateTime<Utc>,
  pub start_of_month: DateTime<Utc>,
}

impl StatsWindows {
  /// Compute window boundaries for `now` in its own timezone.
  ///
  /// Day and month start at local midnight; the week is a rolling
  /// 168-hour window ending at `now`, not a calendar week.
  pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
    let today = now.date_naive();
    let first_of_month = today.with_day(1).unwrap_or(today);

    Self {
      start_of_day: local_midnight(now, today),
      week_start: now.with_timezone(&Utc) - Duration::hours(WEEK_WINDOW_HOURS),
      start_of_month: local_midnight(now, first_of_month),
    }
  }
}

/// Compute statistics over `calls` as seen at `now`
pub fn compute<'a, Tz, I>(calls: I, now: &DateTime<Tz>, cost_per_minute: f64) -> StatsSnapshot
where
  Tz: TimeZone,
  I: IntoIterator<Item = &'a CallRecord>,
{
  let windows = StatsWindows::at(now);

  let mut snapshot = StatsSnapshot {
    total: 0,
    today: 0,
    this_week: 0,
    this_month: 0,
    total_duration_secs: 0,
    average_duration_secs: 0.0,
    total_cost: 0.0,
  };

  for call in calls {
    snapshot.total += 1;
    snapshot.today += usize::from(call.occurred_at >= windows.start_of_day);
    snapshot.this_week += usize::from(call.occurred_at >= windows.week_start);
    snapshot.this_month += usize::from(call.occurred_at >= windows.start_of_month);
    // Durations come straight from the webhook and may be arbitrarily large
    snapshot.total_duration_secs = snapshot.total_duration_secs.saturating_add(call.duration_secs);
    snapshot.total_cost += call.cost(cost_per_minute);
  }

  if snapshot.total > 0 {
    snapshot.average_duration_secs = snapshot.total_duration_secs as f64 / snapshot.total as f64;
  }

  snapshot
}

fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>, day: NaiveDate) -> DateTime<Utc> {
  let midnight = day.and_time(NaiveTime::MIN);
  let offset = now.offset().fix();

  now
    .timezone()
    .from_local_datetime(&midnight)
    .earliest()
    .map(|local| local.with_timezone(&Utc))
    // A DST jump can skip midnight, use the offset currently in effect
    .unwrap_or_else(|| {
      Utc.from_utc_datetime(&(midnight - Duration::seconds(i64::from(offset.local_minus_utc()))))
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::server::models::call::{TranscriptTurn, DEFAULT_STATUS, NOT_CAPTURED};
  use chrono::FixedOffset;
  use serde_json::json;

  fn call_at(occurred_at: DateTime<Utc>, duration_secs: u64) -> CallRecord {
    CallRecord {
      id: format!("call_{}", occurred_at.timestamp()),
      name: "Max".to_string(),
      phone: "+49".to_string(),
      occurred_at,
      duration_secs,
      subject_summary: NOT_CAPTURED.to_string(),
      status: DEFAULT_STATUS.to_string(),
      transcript: Vec::<TranscriptTurn>::new(),
      analysis_result: json!({}),
      raw_payload: None,
    }
  }

  fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
  }

  #[test]
  fn test_empty_history() {
    let snapshot = compute(&Vec::<CallRecord>::new(), &utc(2024, 5, 15, 12, 0), DEFAULT_COST_PER_MINUTE);

    assert_eq!(snapshot.total, 0);
    assert_eq!(snapshot.total_duration_secs, 0);
    assert_eq!(snapshot.average_duration_secs, 0.0);
    assert_eq!(snapshot.total_cost, 0.0);
  }

  #[test]
  fn test_duration_and_cost_totals() {
    let now = utc(2024, 5, 15, 12, 0);
    let calls = vec![call_at(now, 60), call_at(now, 120), call_at(now, 180)];

    let snapshot = compute(&calls, &now, DEFAULT_COST_PER_MINUTE);

    assert_eq!(snapshot.total_duration_secs, 360);
    assert_eq!(snapshot.average_duration_secs, 120.0);
    assert!((snapshot.total_cost - 6.0 * DEFAULT_COST_PER_MINUTE).abs() < 1e-9);
  }

  #[test]
  fn test_duration_total_saturates() {
    let now = utc(2024, 5, 15, 12, 0);
    let calls = vec![call_at(now, u64::MAX), call_at(now, u64::MAX), call_at(now, 5)];

    let snapshot = compute(&calls, &now, DEFAULT_COST_PER_MINUTE);

    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.total_duration_secs, u64::MAX);
    assert!(snapshot.average_duration_secs.is_finite());
    assert!(snapshot.total_cost.is_finite());
  }

  #[test]
  fn test_window_counts() {
    let now = utc(2024, 5, 15, 12, 0);
    let calls = vec![
      call_at(utc(2024, 5, 15, 0, 0), 10),  // today, at midnight
      call_at(utc(2024, 5, 14, 23, 59), 10), // yesterday
      call_at(utc(2024, 5, 8, 12, 0), 10),   // exactly 168h ago
      call_at(utc(2024, 5, 8, 11, 59), 10),  // just outside the week
      call_at(utc(2024, 5, 1, 0, 0), 10),    // first of month
      call_at(utc(2024, 4, 30, 23, 59), 10), // last month
    ];

    let snapshot = compute(&calls, &now, DEFAULT_COST_PER_MINUTE);

    assert_eq!(snapshot.total, 6);
    assert_eq!(snapshot.today, 1);
    assert_eq!(snapshot.this_week, 3);
    assert_eq!(snapshot.this_month, 5);
  }

  #[test]
  fn test_week_is_rolling_not_calendar() {
    // Monday morning: a calendar week would only include today
    let now = utc(2024, 5, 13, 8, 0);
    let calls = vec![call_at(utc(2024, 5, 11, 8, 0), 10)];

    assert_eq!(compute(&calls, &now, DEFAULT_COST_PER_MINUTE).this_week, 1);
  }

  #[test]
  fn test_day_boundary_follows_timezone_of_now() {
    let berlin = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = berlin.with_ymd_and_hms(2024, 5, 15, 9, 0, 0).unwrap();

    // 22:30 UTC on the 14th is 00:30 local on the 15th
    let calls = vec![call_at(utc(2024, 5, 14, 22, 30), 10), call_at(utc(2024, 5, 14, 21, 30), 10)];

    let windows = StatsWindows::at(&now);
    assert_eq!(windows.start_of_day, utc(2024, 5, 14, 22, 0));
    assert_eq!(compute(&calls, &now, DEFAULT_COST_PER_MINUTE).today, 1);
  }

  #[test]
  fn test_serializes_with_dashboard_field_names() {
    let now = utc(2024, 5, 15, 12, 0);
    let value = serde_json::to_value(compute(&[call_at(now, 60)], &now, 0.5)).unwrap();

    assert_eq!(value["thisWeek"], 1);
    assert_eq!(value["thisMonth"], 1);
    assert_eq!(value["totalDuration"], 60);
    assert_eq!(value["averageDuration"], 60.0);
    assert_eq!(value["totalCost"], 0.5);
  }
}
