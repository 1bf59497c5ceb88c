//! Bounded, newest-first call history
//!
//! All operations take one lock over the whole history, so a query always
//! observes the list either before or after any insert, never in between.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::Mutex;

use crate::server::error::{CallError, Result};
use crate::server::models::call::CallRecord;
use crate::server::models::normalize::normalize;
use crate::server::models::stats::{self, StatsSnapshot};

/// Number of calls retained before the oldest are dropped
pub const DEFAULT_CAPACITY: usize = 1000;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// A validated page position, both values at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: usize,
  pub limit: usize,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { page: DEFAULT_PAGE, limit: DEFAULT_PAGE_LIMIT }
  }
}

impl PageRequest {
  pub fn new(page: usize, limit: usize) -> Self {
    let defaults = Self::default();
    Self {
      page: if page == 0 { defaults.page } else { page },
      limit: if limit == 0 { defaults.limit } else { limit },
    }
  }

  /// Build from raw query-string values; anything that is not a positive
  /// integer falls back to the default for that position.
  pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
    let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<usize>().ok()).unwrap_or(0);
    Self::new(parse(page), parse(limit))
  }

  fn start(&self) -> usize {
    (self.page - 1).saturating_mul(self.limit)
  }

  fn end(&self) -> usize {
    self.start().saturating_add(self.limit)
  }
}

/// One page of the history, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPage {
  pub calls: Vec<CallRecord>,
  pub total: usize,
  pub page: usize,
  pub limit: usize,
  pub has_more: bool,
}

/// In-memory call history capped at a fixed capacity
#[derive(Debug)]
pub struct CallStore {
  calls: Mutex<VecDeque<CallRecord>>,
  capacity: usize,
}

impl Default for CallStore {
  fn default() -> Self {
    Self::new(DEFAULT_CAPACITY)
  }
}

impl CallStore {
  /// Create an empty store; a capacity of 0 is raised to 1.
  ///
  /// Only up to [`DEFAULT_CAPACITY`] slots are reserved up front, larger
  /// histories grow as calls arrive.
  pub fn new(capacity: usize) -> Self {
    let capacity = capacity.max(1);
    Self { calls: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))), capacity }
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// Normalize an inbound document and append the resulting record
  pub async fn ingest(&self, raw: Value) -> Result<CallRecord> {
    let record = normalize(raw, Utc::now())?;
    self.append(record.clone()).await;
    Ok(record)
  }

  /// Insert at the front, dropping the oldest records beyond capacity
  pub async fn append(&self, record: CallRecord) {
    let mut calls = self.calls.lock().await;
    calls.push_front(record);
    calls.truncate(self.capacity);
  }

  pub async fn list(&self, request: PageRequest) -> CallPage {
    let calls = self.calls.lock().await;
    let total = calls.len();

    CallPage {
      calls: calls.iter().skip(request.start()).take(request.limit).cloned().collect(),
      total,
      page: request.page,
      limit: request.limit,
      has_more: request.end() < total,
    }
  }

  /// Most recent record with the given id
  pub async fn get(&self, id: &str) -> Result<CallRecord> {
    let calls = self.calls.lock().await;
    calls.iter().find(|call| call.id == id).cloned().ok_or_else(|| CallError::not_found(id))
  }

  /// Drop every record, returning how many were held
  pub async fn clear(&self) -> usize {
    let mut calls = self.calls.lock().await;
    let cleared = calls.len();
    calls.clear();
    cleared
  }

  pub async fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>, cost_per_minute: f64) -> StatsSnapshot {
    let calls = self.calls.lock().await;
    stats::compute(calls.iter(), now, cost_per_minute)
  }

  pub async fn len(&self) -> usize {
    self.calls.lock().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.calls.lock().await.is_empty()
  }
}
