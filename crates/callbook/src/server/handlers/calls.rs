//! Dashboard query endpoints

use axum::{
  extract::{Extension, Path, Query, State},
  response::Json,
};
use chrono::{Local, Utc};

use crate::server::handlers::{call_error_response, ApiError};
use crate::server::middleware::RequestContext;
use crate::server::models::call::CallRecord;
use crate::server::models::sample::sample_call;
use crate::server::models::stats::StatsSnapshot;
use crate::server::models::store::{CallPage, PageRequest};
use crate::server::state::AppState;
use crate::server::types::{ClearResponse, ListCallsQuery, TestCallResponse};

/// GET /api/calls - One page of calls, newest first
pub async fn list_calls(
  State(state): State<AppState>,
  Query(query): Query<ListCallsQuery>,
) -> Json<CallPage> {
  let request = PageRequest::from_params(query.page.as_deref(), query.limit.as_deref());
  Json(state.store.list(request).await)
}

/// GET /api/calls/{id} - A single call
pub async fn get_call(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<Json<CallRecord>, ApiError> {
  state.store.get(&id).await.map(Json).map_err(|e| call_error_response(&e))
}

/// DELETE /api/calls - Drop the whole history
pub async fn clear_calls(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Json<ClearResponse> {
  let cleared = state.store.clear().await;
  tracing::info!(request_id = %context.request_id, cleared, "cleared calls");

  Json(ClearResponse {
    success: true,
    message: format!("All {cleared} calls cleared"),
    cleared,
    timestamp: Utc::now(),
  })
}

/// POST /api/test-call - Insert a synthetic sample call
pub async fn add_test_call(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Json<TestCallResponse> {
  let call = sample_call(Utc::now());
  state.store.append(call.clone()).await;
  tracing::info!(request_id = %context.request_id, call_id = %call.id, "test call added");

  Json(TestCallResponse {
    success: true,
    message: "Test call added successfully".to_string(),
    call,
    timestamp: Utc::now(),
  })
}

/// GET /api/stats - Aggregates over the retained history in server-local time
pub async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
  Json(state.store.stats(&Local::now(), state.config.cost_per_minute).await)
}
