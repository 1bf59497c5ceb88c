//! HTTP client for the callbook REST API
//!
//! A thin wrapper so the CLI works against a local or a deployed server.

use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

use crate::server::models::call::CallRecord;
use crate::server::models::stats::StatsSnapshot;
use crate::server::models::store::CallPage;
use crate::server::types::{ClearResponse, HealthResponse, TestCallResponse, WebhookAck};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the callbook HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// Base URL of the server (e.g., "http://localhost:3001")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

impl ClientConfig {
  /// Read `CALLBOOK_SERVER_URL` and `CALLBOOK_TIMEOUT_SECS`, falling back to defaults
  pub fn from_env() -> Self {
    let base_url = std::env::var("CALLBOOK_SERVER_URL")
      .map(|url| url.trim_end_matches('/').to_string())
      .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

    let timeout_secs = std::env::var("CALLBOOK_TIMEOUT_SECS")
      .ok()
      .and_then(|v| v.parse().ok())
      .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Self { base_url, timeout_secs }
  }
}

/// HTTP client for the callbook REST API
pub struct CallbookClient {
  client: Client,
  config: ClientConfig,
}

impl CallbookClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  pub async fn health(&self) -> Result<HealthResponse> {
    let request = self.client.get(self.url("/health"));
    self.send(request, "check server health").await
  }

  pub async fn list_calls(&self, page: usize, limit: usize) -> Result<CallPage> {
    let request = self
      .client
      .get(self.url("/api/calls"))
      .query(&[("page", page.to_string()), ("limit", limit.to_string())]);
    self.send(request, "list calls").await
  }

  pub async fn get_call(&self, id: &str) -> Result<CallRecord> {
    let request = self.client.get(self.url(&format!("/api/calls/{id}")));
    self.send(request, "get call").await
  }

  pub async fn stats(&self) -> Result<StatsSnapshot> {
    let request = self.client.get(self.url("/api/stats"));
    self.send(request, "get statistics").await
  }

  pub async fn clear_calls(&self) -> Result<ClearResponse> {
    let request = self.client.delete(self.url("/api/calls"));
    self.send(request, "clear calls").await
  }

  pub async fn add_test_call(&self) -> Result<TestCallResponse> {
    let request = self.client.post(self.url("/api/test-call"));
    self.send(request, "add test call").await
  }

  /// Post a raw webhook payload as the platform would
  pub async fn send_webhook(&self, payload: &Value) -> Result<WebhookAck> {
    let request = self.client.post(self.url("/webhook/call-transcription")).json(payload);
    self.send(request, "send webhook").await
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url, path)
  }

  async fn send<T: DeserializeOwned>(
    &self,
    request: reqwest::RequestBuilder,
    action: &str,
  ) -> Result<T> {
    let response = timeout(Duration::from_secs(self.config.timeout_secs), request.send())
      .await
      .map_err(|_| anyhow!("Failed to {}: request timed out", action))?
      .map_err(|e| anyhow!("Failed to {}: {}", action, e))?;

    parse_response(response, action).await
  }
}

async fn parse_response<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
  let status = response.status();
  if !status.is_success() {
    let error_text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&error_text)
      .ok()
      .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
      .unwrap_or(error_text);
    return Err(anyhow!("Failed to {}: {} ({})", action, message, status));
  }

  Ok(response.json().await?)
}

/// Get the configured client (checks environment variables)
pub fn get_client() -> Result<CallbookClient> {
  CallbookClient::with_config(ClientConfig::from_env())
}
