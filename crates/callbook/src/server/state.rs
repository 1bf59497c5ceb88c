//! Shared application state handed to every handler

use std::sync::Arc;

use crate::server::config::ServerConfig;
use crate::server::models::store::CallStore;

#[derive(Debug, Clone)]
pub struct AppState {
  pub store: Arc<CallStore>,
  pub config: Arc<ServerConfig>,
}

impl AppState {
  /// Build state with an empty store sized from `config`
  pub fn new(config: ServerConfig) -> Self {
    Self { store: Arc::new(CallStore::new(config.capacity)), config: Arc::new(config) }
  }
}

impl Default for AppState {
  fn default() -> Self {
    Self::new(ServerConfig::default())
  }
}
