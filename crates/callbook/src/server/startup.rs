//! REST server startup and configuration

use anyhow::{anyhow, Result};
use axum::{
  http::{header, request::Parts, HeaderName, HeaderValue, Method},
  serve, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
  cors::{AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

use crate::server::config::ServerConfig;
use crate::server::routing::create_router;
use crate::server::state::AppState;

/// Build the full application: routes plus tracing and CORS layers
pub fn build_app(state: AppState) -> Router {
  let cors = cors_layer(state.config.clone());
  create_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}

/// CORS policy for the dashboard origins
pub fn cors_layer(config: Arc<ServerConfig>) -> CorsLayer {
  CorsLayer::new()
    .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
      origin.to_str().map(|origin| config.origin_allowed(origin)).unwrap_or(false)
    }))
    .allow_credentials(true)
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
    .allow_headers([
      header::CONTENT_TYPE,
      header::AUTHORIZATION,
      HeaderName::from_static("x-requested-with"),
    ])
}

/// Start the REST server and run until SIGINT or SIGTERM
#[cfg(not(tarpaulin_include))] // Skip coverage - server lifecycle
pub async fn start_server(config: ServerConfig) -> Result<()> {
  let addr = config.bind_addr();
  let state = AppState::new(config);
  log_banner(&state.config);

  let app = build_app(state);

  let listener = TcpListener::bind(addr).await?;
  tracing::info!(%addr, "server listening");

  match serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
    Ok(()) => {
      tracing::info!("server shut down gracefully");
      Ok(())
    }
    Err(e) => {
      tracing::error!(error = %e, "server error");
      Err(anyhow!("Server error: {}", e))
    }
  }
}

#[cfg(not(tarpaulin_include))]
fn log_banner(config: &ServerConfig) {
  let base = format!("http://localhost:{}", config.port);
  tracing::info!(
    version = env!("CARGO_PKG_VERSION"),
    port = config.port,
    environment = %config.environment,
    capacity = config.capacity,
    cost_per_minute = config.cost_per_minute,
    "starting callbook server"
  );
  tracing::info!("webhook url: {base}/webhook/call-transcription");
  tracing::info!("api url: {base}/api/calls");
  tracing::info!("health check: {base}/health");
  tracing::info!("test call: {base}/api/test-call");
  tracing::info!("statistics: {base}/api/stats");
  tracing::info!(origins = ?config.allowed_origins(), "allowed dashboard origins");
}

#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for SIGINT");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut signal) => {
        signal.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => tracing::info!("SIGINT received, shutting down gracefully"),
    _ = terminate => tracing::info!("SIGTERM received, shutting down gracefully"),
  }
}
