//! REST API module for the callbook service
//!
//! Provides the webhook ingress and the dashboard query endpoints on top of
//! the in-memory call store. Uses axum for routing and tower-http for CORS,
//! tracing and panic recovery.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routing;
pub mod startup;
pub mod state;
pub mod types;
