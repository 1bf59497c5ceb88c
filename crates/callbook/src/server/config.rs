//! Server configuration
//!
//! Values come from command-line flags with environment fallbacks (see the
//! `callbook_server` binary). Only the bind address and CORS origins shape the
//! HTTP layer; the store receives its capacity and the stats their cost rate.

use clap::{builder::RangedU64ValueParser, Args};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::server::models::stats::DEFAULT_COST_PER_MINUTE;
use crate::server::models::store::DEFAULT_CAPACITY;

pub const DEFAULT_PORT: u16 = 3001;

/// Dashboard origins allowed regardless of configuration
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Hosting domains whose subdomains may call the API
pub const ALLOWED_HOST_SUFFIXES: [&str; 4] = [".netlify.app", ".railway.app", ".render.com", ".fly.io"];

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
  /// Interface to bind
  #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
  pub host: IpAddr,

  /// Port to listen on
  #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
  pub port: u16,

  /// Additional dashboard origin allowed by CORS
  #[arg(long, env = "FRONTEND_URL")]
  pub frontend_url: Option<String>,

  /// Telephony cost per call minute used for statistics
  #[arg(long, env = "CALLBOOK_COST_PER_MINUTE", default_value_t = DEFAULT_COST_PER_MINUTE)]
  pub cost_per_minute: f64,

  /// Number of calls kept in memory
  #[arg(long, env = "CALLBOOK_CAPACITY", default_value_t = DEFAULT_CAPACITY,
    value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
  pub capacity: usize,

  /// Deployment environment; "development" exposes internal error details
  #[arg(long, env = "CALLBOOK_ENV", default_value = "development")]
  pub environment: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
      port: DEFAULT_PORT,
      frontend_url: None,
      cost_per_minute: DEFAULT_COST_PER_MINUTE,
      capacity: DEFAULT_CAPACITY,
      environment: "development".to_string(),
    }
  }
}

impl ServerConfig {
  pub fn bind_addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }

  pub fn is_development(&self) -> bool {
    self.environment.eq_ignore_ascii_case("development")
  }

  /// Exact origins accepted by CORS
  pub fn allowed_origins(&self) -> Vec<String> {
    let mut origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect();
    if let Some(frontend) = self.frontend_url.as_deref().map(|url| url.trim_end_matches('/')) {
      if !frontend.is_empty() && !origins.iter().any(|o| o == frontend) {
        origins.push(frontend.to_string());
      }
    }
    origins
  }

  /// Whether a browser origin may call the API
  pub fn origin_allowed(&self, origin: &str) -> bool {
    if self.allowed_origins().iter().any(|o| o == origin) {
      return true;
    }

    let host = origin.strip_prefix("https://").or_else(|| origin.strip_prefix("http://"));
    match host {
      Some(host) => {
        let host = host.split(':').next().unwrap_or(host);
        ALLOWED_HOST_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
      }
      None => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  #[derive(Parser)]
  struct TestCli {
    #[command(flatten)]
    config: ServerConfig,
  }

  #[test]
  fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3001");
    assert_eq!(config.capacity, 1000);
    assert_eq!(config.cost_per_minute, 0.29);
    assert!(config.is_development());
  }

  #[test]
  fn test_parse_flags() {
    let cli = TestCli::parse_from([
      "test",
      "--host",
      "127.0.0.1",
      "--port",
      "8080",
      "--cost-per-minute",
      "0.5",
      "--capacity",
      "10",
      "--environment",
      "production",
    ]);

    assert_eq!(cli.config.bind_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(cli.config.cost_per_minute, 0.5);
    assert_eq!(cli.config.capacity, 10);
    assert!(!cli.config.is_development());
  }

  #[test]
  fn test_zero_capacity_is_rejected() {
    assert!(TestCli::try_parse_from(["test", "--capacity", "0"]).is_err());
  }

  #[test]
  fn test_allowed_origins() {
    let config = ServerConfig {
      frontend_url: Some("https://calls.example.com/".to_string()),
      ..ServerConfig::default()
    };

    assert!(config.origin_allowed("http://localhost:5173"));
    assert!(config.origin_allowed("https://calls.example.com"));
    assert!(config.origin_allowed("https://aesthetic-tiramisu-fca7d8.netlify.app"));
    assert!(config.origin_allowed("https://callbook.fly.io"));
    assert!(!config.origin_allowed("https://evil.example.com"));
    assert!(!config.origin_allowed("https://netlify.app.evil.com"));
    assert!(!config.origin_allowed("null"));
  }
}
