//! Callbook REST Server
//!
//! Receives call-transcription webhooks and serves the dashboard API.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use callbook::server::{config::ServerConfig, startup::start_server};

#[derive(Parser)]
#[command(name = "callbook_server")]
#[command(about = "Callbook webhook receiver and dashboard API")]
#[command(version)]
struct Args {
  #[command(flatten)]
  config: ServerConfig,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // RUST_LOG wins over the built-in defaults
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if args.verbose {
      EnvFilter::new("callbook=debug,tower_http=debug,info")
    } else {
      EnvFilter::new("callbook=info,warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  start_server(args.config).await
}
