use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use callbook::cli::commands;
use callbook::server::models::store::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};

#[derive(Parser)]
#[command(name = "callbook")]
#[command(about = "Callbook - Call Transcription Dashboard\nQuery and manage calls stored on a callbook server")]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Check that the server is reachable
  Health,
  /// List stored calls, newest first
  List {
    /// Page number (starting at 1)
    #[arg(short, long, default_value_t = DEFAULT_PAGE)]
    page: usize,
    /// Calls per page
    #[arg(short, long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: usize,
  },
  /// Show a single call with its transcript
  Show {
    /// Call id
    id: String,
  },
  /// Show call statistics
  Stats,
  /// Delete all stored calls
  Clear {
    /// Skip confirmation prompt
    #[arg(short, long)]
    force: bool,
  },
  /// Add a synthetic sample call
  TestCall,
  /// Send a webhook payload from a JSON file
  Send {
    /// Path to the payload file
    file: PathBuf,
  },
}

async fn handle(command: Command) -> Result<()> {
  match command {
    Command::Health => commands::health().await,
    Command::List { page, limit } => commands::list_calls(page, limit).await,
    Command::Show { id } => commands::show_call(&id).await,
    Command::Stats => commands::stats().await,
    Command::Clear { force } => commands::clear_calls(force).await,
    Command::TestCall => commands::add_test_call().await,
    Command::Send { file } => commands::send_webhook(&file).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  handle(cli.command).await?;
  Ok(())
}
