use anyhow::{anyhow, Context, Result};
use colored::*;
use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::client::get_client;
use crate::cli::display::{call_summary_line, display_call, display_stats};

pub async fn health() -> Result<()> {
  let client = get_client()?;
  let health = client.health().await?;

  println!(
    "{} {} is {} (v{}, {} calls retained)",
    "✓".green(),
    client.base_url().cyan(),
    health.status.green(),
    health.version,
    health.calls
  );
  Ok(())
}

pub async fn list_calls(page: usize, limit: usize) -> Result<()> {
  let client = get_client()?;
  let page = client.list_calls(page, limit).await?;

  if page.calls.is_empty() {
    println!("No calls found.");
    return Ok(());
  }

  for call in &page.calls {
    println!("{}  {}", call.id.dimmed(), call_summary_line(call));
  }

  println!();
  let shown_from = (page.page - 1) * page.limit + 1;
  let shown_to = shown_from + page.calls.len() - 1;
  println!("Showing {shown_from}-{shown_to} of {} calls", page.total);
  if page.has_more {
    println!("More available: {}", format!("--page {}", page.page + 1).cyan());
  }
  Ok(())
}

pub async fn show_call(id: &str) -> Result<()> {
  let client = get_client()?;
  let call = client.get_call(id).await?;
  display_call(&call);
  Ok(())
}

pub async fn stats() -> Result<()> {
  let client = get_client()?;
  display_stats(&client.stats().await?);
  Ok(())
}

pub async fn clear_calls(force: bool) -> Result<()> {
  if !force && !confirm("Delete all stored calls? [y/N] ")? {
    println!("Aborted.");
    return Ok(());
  }

  let client = get_client()?;
  let response = client.clear_calls().await?;
  println!("{} {}", "✓".green(), response.message);
  Ok(())
}

pub async fn add_test_call() -> Result<()> {
  let client = get_client()?;
  let response = client.add_test_call().await?;
  println!("{} Added test call {}", "✓".green(), response.call.id.yellow());
  Ok(())
}

/// Post a webhook payload read from a JSON file
pub async fn send_webhook(path: &Path) -> Result<()> {
  let contents = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read payload file {}", path.display()))?;
  let payload: Value = serde_json::from_str(&contents)
    .with_context(|| format!("Payload file {} is not valid JSON", path.display()))?;
  if !payload.is_object() {
    return Err(anyhow!("Payload file {} must contain a JSON object", path.display()));
  }

  let client = get_client()?;
  let ack = client.send_webhook(&payload).await?;
  println!("{} Stored call {}", "✓".green(), ack.call_id.yellow());
  Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
  print!("{prompt}");
  io::stdout().flush()?;

  let mut answer = String::new();
  io::stdin().read_line(&mut answer)?;
  Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "j" | "ja"))
}
