//! Display formatting utilities for CLI output

use chrono::Local;
use colored::*;

use crate::server::models::call::CallRecord;
use crate::server::models::stats::StatsSnapshot;

/// Render seconds as `m:ss`
pub fn format_duration(secs: u64) -> String {
  format!("{}:{:02}", secs / 60, secs % 60)
}

/// Render a currency amount with two decimals
pub fn format_cost(amount: f64) -> String {
  format!("{amount:.2} €")
}

/// Shorten text to at most `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
  if text.chars().count() <= width {
    return text.to_string();
  }
  let kept: String = text.chars().take(width.saturating_sub(1)).collect();
  format!("{kept}…")
}

/// One-line summary of a call for list output
pub fn call_summary_line(call: &CallRecord) -> String {
  let when = call.occurred_at.with_timezone(&Local).format("%d.%m.%Y %H:%M");
  format!(
    "{} {} {} {} {}",
    when.to_string().dimmed(),
    truncate(&call.name, 24).bold(),
    call.phone.cyan(),
    format_duration(call.duration_secs).yellow(),
    truncate(&call.subject_summary, 40)
  )
}

/// Full view of a single call including its transcript
pub fn display_call(call: &CallRecord) {
  let header = format!("=== {} ===", call.name.blue().bold());
  println!("{header}");
  println!("{:<10} {}", "ID:".dimmed(), call.id);
  println!("{:<10} {}", "Telefon:".dimmed(), call.phone.cyan());
  println!(
    "{:<10} {}",
    "Datum:".dimmed(),
    call.occurred_at.with_timezone(&Local).format("%d.%m.%Y %H:%M:%S")
  );
  println!("{:<10} {}", "Dauer:".dimmed(), format_duration(call.duration_secs).yellow());
  println!("{:<10} {}", "Status:".dimmed(), call.status);
  println!("{:<10} {}", "Anliegen:".dimmed(), call.subject_summary);

  if call.transcript.is_empty() {
    return;
  }

  println!();
  for turn in &call.transcript {
    let role = if turn.role == "agent" { turn.role.green() } else { turn.role.magenta() };
    println!("[{:>6.1}s] {:<6} {}", turn.time_in_call_secs, role.bold(), turn.message);
  }
}

pub fn display_stats(stats: &StatsSnapshot) {
  println!("{:<18} {}", "Anrufe gesamt:".dimmed(), stats.total.to_string().bold());
  println!("{:<18} {}", "Heute:".dimmed(), stats.today);
  println!("{:<18} {}", "Letzte 7 Tage:".dimmed(), stats.this_week);
  println!("{:<18} {}", "Dieser Monat:".dimmed(), stats.this_month);
  println!("{:<18} {}", "Gesamtdauer:".dimmed(), format_duration(stats.total_duration_secs));
  println!(
    "{:<18} {}",
    "Ø Dauer:".dimmed(),
    format_duration(stats.average_duration_secs.round() as u64)
  );
  println!("{:<18} {}", "Kosten:".dimmed(), format_cost(stats.total_cost).yellow());
}
