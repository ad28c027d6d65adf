//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, human-readable durations and timestamps, and Unicode symbols.

use std::time::{Duration, UNIX_EPOCH};

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

use automat_lib::record::{BuildRecord, BuildStatus};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const SKIPPED: &str = "-";
  pub const INFO: &str = "•";
}

pub fn truncate_hash(hash: &str) -> &str {
  // Revisions may be branch names, so cut on a char boundary.
  hash.char_indices().nth(12).map_or(hash, |(i, _)| &hash[..i])
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

/// RFC 3339 rendering of a Unix timestamp in seconds.
pub fn format_timestamp(secs: u64) -> String {
  humantime::format_rfc3339_seconds(UNIX_EPOCH + Duration::from_secs(secs)).to_string()
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

fn status_symbol(status: BuildStatus) -> String {
  match status {
    BuildStatus::Ok => symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    BuildStatus::Failed => symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
    BuildStatus::Skipped => symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string(),
    BuildStatus::NotRun => symbols::INFO.to_string(),
  }
}

/// Human-readable summary of a build record.
pub fn print_record(record: &BuildRecord) {
  if record.is_success() {
    print_success(&format!("Build of '{}' succeeded", record.name));
  } else {
    print_error(&format!(
      "Build of '{}' failed ({} failed, {} skipped)",
      record.name,
      record.count(BuildStatus::Failed),
      record.count(BuildStatus::Skipped)
    ));
  }
  print_stat("Hash", &record.hash);
  print_stat("Started", &format_timestamp(record.started_at));
  print_stat("Duration", &format_duration(record.duration));

  if !record.components.is_empty() {
    println!();
    println!("Components:");
    for (key, checkout) in &record.components {
      println!(
        "  {} {} {} {} ({})",
        status_symbol(checkout.status),
        key,
        truncate_hash(&checkout.revision),
        checkout.status,
        format_duration(checkout.duration)
      );
    }
  }

  if !record.steps.is_empty() {
    println!();
    println!("Steps:");
    for (index, step) in record.steps.iter().enumerate() {
      println!(
        "  {} [{}] {} {} ({})",
        status_symbol(step.status),
        index,
        step.command.join(" "),
        step.status,
        format_duration(step.duration)
      );
    }
  }
}
