//! Diagnostics and user-facing status lines
//!
//! Diagnostics go through `tracing`; status lines use short colored
//! prefixes. Both write to stderr so stdout only carries command results.

use colored::*;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "BUILDMETA_LOG";

pub fn filter_directive(verbose: bool) -> String {
  match std::env::var(LOG_ENV) {
    Ok(directive) if !directive.trim().is_empty() => directive,
    _ if verbose => "buildmeta=debug".to_string(),
    _ => "buildmeta=warn".to_string(),
  }
}

pub fn init(verbose: bool) {
  let filter = EnvFilter::new(filter_directive(verbose));
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn format_prefix(color: Color, prefix: &str) -> String {
  format!("[{}]", prefix.color(color).bold())
}

fn emit(prefix: String, message: &str) {
  for line in message.lines() {
    eprintln!("{prefix} {line}");
  }
}

pub fn error(message: &str) {
  emit(format_prefix(Color::Red, "error"), message);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_prefix_contains_label() {
    colored::control::set_override(false);
    assert_eq!(format_prefix(Color::Red, "error"), "[error]");
  }
}
