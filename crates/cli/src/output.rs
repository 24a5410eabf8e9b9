//! Terminal rendering for `vl`.
//!
//! Catalogue listings (solutions, problems, images) and status lines go to
//! stdout, warnings and errors to stderr. Every listing command can switch to
//! JSON with `-o json`, in which case nothing but the JSON document is printed.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream, Style};

/// How a command presents its result.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Line markers.
pub mod marks {
  pub const DONE: &str = "✓";
  pub const FAILED: &str = "✗";
  pub const WARN: &str = "!";
  pub const NOTE: &str = "·";
  pub const ENTRY: &str = "•";
  pub const LINKS_TO: &str = "→";
}

/// Elapsed wall time at millisecond precision, e.g. `1s 500ms`.
pub fn format_elapsed(elapsed: Duration) -> String {
  let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
  humantime::format_duration(Duration::from_millis(millis)).to_string()
}

fn marked(mark: &str, style: Style, stream: Stream) -> String {
  mark.if_supports_color(stream, |m| m.style(style)).to_string()
}

pub fn print_success(message: &str) {
  println!("{} {}", marked(marks::DONE, Style::new().green(), Stream::Stdout), message);
}

pub fn print_info(message: &str) {
  println!("{} {}", marked(marks::NOTE, Style::new().blue(), Stream::Stdout), message);
}

pub fn print_warning(message: &str) {
  eprintln!("{} {}", marked(marks::WARN, Style::new().yellow(), Stream::Stderr), message);
}

/// Errors are red all the way through so they stand out in scrollback.
pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    marked(marks::FAILED, Style::new().red(), Stream::Stderr),
    message.if_supports_color(Stream::Stderr, |m| m.red())
  );
}

/// One catalogue entry: `• name → url`.
pub fn print_entry(name: &str, target: &str) {
  println!(
    "{} {} {} {}",
    marks::ENTRY,
    name.if_supports_color(Stream::Stdout, |n| n.bold()),
    marks::LINKS_TO,
    target
  );
}

/// A provider heading followed by its image ids, one per line.
pub fn print_images<'a>(provider: &str, image_ids: impl IntoIterator<Item = &'a String>) {
  println!("{}:", provider.if_supports_color(Stream::Stdout, |p| p.cyan()));
  for id in image_ids {
    println!("  {} {}", marks::ENTRY, id);
  }
}

/// An indented `label: value` line.
pub fn print_field(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |l| l.dimmed()), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to encode output as JSON")?;
  println!("{}", json);
  Ok(())
}
