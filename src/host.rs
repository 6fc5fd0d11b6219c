//! Console stand-in for the CI platform's step API.

use std::cell::RefCell;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::logger::AssetLogger;

/// Environment variable naming the file that receives step outputs.
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

const PREFIX_PLAIN: &str = "[DEBUG]";
const PREFIX_COLOR: &str = "\x1b[36m[DEBUG]\x1b[0m";

/// Writes every line with a visible `[DEBUG]` prefix and provides the step output hooks.
pub struct ConsoleHost<W: Write> {
  out: RefCell<W>,
  color: bool,
  output_file: Option<PathBuf>,
}

impl ConsoleHost<io::Stdout> {
  /// Host printing to standard output.
  pub fn stdout(color: bool) -> Self {
    Self::new(io::stdout(), color)
  }
}

impl<W: Write> ConsoleHost<W> {
  /// Host printing to `out`.
  pub fn new(out: W, color: bool) -> Self {
    Self {
      out: RefCell::new(out),
      color,
      output_file: None,
    }
  }

  /// Append step outputs to `path` instead of discarding them.
  pub fn with_output_file(mut self, path: Option<PathBuf>) -> Self {
    self.output_file = path;
    self
  }

  /// Print one prefixed line. Console write failures are ignored.
  pub fn line(&self, text: impl Display) {
    let prefix = if self.color { PREFIX_COLOR } else { PREFIX_PLAIN };
    let mut out = self.out.borrow_mut();
    let _ = writeln!(out, "{prefix} {text}");
  }

  /// Record a step output as `name=value`. Without an output file this is a no-op.
  pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
    let Some(path) = &self.output_file else {
      return Ok(());
    };

    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(path)
      .with_context(|| format!("failed to open output file {}", path.display()))?;
    writeln!(file, "{name}={value}")
      .with_context(|| format!("failed to write output file {}", path.display()))
  }

  /// Mark the step as failed.
  pub fn set_failed(&self, message: impl Display) {
    eprintln!("[FAILED] {message}");
  }

  /// Flush and return the underlying writer.
  pub fn into_inner(self) -> W {
    let mut out = self.out.into_inner();
    let _ = out.flush();
    out
  }
}

impl<W: Write> AssetLogger for ConsoleHost<W> {
  fn info(&self, message: &str) {
    self.line(format_args!("[INFO] {message}"));
  }

  fn debug(&self, message: &str) {
    self.line(format_args!("[DEBUG] {message}"));
  }

  fn error(&self, message: &str) {
    self.line(format_args!("[ERROR] {message}"));
  }
}
