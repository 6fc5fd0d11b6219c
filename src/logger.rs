//! Logging capability handed to the asset resolver by its host.

use std::cell::RefCell;

use serde::Serialize;

/// `log` target used when forwarding resolver diagnostics.
pub const LOG_TARGET: &str = "asset_files";

/// Output sink for resolver diagnostics. Hosts decide where the lines end up.
pub trait AssetLogger {
  /// Informational message, e.g. that the asset path does not exist.
  fn info(&self, message: &str);
  /// Verbose detail such as the raw filesystem failure.
  fn debug(&self, message: &str);
  /// A failure that was swallowed after logging.
  fn error(&self, message: &str);
}

impl<T: AssetLogger + ?Sized> AssetLogger for &T {
  fn info(&self, message: &str) {
    (**self).info(message);
  }

  fn debug(&self, message: &str) {
    (**self).debug(message);
  }

  fn error(&self, message: &str) {
    (**self).error(message);
  }
}

/// Fan a message out to two loggers, left first.
impl<A: AssetLogger, B: AssetLogger> AssetLogger for (A, B) {
  fn info(&self, message: &str) {
    self.0.info(message);
    self.1.info(message);
  }

  fn debug(&self, message: &str) {
    self.0.debug(message);
    self.1.debug(message);
  }

  fn error(&self, message: &str) {
    self.0.error(message);
    self.1.error(message);
  }
}

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// Informational.
  Info,
  /// Debug detail.
  Debug,
  /// Swallowed failure.
  Error,
}

/// A single captured log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
  /// Severity the message was emitted at.
  pub level: LogLevel,
  /// Message text.
  pub message: String,
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl AssetLogger for LogFacade {
  fn info(&self, message: &str) {
    log::info!(target: LOG_TARGET, "{message}");
  }

  fn debug(&self, message: &str) {
    log::debug!(target: LOG_TARGET, "{message}");
  }

  fn error(&self, message: &str) {
    log::error!(target: LOG_TARGET, "{message}");
  }
}

/// Keeps every message in memory so callers can inspect what the resolver reported.
#[derive(Debug, Default)]
pub struct RecordingLogger {
  records: RefCell<Vec<LogRecord>>,
}

impl RecordingLogger {
  /// Create an empty recorder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of the captured records in emission order.
  pub fn records(&self) -> Vec<LogRecord> {
    self.records.borrow().clone()
  }

  /// Messages captured at `level`.
  pub fn messages(&self, level: LogLevel) -> Vec<String> {
    self
      .records
      .borrow()
      .iter()
      .filter(|record| record.level == level)
      .map(|record| record.message.clone())
      .collect()
  }

  /// Returns `true` when a message at `level` contains `needle`.
  pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
    self
      .records
      .borrow()
      .iter()
      .any(|record| record.level == level && record.message.contains(needle))
  }

  /// Consume the recorder, returning the captured records.
  pub fn into_records(self) -> Vec<LogRecord> {
    self.records.into_inner()
  }

  fn push(&self, level: LogLevel, message: &str) {
    self.records.borrow_mut().push(LogRecord {
      level,
      message: message.to_string(),
    });
  }
}

impl AssetLogger for RecordingLogger {
  fn info(&self, message: &str) {
    self.push(LogLevel::Info, message);
  }

  fn debug(&self, message: &str) {
    self.push(LogLevel::Debug, message);
  }

  fn error(&self, message: &str) {
    self.push(LogLevel::Error, message);
  }
}
