//! Debug run orchestrating diagnostics, resolution and result reporting.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::asset_paths::{
  AssetList, ListingFailure, PathKind, describe_entries, list_directory, resolve_asset_files,
};
use crate::config::HarnessConfig;
use crate::diagnostics::{PathReport, recursive_listing};
use crate::host::ConsoleHost;
use crate::logger::{AssetLogger, LogRecord, RecordingLogger};

/// One immediate entry of the asset directory.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
  /// Entry name within the directory.
  pub name: String,
  /// What the entry turned out to be.
  pub kind: PathKind,
}

/// Why the asset path could not be listed as a directory.
#[derive(Debug, Clone, Serialize)]
pub struct ListingErrorReport {
  /// Failure class: `NotFound`, `NotADirectory` or `Other`.
  pub class: String,
  /// Underlying `io::ErrorKind`, debug formatted.
  pub kind: String,
  /// Full error message.
  pub message: String,
}

impl From<&ListingFailure> for ListingErrorReport {
  fn from(failure: &ListingFailure) -> Self {
    Self {
      class: failure.class().to_string(),
      kind: format!("{:?}", failure.kind()),
      message: failure.to_string(),
    }
  }
}

/// Everything a debug run observed, serialisable for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  /// Asset input as it was handed to the resolver.
  pub input: PathBuf,
  /// Filesystem snapshot taken before resolution.
  pub path: PathReport,
  /// Full recursive listing, when enabled and the path could be walked.
  pub recursive_listing: Option<Vec<PathBuf>>,
  /// Why the recursive listing failed.
  pub recursive_listing_error: Option<String>,
  /// Immediate entry names, when the path could be listed as a directory.
  pub listing: Option<Vec<PathBuf>>,
  /// Classified reason the path could not be listed as a directory.
  pub listing_error: Option<ListingErrorReport>,
  /// Immediate directory entries with their kinds. Empty unless the input is a directory.
  pub entries: Vec<EntryReport>,
  /// Files found for upload.
  pub assets: AssetList,
  /// Messages the resolver logged.
  pub logs: Vec<LogRecord>,
}

/// A single pass of the harness over one asset input.
pub struct DebugRun<'a, W: Write, L: AssetLogger> {
  config: &'a HarnessConfig,
  host: &'a ConsoleHost<W>,
  logger: L,
}

impl<'a, W: Write, L: AssetLogger> DebugRun<'a, W, L> {
  /// Create a run printing through `host` and forwarding resolver messages to `logger`.
  pub fn new(config: &'a HarnessConfig, host: &'a ConsoleHost<W>, logger: L) -> Self {
    Self {
      config,
      host,
      logger,
    }
  }

  /// Inspect and resolve `input`, print the results, and publish the asset list as a step
  /// output.
  pub fn execute(&self, input: &Path) -> Result<RunReport> {
    let host = self.host;
    let recorder = RecordingLogger::new();
    let logger = (&recorder, &self.logger);

    host.line("=== Debug Information ===");
    let path = PathReport::inspect(input);
    for line in path.lines() {
      host.line(line);
    }

    logger.info("DecodeAssetFile Start");

    let (recursive, recursive_error) = if self.config.recursive_listing {
      self.print_recursive_listing(input)
    } else {
      (None, None)
    };
    let (listing, listing_error) = self.print_standard_listing(input);

    let assets = resolve_asset_files(input, &logger);

    let entries = if path.is_dir {
      self.print_entries(input)
    } else {
      Vec::new()
    };

    logger.info("DecodeAssetFile Done");

    host.line("=== Results ===");
    host.line("Files found for upload:");
    for (index, asset) in assets.iter().enumerate() {
      host.line(format_args!("{}. {}", index + 1, asset.display()));
    }

    let serialized = serde_json::to_string(&assets).context("failed to serialise asset list")?;
    host.set_output(&self.config.output_name, &serialized)?;
    log::debug!(
      "resolved {} asset(s) from {}, published as `{}`",
      assets.len(),
      input.display(),
      self.config.output_name
    );

    Ok(RunReport {
      input: input.to_path_buf(),
      path,
      recursive_listing: recursive,
      recursive_listing_error: recursive_error,
      listing,
      listing_error,
      entries,
      assets,
      logs: recorder.into_records(),
    })
  }

  fn print_recursive_listing(&self, input: &Path) -> (Option<Vec<PathBuf>>, Option<String>) {
    self.host.line("Recursive directory listing:");
    match recursive_listing(input) {
      Ok(listing) => {
        for entry in &listing {
          self.host.line(format_args!("  {}", entry.display()));
        }
        (Some(listing), None)
      }
      Err(err) => {
        self
          .host
          .line(format_args!("Recursive listing not supported or failed: {err}"));
        (None, Some(err.to_string()))
      }
    }
  }

  fn print_standard_listing(
    &self,
    input: &Path,
  ) -> (Option<Vec<PathBuf>>, Option<ListingErrorReport>) {
    self.host.line("Standard directory listing:");
    match list_directory(input) {
      Ok(entries) => {
        let names: Vec<PathBuf> = entries
          .flatten()
          .map(|entry| PathBuf::from(entry.file_name()))
          .collect();
        let shown: Vec<String> = names
          .iter()
          .map(|name| name.to_string_lossy().into_owned())
          .collect();
        self.host.line(format_args!("{shown:?}"));
        (Some(names), None)
      }
      Err(failure) => {
        self.host.line(format_args!(
          "Error details: {} ({:?}): {failure}",
          failure.class(),
          failure.kind()
        ));
        (None, Some(ListingErrorReport::from(&failure)))
      }
    }
  }

  fn print_entries(&self, input: &Path) -> Vec<EntryReport> {
    let described = match describe_entries(input) {
      Ok(described) => described,
      Err(err) => {
        self
          .host
          .line(format_args!("Could not classify directory contents: {err}"));
        return Vec::new();
      }
    };

    self.host.line("Processing directory contents:");
    described
      .into_iter()
      .map(|(name, kind)| {
        let name = name.to_string_lossy().into_owned();
        self.host.line(format_args!("- {name} ({kind})"));
        EntryReport { name, kind }
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::seed_fixture_tree;
  use crate::logger::LogLevel;
  use std::fs;
  use std::io;
  use tempfile::tempdir;

  fn run(config: &HarnessConfig, input: &Path) -> (RunReport, String) {
    let host = ConsoleHost::new(Vec::new(), false);
    let report = DebugRun::new(config, &host, RecordingLogger::new())
      .execute(input)
      .unwrap();
    let text = String::from_utf8(host.into_inner()).unwrap();
    (report, text)
  }

  #[test]
  fn fixture_run_reports_top_level_files_only() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("test-assets");
    seed_fixture_tree(&root).unwrap();

    let (report, text) = run(&HarnessConfig::default(), &root);

    assert_eq!(report.assets.len(), 2);
    assert!(report.assets.iter().all(|asset| asset.is_file()));
    assert_eq!(report.entries.len(), 3);
    assert!(
      report
        .entries
        .iter()
        .any(|entry| entry.name == "subdir" && entry.kind == PathKind::Directory)
    );
    assert!(
      report
        .recursive_listing
        .as_ref()
        .unwrap()
        .contains(&PathBuf::from("subdir").join("subdir-file.txt"))
    );

    assert_eq!(report.listing.as_ref().map(Vec::len), Some(3));
    assert!(report.listing_error.is_none());

    assert!(text.contains("[DEBUG] === Debug Information ==="));
    assert!(text.contains("[DEBUG] Standard directory listing:"));
    assert!(!text.contains("Error details:"));
    assert!(text.contains("[DEBUG] - subdir (directory)"));
    assert!(text.contains("[DEBUG] 1. "));
    assert!(text.contains("[DEBUG] 2. "));
    assert!(!text.contains("[DEBUG] 3. "));
  }

  #[test]
  fn missing_input_logs_and_returns_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("nowhere");

    let (report, text) = run(&HarnessConfig::default(), &input);

    assert!(report.assets.is_empty());
    assert!(!report.path.exists);
    assert!(report.recursive_listing.is_none());
    assert!(report.recursive_listing_error.is_some());
    assert!(
      report
        .logs
        .iter()
        .any(|record| record.level == LogLevel::Info && record.message.ends_with("not exists"))
    );
    let listing_error = report.listing_error.as_ref().unwrap();
    assert_eq!(listing_error.class, "NotFound");
    assert_eq!(listing_error.kind, "NotFound");
    assert!(report.listing.is_none());
    assert!(text.contains("Recursive listing not supported or failed"));
    assert!(text.contains("[DEBUG] Error details: NotFound (NotFound): "));
    assert!(text.contains("Files found for upload:"));
  }

  #[test]
  fn publishes_assets_as_a_step_output() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("release.zip");
    fs::write(&file, "zip").unwrap();
    let outputs = dir.path().join("outputs");

    let config = HarnessConfig {
      recursive_listing: false,
      ..HarnessConfig::default()
    };
    let host = ConsoleHost::new(io::sink(), false).with_output_file(Some(outputs.clone()));
    let report = DebugRun::new(&config, &host, RecordingLogger::new())
      .execute(&file)
      .unwrap();

    assert_eq!(report.assets, vec![file.clone()]);
    assert_eq!(report.listing_error.as_ref().unwrap().class, "NotADirectory");
    assert!(report.recursive_listing.is_none());
    assert!(report.recursive_listing_error.is_none());

    let expected = format!(
      "asset_files={}\n",
      serde_json::to_string(&vec![file]).unwrap()
    );
    assert_eq!(fs::read_to_string(outputs).unwrap(), expected);
  }

  #[test]
  fn forwards_resolver_messages_to_the_supplied_logger() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("gone");
    let config = HarnessConfig::default();
    let host = ConsoleHost::new(io::sink(), false);
    let forward = RecordingLogger::new();

    DebugRun::new(&config, &host, &forward).execute(&input).unwrap();

    assert!(forward.contains(LogLevel::Info, "DecodeAssetFile Start"));
    assert!(forward.contains(LogLevel::Info, "DecodeAssetFile Done"));
  }

  #[test]
  fn unlistable_input_prints_its_failure_class() {
    let (report, text) = run(&HarnessConfig::default(), Path::new("bad\0path"));

    assert!(report.assets.is_empty());
    let listing_error = report.listing_error.unwrap();
    assert_eq!(listing_error.class, "Other");
    assert_eq!(listing_error.kind, "InvalidInput");
    assert!(text.contains("[DEBUG] Error details: Other (InvalidInput): failed to list"));
    assert!(
      report
        .logs
        .iter()
        .any(|record| record.level == LogLevel::Error)
    );
  }
}
