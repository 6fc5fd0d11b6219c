//! Read-only inspection of the asset path, printed before resolution to explain its outcome.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of what the filesystem reports for the asset path.
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
  /// Path exactly as supplied.
  pub path: PathBuf,
  /// Path made absolute against the working directory, without resolving symlinks.
  pub absolute: PathBuf,
  /// Whether anything exists at the path, following symlinks.
  pub exists: bool,
  /// Set when the path exists and is a directory.
  pub is_dir: bool,
  /// Set when the path exists and is a regular file.
  pub is_file: bool,
  /// Size in bytes as reported by the metadata.
  pub size: Option<u64>,
  /// Creation time, when the platform records one.
  pub created: Option<String>,
  /// Last modification time.
  pub modified: Option<String>,
}

impl PathReport {
  /// Inspect `path`. Never fails; anything that cannot be queried is left unset.
  pub fn inspect(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let metadata = fs::metadata(path).ok();

    Self {
      path: path.to_path_buf(),
      absolute,
      exists: metadata.is_some(),
      is_dir: metadata.as_ref().is_some_and(|meta| meta.is_dir()),
      is_file: metadata.as_ref().is_some_and(|meta| meta.is_file()),
      size: metadata.as_ref().map(|meta| meta.len()),
      created: metadata
        .as_ref()
        .and_then(|meta| meta.created().ok())
        .map(format_timestamp),
      modified: metadata
        .as_ref()
        .and_then(|meta| meta.modified().ok())
        .map(format_timestamp),
    }
  }

  /// Human readable lines for the console.
  pub fn lines(&self) -> Vec<String> {
    let mut lines = vec![
      format!("Asset file/directory path: {}", self.path.display()),
      format!("Absolute path: {}", self.absolute.display()),
      format!("Path exists: {}", yes_no(self.exists)),
    ];

    if self.exists {
      lines.push(format!("Is directory: {}", yes_no(self.is_dir)));
      lines.push(format!("Is file: {}", yes_no(self.is_file)));
      if let Some(size) = self.size {
        lines.push(format!("File size: {size} bytes"));
      }
      lines.push(format!(
        "Created: {}",
        self.created.as_deref().unwrap_or("unavailable")
      ));
      lines.push(format!(
        "Modified: {}",
        self.modified.as_deref().unwrap_or("unavailable")
      ));
    }

    lines
  }
}

fn yes_no(value: bool) -> &'static str {
  if value { "Yes" } else { "No" }
}

fn format_timestamp(time: SystemTime) -> String {
  DateTime::<Utc>::from(time).to_rfc3339()
}

/// Every entry below `root`, relative to it, parents listed before their children.
///
/// Symlinked directories are reported but not descended into. Display only: the resolver stays
/// one level deep regardless of what this returns.
pub fn recursive_listing(root: &Path) -> io::Result<Vec<PathBuf>> {
  let mut entries = Vec::new();
  walk(root, Path::new(""), &mut entries)?;
  Ok(entries)
}

fn walk(root: &Path, relative: &Path, entries: &mut Vec<PathBuf>) -> io::Result<()> {
  for entry in fs::read_dir(root.join(relative))? {
    let entry = entry?;
    let child = relative.join(entry.file_name());
    let descend = entry.file_type()?.is_dir();
    entries.push(child.clone());
    if descend {
      walk(root, &child, entries)?;
    }
  }
  Ok(())
}
