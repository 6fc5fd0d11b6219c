use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::asset_paths::kind::PathKind;
use crate::asset_paths::listing::{ListingFailure, list_directory};
use crate::logger::AssetLogger;

/// Files resolved from the asset input, in directory-listing order. May be empty.
pub type AssetList = Vec<PathBuf>;

/// Resolve the asset input into the files that should be uploaded.
///
/// A directory contributes its immediate non-directory entries, each joined onto `path` as
/// given. Subdirectories are skipped and never descended into. A path that exists but is not a
/// directory resolves to itself. Every filesystem failure is logged and absorbed: a missing path
/// yields an empty list with an informational message, anything else an empty list with an
/// error message.
pub fn resolve_asset_files<L: AssetLogger + ?Sized>(
    path: impl AsRef<Path>,
    logger: &L,
) -> AssetList {
    let path = path.as_ref();
    let mut assets = AssetList::new();

    let entries = match list_directory(path) {
        Ok(entries) => entries,
        Err(failure) => {
            logger.debug(&failure.to_string());
            match &failure {
                ListingFailure::NotFound { .. } => {
                    logger.info(&format!("{} not exists", path.display()));
                }
                ListingFailure::NotADirectory { .. } => {
                    logger.info(&format!("{} exists", path.display()));
                    assets.push(path.to_path_buf());
                }
                ListingFailure::Other { .. } => logger.error(&failure.to_string()),
            }
            return assets;
        }
    };

    for entry in entries {
        let name = match entry {
            Ok(entry) => entry.file_name(),
            Err(err) => {
                logger.error(&format!(
                    "failed to read an entry of {}: {err}",
                    path.display()
                ));
                continue;
            }
        };

        let candidate = path.join(&name);
        match PathKind::of(&candidate) {
            Ok(PathKind::File) => assets.push(candidate),
            Ok(PathKind::Directory) => {
                logger.debug(&format!("skipping directory {}", candidate.display()));
            }
            Ok(PathKind::Missing) => {
                logger.error(&format!(
                    "{} vanished or is a dangling link",
                    candidate.display()
                ));
            }
            Err(err) => {
                logger.error(&format!("failed to stat {}: {err}", candidate.display()));
            }
        }
    }

    assets
}

/// Classify the immediate entries of a directory for display, in listing order.
///
/// Entries whose type cannot be queried are reported as [`PathKind::Missing`].
pub fn describe_entries(path: &Path) -> io::Result<Vec<(OsString, PathKind)>> {
    let mut described = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let name = entry?.file_name();
        let kind = PathKind::of(&path.join(&name)).unwrap_or(PathKind::Missing);
        described.push((name, kind));
    }
    Ok(described)
}
