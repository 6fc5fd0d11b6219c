//! Sample asset tree used when the harness runs without a real asset input.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files written by [`seed_fixture_tree`], relative to the fixture root.
///
/// The nested file checks that resolution stays one level deep.
pub const FIXTURE_FILES: &[(&str, &str)] = &[
    ("test-file1.txt", "This is test file 1"),
    ("test-file2.json", r#"{"test": "This is test file 2"}"#),
    ("subdir/subdir-file.txt", "This is a file in a subdirectory"),
];

/// Create the sample tree under `root` unless `root` already exists.
///
/// Returns `true` when the tree was written. An existing root is left untouched, even if it
/// holds different files.
pub fn seed_fixture_tree(root: &Path) -> Result<bool> {
    if root.exists() {
        return Ok(false);
    }

    for (relative, contents) in FIXTURE_FILES {
        let target = root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&target, contents)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }

    log::debug!("seeded fixture tree at {}", root.display());
    Ok(true)
}
