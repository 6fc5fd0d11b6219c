use std::fmt;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use serde::Serialize;

/// Filesystem classification of a path, derived fresh on every query and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Nothing exists at the path, including symlinks whose target is gone.
    Missing,
    /// Any entry that is not a directory.
    File,
    /// A directory, or a symlink that points at one.
    Directory,
}

impl PathKind {
    /// Classify `path`, following symlinks.
    ///
    /// Only a missing entry is folded into [`PathKind::Missing`]; permission and I/O failures
    /// are handed back so the caller can decide how loudly to report them.
    pub fn of(path: &Path) -> io::Result<Self> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Self::Directory),
            Ok(_) => Ok(Self::File),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::Missing),
            Err(err) => Err(err),
        }
    }

    /// Lowercase label used in console output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
