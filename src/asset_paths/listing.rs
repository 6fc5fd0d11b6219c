use std::error::Error;
use std::fmt;
use std::fs::{self, ReadDir};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Why the asset path could not be listed as a directory.
///
/// The classification happens once, right where the I/O error is produced, so the resolver only
/// ever matches on these variants and never inspects raw error codes.
#[derive(Debug)]
pub enum ListingFailure {
    /// Nothing exists at the path.
    NotFound {
        /// Path that was listed.
        path: PathBuf,
    },
    /// The path exists but is not a directory; for the resolver this is the single-file case.
    NotADirectory {
        /// Path that was listed.
        path: PathBuf,
    },
    /// Permissions, I/O errors and anything else the platform reports.
    Other {
        /// Path that was listed.
        path: PathBuf,
        /// Source I/O error.
        source: io::Error,
    },
}

impl ListingFailure {
    /// Classify an error returned while opening `path` for listing.
    pub fn classify(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound { path },
            ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Other { path, source: err },
        }
    }

    /// Variant name, for diagnostics.
    pub fn class(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::NotADirectory { .. } => "NotADirectory",
            Self::Other { .. } => "Other",
        }
    }

    /// I/O error kind the failure was classified from.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NotADirectory { .. } => ErrorKind::NotADirectory,
            Self::Other { source, .. } => source.kind(),
        }
    }

    /// Path the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::NotADirectory { path } | Self::Other { path, .. } => {
                path
            }
        }
    }
}

impl fmt::Display for ListingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "{} does not exist", path.display()),
            Self::NotADirectory { path } => write!(f, "{} is not a directory", path.display()),
            Self::Other { path, source } => {
                write!(f, "failed to list {}: {source}", path.display())
            }
        }
    }
}

impl Error for ListingFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Other { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Open `path` for a one-level listing, classifying any failure.
///
/// Entries come back in whatever order the filesystem reports them.
pub fn list_directory(path: &Path) -> Result<ReadDir, ListingFailure> {
    fs::read_dir(path).map_err(|err| ListingFailure::classify(path, err))
}
