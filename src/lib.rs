#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod diagnostics;
pub mod fixtures;
pub mod harness;
pub mod host;
pub mod logger;

pub use asset_paths::{AssetList, ListingFailure, PathKind, resolve_asset_files};
pub use harness::{DebugRun, RunReport};
pub use logger::{AssetLogger, LogFacade, LogLevel, LogRecord, RecordingLogger};
