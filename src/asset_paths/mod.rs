//! Resolution of a CI step's "asset files" input into the files that should be uploaded.
//!
//! The work is split so that the filesystem boundary (classifying why a directory could not be
//! listed), the type query for individual entries, and the one-level walk itself can be tested
//! independently. Nothing in here reads process-wide state: the path and the logger are always
//! passed in by the host.

mod kind;
mod listing;
mod resolver;

pub use kind::PathKind;
pub use listing::{ListingFailure, list_directory};
pub use resolver::{AssetList, describe_entries, resolve_asset_files};
