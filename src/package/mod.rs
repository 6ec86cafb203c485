//! Installed distribution records
//!
//! This module provides the pieces shared by every metadata provider:
//! package names and their normalization, scanning registry directories
//! for distribution records, and parsing core metadata files.

mod discovery;
mod metadata;
mod name;

pub use discovery::{DistEntry, EntryKind, scan_directory};
pub use metadata::CoreMetadata;
pub use name::PackageName;
