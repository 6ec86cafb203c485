//! Metadata provider abstraction.
//!
//! A provider answers one question: which version of a distribution is
//! installed? Two implementations exist, selected at build time:
//!
//! - [`DistInfoProvider`] reads wheel (`.dist-info`) records first and falls
//!   back to egg records, the same way the modern interpreter lookup does.
//! - [`EggInfoProvider`] only understands setuptools egg records.

#[cfg(not(any(feature = "dist-info", feature = "egg-info")))]
compile_error!("distver needs at least one of the `dist-info` or `egg-info` features");

#[cfg(feature = "dist-info")]
mod dist_info;
#[cfg(feature = "egg-info")]
mod egg_info;

use anyhow::{Result, anyhow};
use std::fmt;

use crate::package::{CoreMetadata, DistEntry, PackageName};
use crate::runtime::Runtime;
use crate::site::SearchPath;

#[cfg(feature = "dist-info")]
pub use dist_info::DistInfoProvider;
#[cfg(feature = "egg-info")]
pub use egg_info::EggInfoProvider;

/// Outcome of a version lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The distribution is installed with this version.
    Found(String),
    /// No installed distribution matches the name.
    NotFound,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Found(version) => write!(f, "found {}", version),
            Resolution::NotFound => write!(f, "not found"),
        }
    }
}

/// Trait for installed-distribution metadata providers.
///
/// `Err` is reserved for environment faults such as unreadable directories
/// or a record without a version; a missing distribution is
/// [`Resolution::NotFound`].
#[cfg_attr(test, mockall::automock)]
pub trait MetadataProvider {
    /// Short provider identifier for logs.
    fn name(&self) -> &'static str;

    /// Look up the installed version of `package`.
    fn resolve(&self, package: &PackageName) -> Result<Resolution>;
}

/// Pick the preferred provider compiled into this build.
///
/// The order is fixed: the dist-info provider when available, otherwise
/// the egg-info provider.
pub fn select<'a, R: Runtime>(
    runtime: &'a R,
    search_path: SearchPath,
) -> Box<dyn MetadataProvider + 'a> {
    #[cfg(feature = "dist-info")]
    let provider: Box<dyn MetadataProvider + 'a> =
        Box::new(DistInfoProvider::new(runtime, search_path));

    #[cfg(all(feature = "egg-info", not(feature = "dist-info")))]
    let provider: Box<dyn MetadataProvider + 'a> =
        Box::new(EggInfoProvider::new(runtime, search_path));

    log::debug!("Using metadata provider '{}'", provider.name());
    provider
}

/// Read the `Version` header of a matched record.
///
/// A record that matched by name but carries no version is a broken
/// installation and is reported as an error.
fn read_version<R: Runtime>(runtime: &R, entry: &DistEntry, package: &PackageName) -> Result<String> {
    let metadata = CoreMetadata::load(runtime, entry)?;
    metadata.version().map(str::to_string).ok_or_else(|| {
        anyhow!(
            "Installed metadata for '{}' at {:?} has no Version field",
            package,
            entry.path
        )
    })
}
