//! Provider for setuptools egg installations.

use anyhow::Result;

use super::{MetadataProvider, Resolution, read_version};
use crate::package::{EntryKind, PackageName, scan_directory};
use crate::runtime::Runtime;
use crate::site::SearchPath;

/// Looks up `.egg-info` records, and `.egg` directories placed directly on
/// the search path, using legacy name matching (case-insensitive, `-` and `_`
/// equivalent). Wheel `.dist-info` records are invisible to it.
pub struct EggInfoProvider<'a, R: Runtime> {
    runtime: &'a R,
    search_path: SearchPath,
}

impl<'a, R: Runtime> EggInfoProvider<'a, R> {
    pub fn new(runtime: &'a R, search_path: SearchPath) -> Self {
        Self {
            runtime,
            search_path,
        }
    }
}

impl<R: Runtime> MetadataProvider for EggInfoProvider<'_, R> {
    fn name(&self) -> &'static str {
        "egg-info"
    }

    #[tracing::instrument(skip(self, package), fields(package = %package))]
    fn resolve(&self, package: &PackageName) -> Result<Resolution> {
        for dir in self.search_path.iter() {
            let matched = scan_directory(self.runtime, dir).into_iter().find(|e| {
                matches!(e.kind, EntryKind::EggInfo | EntryKind::Egg)
                    && package.matches_legacy(&e.name)
            });

            if let Some(entry) = matched {
                log::debug!("Found {} in {:?}", package, entry.path);
                let version = read_version(self.runtime, &entry, package)?;
                return Ok(Resolution::Found(version));
            }
        }

        Ok(Resolution::NotFound)
    }
}
