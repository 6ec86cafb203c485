//! Provider for wheel-era installations (`.dist-info`), with egg fallback.

use anyhow::Result;

use super::{MetadataProvider, Resolution, read_version};
use crate::package::{EntryKind, PackageName, scan_directory};
use crate::runtime::Runtime;
use crate::site::SearchPath;

/// Looks up distributions the way the modern interpreter metadata API does.
///
/// Registry directories are searched in order and the first one holding a
/// matching record wins. `.dist-info` and `.egg-info` records are matched by
/// normalized name. An `.egg` is only a record when it is itself a registry
/// directory, and it is matched by legacy name.
pub struct DistInfoProvider<'a, R: Runtime> {
    runtime: &'a R,
    search_path: SearchPath,
}

impl<'a, R: Runtime> DistInfoProvider<'a, R> {
    pub fn new(runtime: &'a R, search_path: SearchPath) -> Self {
        Self {
            runtime,
            search_path,
        }
    }
}

impl<R: Runtime> MetadataProvider for DistInfoProvider<'_, R> {
    fn name(&self) -> &'static str {
        "dist-info"
    }

    #[tracing::instrument(skip(self, package), fields(package = %package))]
    fn resolve(&self, package: &PackageName) -> Result<Resolution> {
        for dir in self.search_path.iter() {
            let entries = scan_directory(self.runtime, dir);

            let matched = entries
                .iter()
                .find(|e| {
                    matches!(e.kind, EntryKind::DistInfo | EntryKind::EggInfo)
                        && package.matches(&e.name)
                })
                .or_else(|| {
                    entries
                        .iter()
                        .find(|e| e.kind == EntryKind::Egg && package.matches_legacy(&e.name))
                });

            if let Some(entry) = matched {
                log::debug!("Found {} in {:?}", package, entry.path);
                let version = read_version(self.runtime, entry, package)?;
                return Ok(Resolution::Found(version));
            }
        }

        log::debug!(
            "{} not found in {} registry directories",
            package,
            self.search_path.len()
        );
        Ok(Resolution::NotFound)
    }
}
