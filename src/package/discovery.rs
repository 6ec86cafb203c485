use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Kind of distribution record found in a registry directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `<name>-<version>.dist-info/` (wheel installs)
    DistInfo,
    /// `<name>-<version>.egg-info`, either a directory or a bare PKG-INFO file
    EggInfo,
    /// `<name>-<version>-pyX.Y.egg/` with an `EGG-INFO/` directory
    Egg,
}

/// A distribution record and the name part of its file name.
#[derive(Debug, Clone, PartialEq)]
pub struct DistEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Everything before the first `-` of the stem, not yet normalized.
    pub name: String,
}

impl DistEntry {
    /// Classify a directory entry by its file name.
    pub fn classify(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let low = file_name.to_lowercase();

        let kind = if low.ends_with(".dist-info") {
            EntryKind::DistInfo
        } else if low.ends_with(".egg-info") {
            EntryKind::EggInfo
        } else if low.ends_with(".egg") {
            EntryKind::Egg
        } else {
            return None;
        };

        Some(DistEntry {
            path: path.to_path_buf(),
            kind,
            name: name_part(file_name).to_string(),
        })
    }

    /// Files that may hold the core metadata, in the order they are tried.
    pub fn metadata_candidates(&self) -> Vec<PathBuf> {
        match self.kind {
            EntryKind::DistInfo => vec![self.path.join("METADATA"), self.path.join("PKG-INFO")],
            EntryKind::EggInfo => vec![
                self.path.join("METADATA"),
                self.path.join("PKG-INFO"),
                // Older setuptools wrote egg-info as a single file.
                self.path.clone(),
            ],
            EntryKind::Egg => vec![self.path.join("EGG-INFO").join("PKG-INFO")],
        }
    }
}

/// `spam_eggs-1.2.3.dist-info` -> `spam_eggs`
fn name_part(file_name: &str) -> &str {
    let stem = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
    stem.split_once('-').map_or(stem, |(name, _)| name)
}

/// Find all distribution records in a registry directory.
///
/// A registry entry that is itself an egg (`foo-1.0-py3.8.egg` placed on the
/// search path) yields the egg as its only record. Eggs nested inside a
/// directory are not records of that directory. A directory that does not
/// exist or cannot be listed holds no records.
#[tracing::instrument(skip(runtime))]
pub fn scan_directory<R: Runtime>(runtime: &R, dir: &Path) -> Vec<DistEntry> {
    if !runtime.is_dir(dir) {
        log::trace!("Skipping missing registry directory {:?}", dir);
        return Vec::new();
    }

    if let Some(entry) = DistEntry::classify(dir)
        && entry.kind == EntryKind::Egg
        && runtime.is_dir(&dir.join("EGG-INFO"))
    {
        return vec![entry];
    }

    let children = match runtime.read_dir(dir) {
        Ok(children) => children,
        Err(e) => {
            log::debug!("Skipping unreadable registry directory {:?}: {:#}", dir, e);
            return Vec::new();
        }
    };

    children
        .iter()
        .filter_map(|path| DistEntry::classify(path))
        .filter(|entry| entry.kind != EntryKind::Egg)
        .collect()
}
