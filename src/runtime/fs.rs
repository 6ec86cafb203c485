//! Read-only file system operations (read, list, glob).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_file_impl(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_dir_impl(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)
            .with_context(|| format!("Failed to list directory {:?}", path))?
            .map(|entry| Ok(entry?.path()))
            .collect::<Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn glob_impl(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let paths = glob::glob(pattern).with_context(|| format!("Invalid glob pattern {}", pattern))?;
        // Unreadable intermediate directories are not matches, not failures.
        Ok(paths.filter_map(|p| p.ok()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("PKG-INFO");

        fs::write(&file_path, "Version: 1.0\n").unwrap();
        assert!(runtime.is_file(&file_path));
        assert!(!runtime.is_dir(&file_path));
        assert_eq!(runtime.read_to_string(&file_path).unwrap(), "Version: 1.0\n");

        assert!(runtime.is_dir(dir.path()));
        assert!(runtime.read_to_string(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_real_runtime_read_dir_is_sorted() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        for name in ["zeta.dist-info", "alpha.dist-info", "mid.egg-info"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        let entries = runtime.read_dir(dir.path()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.dist-info", "mid.egg-info", "zeta.dist-info"]);
    }

    #[test]
    fn test_real_runtime_read_dir_missing() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        assert!(runtime.read_dir(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_real_runtime_glob() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lib/python3.11/site-packages")).unwrap();
        fs::create_dir_all(dir.path().join("lib/python3.12/site-packages")).unwrap();

        let pattern = format!("{}/lib/python3*/site-packages", dir.path().display());
        let mut matches = runtime.glob(&pattern).unwrap();
        matches.sort();
        assert_eq!(matches.len(), 2);
        assert!(matches[0].ends_with("python3.11/site-packages"));

        assert!(runtime.glob("[").is_err());
    }
}
