//! Runtime abstraction for system operations.
//!
//! Everything that touches the environment or the file system goes through
//! [`Runtime`], so lookups can be exercised against a [`MockRuntime`].
//!
//! # Structure
//!
//! - `env` - Environment variables and well-known directories
//! - `fs` - Read-only file system operations (read, list, glob)

mod env;
mod fs;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;

    /// List the entries of a directory, sorted by file name.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Expand a glob pattern into the paths that currently exist.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    // Directories
    fn home_dir(&self) -> Option<PathBuf>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.is_file_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.glob_impl(pattern)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }
}
