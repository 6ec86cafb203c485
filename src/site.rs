//! Registry directory discovery.
//!
//! Computes the ordered list of directories that may hold installed
//! distribution records, mirroring where the interpreter's `sys.path`
//! would look: `PYTHONPATH`, the active environment, the user site and
//! the system sites.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Ordered, de-duplicated list of registry directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Build a search path, dropping empty entries and later duplicates.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::with_capacity(dirs.len());
        for dir in dirs {
            if !dir.as_os_str().is_empty() && !unique.contains(&dir) {
                unique.push(dir);
            }
        }
        Self { dirs: unique }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Discover the registry directories of the current environment.
    ///
    /// Non-empty `overrides` replace discovery entirely.
    #[tracing::instrument(skip(runtime))]
    pub fn discover<R: Runtime>(runtime: &R, overrides: Vec<PathBuf>) -> Result<Self> {
        if !overrides.is_empty() {
            log::debug!("Using explicit search path {:?}", overrides);
            return Ok(Self::new(overrides));
        }

        let mut dirs = Vec::new();

        if let Ok(python_path) = runtime.env_var("PYTHONPATH") {
            dirs.extend(std::env::split_paths(&python_path));
        }

        let venv = non_empty_var(runtime, "VIRTUAL_ENV");
        let prefix = venv
            .clone()
            .or_else(|| non_empty_var(runtime, "CONDA_PREFIX"));
        if let Some(prefix) = &prefix {
            for site in prefix_site_packages(runtime, Path::new(prefix))? {
                add_site_dir(runtime, &mut dirs, site);
            }
        }

        let include_system = match &venv {
            Some(venv) => venv_includes_system_site(runtime, Path::new(venv))?,
            None => true,
        };

        if include_system {
            if non_empty_var(runtime, "PYTHONNOUSERSITE").is_none() {
                for site in user_site_packages(runtime)? {
                    add_site_dir(runtime, &mut dirs, site);
                }
            }
            for site in system_site_packages(runtime)? {
                add_site_dir(runtime, &mut dirs, site);
            }
        } else {
            log::debug!("Virtual environment excludes system site-packages");
        }

        let search_path = Self::new(dirs);
        log::debug!("Discovered search path {:?}", search_path.dirs);
        Ok(search_path)
    }
}

/// Append a site directory followed by the paths its `.pth` files list.
///
/// `.pth` files are read in file name order. A site directory that cannot be
/// listed contributes only itself.
fn add_site_dir<R: Runtime>(runtime: &R, dirs: &mut Vec<PathBuf>, site: PathBuf) {
    let pth_files: Vec<PathBuf> = match runtime.read_dir(&site) {
        Ok(entries) => entries
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "pth") && runtime.is_file(p))
            .collect(),
        Err(e) => {
            log::debug!("Cannot list site directory {:?}: {:#}", site, e);
            Vec::new()
        }
    };

    dirs.push(site.clone());
    for pth in pth_files {
        dirs.extend(read_pth(runtime, &site, &pth));
    }
}

/// Paths listed in a `.pth` file that exist, resolved against the site directory.
///
/// Comments, blank lines and `import` lines are skipped.
fn read_pth<R: Runtime>(runtime: &R, site: &Path, pth: &Path) -> Vec<PathBuf> {
    let content = match runtime.read_to_string(pth) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("Skipping unreadable {:?}: {:#}", pth, e);
            return Vec::new();
        }
    };

    content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .filter(|line| !line.starts_with("import ") && !line.starts_with("import\t"))
        .map(|line| site.join(line.trim_end()))
        .filter(|path| runtime.is_dir(path) || runtime.is_file(path))
        .collect()
}

fn non_empty_var<R: Runtime>(runtime: &R, key: &str) -> Option<String> {
    runtime.env_var(key).ok().filter(|v| !v.is_empty())
}

/// `site-packages` directories of an installation prefix, newest interpreter first.
fn prefix_site_packages<R: Runtime>(runtime: &R, prefix: &Path) -> Result<Vec<PathBuf>> {
    if cfg!(windows) {
        return Ok(vec![prefix.join("Lib").join("site-packages")]);
    }
    expand(runtime, prefix, "lib/python3*/site-packages")
}

fn user_site_packages<R: Runtime>(runtime: &R) -> Result<Vec<PathBuf>> {
    let Some(home) = runtime.home_dir() else {
        return Ok(Vec::new());
    };
    if cfg!(windows) {
        return expand(runtime, &home, "AppData/Roaming/Python/Python3*/site-packages");
    }
    expand(runtime, &home, ".local/lib/python3*/site-packages")
}

fn system_site_packages<R: Runtime>(runtime: &R) -> Result<Vec<PathBuf>> {
    const PATTERNS: &[(&str, &str)] = &[
        ("/usr/local", "lib/python3*/site-packages"),
        ("/usr/local", "lib/python3*/dist-packages"),
        ("/usr", "lib/python3/dist-packages"),
        ("/usr", "lib/python3.*/site-packages"),
        ("/usr", "lib64/python3.*/site-packages"),
    ];

    if cfg!(windows) {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for (prefix, pattern) in PATTERNS {
        dirs.extend(expand(runtime, Path::new(prefix), pattern)?);
    }
    Ok(dirs)
}

/// Glob `pattern` under `prefix`, newest interpreter version first.
fn expand<R: Runtime>(runtime: &R, prefix: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&prefix.to_string_lossy()),
        pattern
    );
    let mut matches = runtime.glob(&full)?;
    matches.sort_by(|a, b| python_version(b).cmp(&python_version(a)).then_with(|| a.cmp(b)));
    Ok(matches)
}

/// `/usr/lib/python3.12/site-packages` -> `Some((3, 12))`
fn python_version(path: &Path) -> Option<(u32, u32)> {
    path.components().find_map(|c| {
        let name = c.as_os_str().to_str()?.to_lowercase();
        let rest = name.strip_prefix("python")?;
        let (major, minor) = match rest.split_once('.') {
            Some((major, minor)) => (major, minor),
            // Windows style "Python312"
            None => (rest.get(..1)?, rest.get(1..)?),
        };
        let minor: String = minor.chars().take_while(|c| c.is_ascii_digit()).collect();
        Some((major.parse().ok()?, minor.parse().unwrap_or(0)))
    })
}

/// Read `include-system-site-packages` from a virtual environment's `pyvenv.cfg`.
///
/// Environments without a `pyvenv.cfg` are treated as plain prefixes.
fn venv_includes_system_site<R: Runtime>(runtime: &R, venv: &Path) -> Result<bool> {
    let cfg_path = venv.join("pyvenv.cfg");
    if !runtime.is_file(&cfg_path) {
        return Ok(true);
    }

    let content = runtime.read_to_string(&cfg_path)?;
    let include = content
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("include-system-site-packages"))
        .is_some_and(|(_, value)| value.trim().eq_ignore_ascii_case("true"));
    Ok(include)
}
