use anyhow::{Result, anyhow, bail};
use std::fmt;
use std::str::FromStr;

/// A distribution name as the user wrote it, plus its normalized form.
///
/// Lookups compare normalized names (`Spam_Eggs`, `spam.eggs` and `spam-eggs`
/// are the same distribution); output always uses the name as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    raw: String,
    normalized: pep508_rs::PackageName,
}

impl PackageName {
    /// The name exactly as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// PEP 503 normalized name, e.g. `spam-eggs`.
    pub fn normalized(&self) -> String {
        self.normalized.to_string()
    }

    /// Legacy setuptools normalization used for eggs: lowercase, `-` becomes `_`.
    pub fn legacy_normalized(&self) -> String {
        legacy_normalize(&self.raw)
    }

    /// Whether a name taken from a `.dist-info` / `.egg-info` record refers to
    /// this distribution. Names that are not valid distribution names never match.
    pub fn matches(&self, candidate: &str) -> bool {
        pep508_rs::PackageName::from_str(candidate)
            .map(|c| c == self.normalized)
            .unwrap_or(false)
    }

    /// Whether a name taken from an egg record refers to this distribution.
    pub fn matches_legacy(&self, candidate: &str) -> bool {
        legacy_normalize(candidate) == self.legacy_normalized()
    }
}

fn legacy_normalize(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PackageName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            bail!("Package name cannot be empty.");
        }
        let normalized = pep508_rs::PackageName::from_str(s)
            .map_err(|e| anyhow!("Invalid package name '{}': {}", s, e))?;
        Ok(PackageName {
            raw: s.to_string(),
            normalized,
        })
    }
}
