use anyhow::{Result, bail};

use crate::runtime::Runtime;

use super::DistEntry;

/// Header block of a core metadata file (`METADATA` or `PKG-INFO`).
///
/// The file is RFC 822 style: `Key: value` lines up to the first blank
/// line, continuation lines start with whitespace. The message body (the
/// long description) is not kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreMetadata {
    headers: Vec<(String, String)>,
}

impl CoreMetadata {
    pub fn parse(content: &str) -> Self {
        let mut headers: Vec<(String, String)> = Vec::new();

        for line in content.lines() {
            if line.trim().is_empty() {
                break;
            }
            if line.starts_with([' ', '\t']) {
                if let Some((_, value)) = headers.last_mut() {
                    value.push('\n');
                    value.push_str(line.trim());
                }
                continue;
            }
            // Lines without a colon are not headers; skip them.
            if let Some((key, value)) = line.split_once(':') {
                headers.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        CoreMetadata { headers }
    }

    /// First value of a header, matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.get("Name").filter(|v| !v.is_empty())
    }

    pub fn version(&self) -> Option<&str> {
        self.get("Version").filter(|v| !v.is_empty())
    }

    /// Load the metadata of a distribution record from the first candidate
    /// file that exists.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, entry: &DistEntry) -> Result<Self> {
        for candidate in entry.metadata_candidates() {
            if runtime.is_file(&candidate) {
                log::debug!("Reading metadata from {:?}", candidate);
                let content = runtime.read_to_string(&candidate)?;
                return Ok(Self::parse(&content));
            }
        }
        bail!("No metadata file found for {:?}", entry.path)
    }
}
