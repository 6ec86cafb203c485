//! Version report: resolve one package and print a single line.

use anyhow::Result;
use std::io::{self, Write};

use crate::package::PackageName;
use crate::provider::{MetadataProvider, Resolution};

/// Format the line printed for a lookup outcome.
pub fn format_resolution(package: &PackageName, resolution: &Resolution) -> String {
    match resolution {
        Resolution::Found(version) => format!("Version of {}: {}", package, version),
        Resolution::NotFound => format!("Package '{}' not found or not installed.", package),
    }
}

/// Resolve `package` and write exactly one line to `output`.
///
/// Provider errors propagate without writing anything.
pub fn report_to<P, W>(provider: &P, package: &PackageName, output: &mut W) -> Result<Resolution>
where
    P: MetadataProvider + ?Sized,
    W: Write,
{
    let resolution = provider.resolve(package)?;
    log::info!("{} via {}: {}", package, provider.name(), resolution);
    writeln!(output, "{}", format_resolution(package, &resolution))?;
    output.flush()?;
    Ok(resolution)
}

/// Resolve `package` and print the result to standard output.
pub fn report<P: MetadataProvider + ?Sized>(provider: &P, package: &PackageName) -> Result<Resolution> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    report_to(provider, package, &mut lock)
}
