pub mod package;
pub mod provider;
pub mod report;
pub mod runtime;
pub mod site;

/// Distribution whose installed version is reported.
pub const PACKAGE_NAME: &str = "spam-eggs";
