use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

/// Version reported by `distver --version`.
///
/// Release builds use the tag `git describe` finds. Dirty trees and builds
/// outside a git checkout (a published crate) get a timestamp suffix so two
/// local builds can be told apart.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=DISTVER_BUILD_VERSION");

    let version = std::env::var("DISTVER_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_version)
        .unwrap_or_else(|| {
            let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".into());
            format!("{}+local.{}", pkg, build_time())
        });

    println!("cargo:rustc-env=DISTVER_VERSION={}", version);
}

/// `v0.3.1-2-gabc1234` -> `0.3.1-2-gabc1234`
fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    let version = described.strip_prefix('v').unwrap_or(described);

    match version.strip_suffix("-dirty") {
        None if !version.is_empty() => Some(version.to_string()),
        Some(clean) => Some(format!("{}+dirty.{}", clean, build_time())),
        None => None,
    }
}

fn build_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
