use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_dist_info(site: &Path, dir_name: &str, version: &str) {
    let dist = site.join(dir_name);
    fs::create_dir_all(&dist).unwrap();
    fs::write(
        dist.join("METADATA"),
        format!(
            "Metadata-Version: 2.1\nName: spam-eggs\nVersion: {}\nSummary: Spam and eggs\n\nLong description.\n",
            version
        ),
    )
    .unwrap();
}

fn distver(site: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("distver"));
    cmd.env_remove("RUST_LOG")
        .env_remove("PYTHONPATH")
        .env_remove("VIRTUAL_ENV")
        .env_remove("CONDA_PREFIX")
        .env("DISTVER_PATH", site);
    cmd
}

#[test]
fn test_reports_installed_version() {
    let site = tempdir().unwrap();
    write_dist_info(site.path(), "spam_eggs-1.2.3.dist-info", "1.2.3");

    distver(site.path())
        .assert()
        .success()
        .stdout("Version of spam-eggs: 1.2.3\n");
}

#[test]
fn test_reports_not_installed() {
    let site = tempdir().unwrap();
    write_dist_info(site.path(), "ham-2.0.dist-info", "2.0");

    distver(site.path())
        .assert()
        .success()
        .stdout("Package 'spam-eggs' not found or not installed.\n");
}

#[test]
fn test_output_is_repeatable() {
    let site = tempdir().unwrap();
    write_dist_info(site.path(), "spam_eggs-1.2.3.dist-info", "1.2.3");

    let first = distver(site.path()).output().unwrap();
    let second = distver(site.path()).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_path_flag_overrides_environment() {
    let env_site = tempdir().unwrap();
    let flag_site = tempdir().unwrap();
    write_dist_info(env_site.path(), "spam_eggs-1.0.0.dist-info", "1.0.0");
    write_dist_info(flag_site.path(), "spam_eggs-3.0.0.dist-info", "3.0.0");

    distver(env_site.path())
        .arg("--path")
        .arg(flag_site.path())
        .assert()
        .success()
        .stdout("Version of spam-eggs: 3.0.0\n");
}

#[test]
fn test_versionless_record_fails() {
    let site = tempdir().unwrap();
    let dist = site.path().join("spam_eggs-1.2.3.dist-info");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("METADATA"), "Metadata-Version: 2.1\nName: spam-eggs\n").unwrap();

    distver(site.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("has no Version field"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let site = tempdir().unwrap();
    write_dist_info(site.path(), "spam_eggs-1.2.3.dist-info", "1.2.3");

    distver(site.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout("Version of spam-eggs: 1.2.3\n")
        .stderr(predicate::str::contains("Using metadata provider"));
}

#[test]
fn test_rejects_positional_argument() {
    let site = tempdir().unwrap();
    distver(site.path()).arg("other-package").assert().failure();
}

#[test]
fn test_version_flag() {
    let site = tempdir().unwrap();
    distver(site.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("distver "))
        .stdout(predicate::str::contains("Version of").not());
}

#[cfg(unix)]
#[test]
fn test_venv_pth_entry_is_searched() {
    let venv = tempdir().unwrap();
    fs::write(
        venv.path().join("pyvenv.cfg"),
        "home = /usr/bin\ninclude-system-site-packages = false\n",
    )
    .unwrap();
    let site = venv.path().join("lib/python3.12/site-packages");
    fs::create_dir_all(&site).unwrap();

    let project = venv.path().join("src/spam-eggs");
    let egg_info = project.join("spam_eggs.egg-info");
    fs::create_dir_all(&egg_info).unwrap();
    fs::write(
        egg_info.join("PKG-INFO"),
        "Metadata-Version: 1.0\nName: spam-eggs\nVersion: 0.4\n",
    )
    .unwrap();
    fs::write(
        site.join("easy-install.pth"),
        format!("import sys; sys.__plen = len(sys.path)\n{}\n", project.display()),
    )
    .unwrap();

    distver(site.as_path())
        .env_remove("DISTVER_PATH")
        .env("VIRTUAL_ENV", venv.path())
        .env("PYTHONNOUSERSITE", "1")
        .assert()
        .success()
        .stdout("Version of spam-eggs: 0.4\n");
}

#[cfg(feature = "egg-info")]
#[test]
fn test_legacy_provider_reports_same_contract() {
    use distver::package::PackageName;
    use distver::provider::EggInfoProvider;
    use distver::report::report_to;
    use distver::runtime::RealRuntime;
    use distver::site::SearchPath;

    let site = tempdir().unwrap();
    let egg_info = site.path().join("spam_eggs-0.9.0-py3.8.egg-info");
    fs::create_dir_all(&egg_info).unwrap();
    fs::write(
        egg_info.join("PKG-INFO"),
        "Metadata-Version: 1.1\nName: spam-eggs\nVersion: 0.9.0\n",
    )
    .unwrap();

    let runtime = RealRuntime;
    let provider = EggInfoProvider::new(&runtime, SearchPath::new(vec![site.path().into()]));
    let package: PackageName = distver::PACKAGE_NAME.parse().unwrap();

    let mut output = Vec::new();
    report_to(&provider, &package, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "Version of spam-eggs: 0.9.0\n");

    // The default build reads the same record through its preferred provider.
    distver(site.path())
        .assert()
        .success()
        .stdout("Version of spam-eggs: 0.9.0\n");
}
