use anyhow::Result;
use clap::Parser;
use distver::package::PackageName;
use distver::site::SearchPath;
use std::path::PathBuf;

/// distver - installed distribution version reporter
///
/// Prints the installed version of the `spam-eggs` Python distribution by
/// reading the metadata records (`*.dist-info`, `*.egg-info`, `*.egg`) that
/// installers leave in site-packages. No interpreter is started.
///
/// Registry directories are discovered from PYTHONPATH, VIRTUAL_ENV or
/// CONDA_PREFIX, the user site and the system sites.
#[derive(Parser, Debug)]
#[command(author, version = env!("DISTVER_VERSION"), about)]
struct Cli {
    /// Registry directory to search instead of the discovered ones (repeatable; also via DISTVER_PATH)
    #[arg(
        long = "path",
        short = 'p',
        env = "DISTVER_PATH",
        value_name = "DIR",
        value_delimiter = path_delimiter()
    )]
    pub paths: Vec<PathBuf>,

    /// Log lookup details to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

const fn path_delimiter() -> char {
    if cfg!(windows) { ';' } else { ':' }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let runtime = distver::runtime::RealRuntime;
    let package: PackageName = distver::PACKAGE_NAME.parse()?;
    let search_path = SearchPath::discover(&runtime, cli.paths)?;
    let provider = distver::provider::select(&runtime, search_path);

    distver::report::report(provider.as_ref(), &package)?;
    Ok(())
}
