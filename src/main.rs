use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

mod filter;
mod logging;
mod sweep;

use filter::FilterConfig;
use logging::Verbosity;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Delete files whose names match an extension and/or a regex pattern"
)]
pub struct Cli {
    /// Recurse into subdirectories (directories themselves are never deleted)
    #[arg(short, long)]
    recursive: bool,

    /// Extension to look for, without the leading dot. If unset, extensions are ignored
    #[arg(short, long, value_name = "EXT", default_value = "")]
    extension: String,

    /// Regex matched against the file name up to its first `.`. Combined with -e, both must match
    #[arg(short, long, value_name = "REGEX", default_value = "")]
    pattern: String,

    /// Directory to clean (defaults to current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Log every deleted file to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Suppress per-file warnings on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    let config = FilterConfig::new(&cli.extension, &cli.pattern, cli.recursive)?;

    let cwd = std::env::current_dir().context("could not get the current working directory")?;
    let root = resolve_root(cli.root.as_deref(), &cwd);

    let report = sweep::sweep(&root, &config)?;
    for failure in &report.failed {
        warn!("Failed to delete {}: {}", failure.path.display(), failure.error);
    }
    for line in report.summary_lines() {
        println!("{line}");
    }

    Ok(())
}

fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    let Some(raw) = explicit else {
        return cwd.to_path_buf();
    };
    let expanded = PathBuf::from(shellexpand::tilde(&raw.to_string_lossy()).into_owned());
    if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    }
}
