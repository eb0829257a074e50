use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use tracing::{debug, warn};

use crate::filter::FilterConfig;

/// A file that matched but could not be removed.
#[derive(Debug)]
pub struct DeleteFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Outcome of one sweep over a directory.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<DeleteFailure>,
}

impl SweepReport {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Lines printed once the sweep is over.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Deleted {} files", self.deleted_count())];
        if self.failed_count() > 0 {
            lines.push(format!("Failed to delete {} Files", self.failed_count()));
        }
        lines
    }
}

/// Deletes every matching file under `root`.
///
/// Only the root's immediate entries are considered unless the config is
/// recursive. Directories are never removed. Failing to read `root` is an
/// error; a file that cannot be removed is recorded in the report and the
/// sweep moves on.
pub fn sweep(root: &Path, config: &FilterConfig) -> Result<SweepReport> {
    let mut report = SweepReport::default();
    if config.recursive() {
        sweep_tree(root, config, &mut report)?;
    } else {
        sweep_dir(root, config, &mut report)?;
    }
    Ok(report)
}

fn sweep_dir(root: &Path, config: &FilterConfig, report: &mut SweepReport) -> Result<()> {
    // Read the whole listing first so a broken directory fails before anything is removed.
    let entries = fs::read_dir(root)
        .and_then(|iter| iter.collect::<io::Result<Vec<DirEntry>>>())
        .with_context(|| format!("Could not read directory {}", root.display()))?;

    for entry in entries {
        let path = entry.path();
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => continue,
            Ok(_) => {}
            Err(err) => {
                warn!("Skipping {}: {err}", display_rel(&path, root));
                continue;
            }
        }
        let name = entry.file_name();
        visit(&path, &name.to_string_lossy(), root, config, report);
    }
    Ok(())
}

fn sweep_tree(root: &Path, config: &FilterConfig, report: &mut SweepReport) -> Result<()> {
    fs::read_dir(root).with_context(|| format!("Could not find files in {}", root.display()))?;

    for entry in WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("Skipping entry: {err}");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        if entry.file_type().is_none_or(|ft| ft.is_dir()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        visit(entry.path(), &name, root, config, report);
    }
    Ok(())
}

fn visit(path: &Path, name: &str, root: &Path, config: &FilterConfig, report: &mut SweepReport) {
    if !config.should_delete(name) {
        return;
    }

    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Deleted {}", display_rel(path, root));
            report.deleted.push(path.to_path_buf());
        }
        Err(error) => {
            report.failed.push(DeleteFailure {
                path: path.to_path_buf(),
                error,
            });
        }
    }
}

fn display_rel(path: &Path, root: &Path) -> String {
    diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
