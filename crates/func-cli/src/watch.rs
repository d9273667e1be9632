//! Polling file watcher.
//!
//! Modification times are compared on every tick. A change triggers a full
//! reload from disk and a fresh generation run; the most recent completed run
//! is what ends up on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use tracing::{error, info};

use crate::cli::Args;
use crate::loader::load;
use crate::run_loaded;

/// Tracks modification times for a set of files.
#[derive(Debug, Clone)]
pub struct Watcher {
    files: Vec<(PathBuf, Option<SystemTime>)>,
}

impl Watcher {
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|path| {
                    let modified = modified(&path);
                    (path, modified)
                })
                .collect(),
        }
    }

    /// Starts from modification times recorded elsewhere, typically just
    /// before the files were read.
    pub fn from_stamps(files: Vec<(PathBuf, Option<SystemTime>)>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|(path, _)| path.as_path())
    }

    /// Returns the files whose modification time changed since the last call.
    ///
    /// A file that disappears or reappears counts as changed.
    pub fn changed(&mut self) -> Vec<PathBuf> {
        let mut changed = Vec::new();
        for (path, last) in &mut self.files {
            let current = modified(path);
            if current != *last {
                *last = current;
                changed.push(path.clone());
            }
        }
        changed
    }
}

pub(crate) fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Generates once, then regenerates whenever a configuration file changes.
///
/// Only returns if the initial load fails. Errors during later runs are
/// logged and watching continues.
pub fn watch(args: &Args, cwd: &Path) -> Result<()> {
    let loaded = load(args, cwd)?;
    let mut watcher = Watcher::from_stamps(loaded.watched.clone());
    if let Err(err) = run_loaded(args, &loaded) {
        error!("{:#}", err);
    }

    info!(files = watcher.files.len(), "watching…");
    let interval = Duration::from_millis(args.interval);

    loop {
        thread::sleep(interval);
        let changed = watcher.changed();
        if changed.is_empty() {
            continue;
        }

        for path in &changed {
            let name = path.file_name().unwrap_or(path.as_os_str());
            info!("{} changed, regenerating…", name.to_string_lossy());
        }

        match load(args, cwd) {
            Ok(loaded) => {
                watcher = Watcher::from_stamps(loaded.watched.clone());
                if let Err(err) = run_loaded(args, &loaded) {
                    error!("{:#}", err);
                }
            }
            Err(err) => error!("{:#}", err),
        }
    }
}
