//! # func-cli - the `func` command
//!
//! Loads a func configuration, runs the `func-css` engines over it and writes
//! the results:
//!
//! - `func.css`: bulk color classes and expanded classes
//! - `func.json`: camelCase class and color names to hex (when classes exist)
//! - `func.tokens.json`: color name to hex (with `--tokens` or `tokens: true`)
//! - `func-index.json`: selectors and their properties (with `--index` or `index: true`)
//!
//! With `--watch` the configuration files are polled and everything is
//! regenerated on change.

pub mod cli;
pub mod loader;
pub mod output;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub use cli::Args;
pub use loader::{load, Loaded};
pub use output::write_artifacts;
pub use watch::{watch, Watcher};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags pick the level.
pub fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Loads the configuration, generates, and writes. Returns the written paths.
pub fn run(args: &Args, cwd: &Path) -> Result<Vec<PathBuf>> {
    let loaded = load(args, cwd)?;
    run_loaded(args, &loaded)
}

/// Generates and writes an already loaded snapshot.
pub fn run_loaded(args: &Args, loaded: &Loaded) -> Result<Vec<PathBuf>> {
    let artifacts =
        func_css::generate(&loaded.snapshot).context("failed to generate stylesheet")?;

    if !artifacts.diagnostics.is_empty() {
        info!(
            count = artifacts.diagnostics.len(),
            "generated with warnings"
        );
    }

    write_artifacts(&artifacts, &loaded.paths, !args.no_json)
}
