//! Writing generated artifacts to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use func_css::{Artifacts, OutputPaths};
use tracing::info;

/// Writes every artifact that has a destination and returns the written paths.
///
/// The property JSON is skipped when `write_json` is false or the snapshot had
/// no classes.
pub fn write_artifacts(
    artifacts: &Artifacts,
    paths: &OutputPaths,
    write_json: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    save(&paths.stylesheet, &artifacts.stylesheet)?;
    info!(path = %paths.stylesheet.display(), "stylesheet saved");
    written.push(paths.stylesheet.clone());

    if write_json {
        if let Some(json) = artifacts.props_json()? {
            save(&paths.json, &json)?;
            info!(path = %paths.json.display(), "JSON saved");
            written.push(paths.json.clone());
        }
    }

    if let Some(path) = &paths.tokens {
        save(path, &artifacts.tokens_json()?)?;
        info!(path = %path.display(), "tokens saved");
        written.push(path.clone());
    }

    if let Some(path) = &paths.index {
        save(path, &artifacts.index_json()?)?;
        info!(path = %path.display(), "index saved");
        written.push(path.clone());
    }

    Ok(written)
}

fn save(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
