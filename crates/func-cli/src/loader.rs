//! Loading configuration files into a [`Snapshot`].
//!
//! Every call reads the files from disk again; nothing is cached, so a reload
//! after a change always sees the latest contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use func_css::{ClassMap, FuncConfig, OutputPaths, RawColors, Snapshot};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cli::Args;
use crate::watch::modified;

/// Candidate configuration filenames, in search order.
pub const CONFIG_FILENAMES: &[&str] = &[
    ".funcrc",
    ".funcrc.json",
    ".funcrc.yaml",
    ".funcrc.yml",
    "func.config.json",
    "func.config.yaml",
    "func.config.yml",
];

const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// A loaded snapshot plus what the caller needs to write and watch it.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub snapshot: Snapshot,
    pub paths: OutputPaths,
    /// The main config file followed by the files it references, each with
    /// the modification time observed just before it was read.
    pub watched: Vec<(PathBuf, Option<SystemTime>)>,
}

/// Returns the first candidate config file present in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Reads a JSON or YAML document, chosen by extension.
///
/// `.json` files are parsed as JSON; everything else as YAML.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&source).with_context(|| format!("failed to parse {}", path.display()))
    } else {
        serde_yaml::from_str(&source).with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Locates and loads the configuration, applying command-line overrides.
///
/// Relative paths in `files` resolve against the config file's directory;
/// output paths resolve against `cwd`.
pub fn load(args: &Args, cwd: &Path) -> Result<Loaded> {
    let config_path = match &args.config {
        Some(path) => {
            let has_valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if !has_valid_extension {
                bail!("Config filename must have a .json, .yaml, or .yml extension");
            }
            cwd.join(path)
        }
        None => match find_config(cwd) {
            Some(path) => path,
            None => bail!(
                "No configuration found in {}. Create one of {} or pass --config",
                cwd.display(),
                CONFIG_FILENAMES.join(", ")
            ),
        },
    };
    debug!(path = %config_path.display(), "loading configuration");

    let mut watched = vec![stamp(&config_path)];
    let mut config: FuncConfig = read_document(&config_path)?;
    args.apply_overrides(&mut config);

    let config_dir = config_path.parent().unwrap_or(cwd).to_path_buf();

    let classes: Option<ClassMap> = match &config.files.classes {
        Some(path) => {
            let path = config_dir.join(path);
            watched.push(stamp(&path));
            let classes = read_document(&path)?;
            Some(classes)
        }
        None => None,
    };

    let colors: RawColors = match &config.files.colors {
        Some(path) => {
            let path = config_dir.join(path);
            watched.push(stamp(&path));
            let colors = read_document(&path)?;
            colors
        }
        None => {
            warn!("no colors file configured, palette is empty");
            RawColors::default()
        }
    };

    let paths = config.output_paths(cwd);
    Ok(Loaded {
        snapshot: Snapshot {
            config,
            classes,
            colors,
        },
        paths,
        watched,
    })
}

fn stamp(path: &Path) -> (PathBuf, Option<SystemTime>) {
    (path.to_path_buf(), modified(path))
}
