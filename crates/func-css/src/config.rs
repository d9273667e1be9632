//! Configuration model and artifact generation.
//!
//! The engine never touches the filesystem. A caller loads the configuration
//! files into a [`Snapshot`], calls [`generate`], and decides where to write
//! the resulting [`Artifacts`] using [`FuncConfig::output_paths`].
//!
//! # Configuration shape
//!
//! ```yaml
//! files:
//!   classes: ./classes.yaml
//!   colors: ./colors.yaml
//! properties:
//!   color: "${name}-color"
//!   background-color: "bg-${name}"
//! states: [hover, focus]
//! output: dist/func.css
//! jsonOutput: dist/func.json
//! tokens: true
//! ```
//!
//! Keys are camelCase. Every key is optional.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::class::{render, PropertyAliases, Rule};
use crate::diagnostics::Diagnostic;
use crate::error::FuncError;
use crate::generator::{
    expand_classes_with, generate_class_rules, generate_props_with_diagnostics, ClassMap,
    Properties, PropertyMap,
};
use crate::palette::{parse_palette, RawColors};

pub const DEFAULT_STYLESHEET: &str = "func.css";
pub const DEFAULT_JSON: &str = "func.json";
pub const DEFAULT_TOKENS: &str = "func.tokens.json";
pub const DEFAULT_INDEX: &str = "func-index.json";

/// Paths to the class and color documents, relative to the main config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFiles {
    pub classes: Option<PathBuf>,
    pub colors: Option<PathBuf>,
}

/// The main configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FuncConfig {
    pub files: ConfigFiles,
    /// CSS property to class template for bulk color classes.
    pub properties: Properties,
    /// States appended to every bulk color class.
    pub states: Vec<String>,
    /// Replaces the default `bg`/`border` alias table when set.
    pub property_aliases: Option<IndexMap<String, String>>,
    pub output: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
    /// Emit the design-token file.
    pub tokens: bool,
    pub tokens_output: Option<PathBuf>,
    /// Emit the stylesheet index file.
    pub index: bool,
    pub index_output: Option<PathBuf>,
}

/// Where each artifact should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub stylesheet: PathBuf,
    pub json: PathBuf,
    pub tokens: Option<PathBuf>,
    pub index: Option<PathBuf>,
}

impl FuncConfig {
    /// Parses a YAML (or JSON) configuration document.
    pub fn from_yaml(source: &str) -> Result<Self, FuncError> {
        serde_yaml::from_str(source).map_err(|source| FuncError::Yaml {
            what: "configuration".to_string(),
            source,
        })
    }

    /// The alias table classes resolve their property through.
    pub fn aliases(&self) -> PropertyAliases {
        self.property_aliases
            .clone()
            .map(PropertyAliases::from)
            .unwrap_or_default()
    }

    /// Resolves output paths.
    ///
    /// Explicit paths are relative to `base_dir`. Secondary artifacts without
    /// an explicit path land next to the stylesheet.
    pub fn output_paths(&self, base_dir: &Path) -> OutputPaths {
        let stylesheet = base_dir.join(
            self.output
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_STYLESHEET)),
        );
        let target_dir = stylesheet.parent().unwrap_or(base_dir).to_path_buf();

        let resolve = |explicit: &Option<PathBuf>, default: &str| match explicit {
            Some(path) => base_dir.join(path),
            None => target_dir.join(default),
        };

        OutputPaths {
            json: resolve(&self.json_output, DEFAULT_JSON),
            tokens: (self.tokens || self.tokens_output.is_some())
                .then(|| resolve(&self.tokens_output, DEFAULT_TOKENS)),
            index: (self.index || self.index_output.is_some())
                .then(|| resolve(&self.index_output, DEFAULT_INDEX)),
            stylesheet,
        }
    }
}

/// A fully loaded configuration: the main document plus the documents its
/// `files` section points at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub config: FuncConfig,
    pub classes: Option<ClassMap>,
    pub colors: RawColors,
}

/// Everything one generation run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    /// Bulk color classes followed by expanded classes.
    pub stylesheet: String,
    /// Absent when the snapshot has no classes.
    pub props: Option<PropertyMap>,
    /// Color name to hex.
    pub tokens: IndexMap<String, String>,
    /// The rules behind `stylesheet`, in the same order.
    pub index: Vec<Rule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Artifacts {
    /// The property map as pretty JSON, if there is one.
    pub fn props_json(&self) -> Result<Option<String>, FuncError> {
        self.props
            .as_ref()
            .map(|props| to_json("property map", props))
            .transpose()
    }

    pub fn tokens_json(&self) -> Result<String, FuncError> {
        to_json("design tokens", &self.tokens)
    }

    pub fn index_json(&self) -> Result<String, FuncError> {
        to_json("stylesheet index", &self.index)
    }
}

fn to_json<T: Serialize + ?Sized>(what: &str, value: &T) -> Result<String, FuncError> {
    serde_json::to_string_pretty(value).map_err(|source| FuncError::Json {
        what: what.to_string(),
        source,
    })
}

/// Runs both engines over a snapshot.
///
/// Fails only if the palette is invalid; class problems are reported in
/// [`Artifacts::diagnostics`].
pub fn generate(snapshot: &Snapshot) -> Result<Artifacts, FuncError> {
    let config = &snapshot.config;
    let palette = parse_palette(&snapshot.colors)?;

    let mut index = Vec::new();
    let mut diagnostics = Vec::new();

    if !config.properties.is_empty() {
        index.extend(generate_class_rules(
            &palette,
            &config.properties,
            &config.states,
        ));
    }

    let props = match &snapshot.classes {
        Some(classes) => {
            let expansion = expand_classes_with(classes, &palette, &config.aliases());
            index.extend(expansion.rules);
            diagnostics.extend(expansion.diagnostics);

            let (props, missing) = generate_props_with_diagnostics(classes, &palette);
            diagnostics.extend(missing);
            Some(props)
        }
        None => None,
    };

    debug!(
        colors = palette.len(),
        rules = index.len(),
        diagnostics = diagnostics.len(),
        "generated artifacts"
    );

    Ok(Artifacts {
        stylesheet: render(&index),
        props,
        tokens: palette.tokens(),
        index,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(config: &str, classes: Option<&str>, colors: &str) -> Snapshot {
        Snapshot {
            config: FuncConfig::from_yaml(config).unwrap(),
            classes: classes.map(|c| serde_yaml::from_str(c).unwrap()),
            colors: serde_yaml::from_str(colors).unwrap(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    #[test]
    fn test_config_defaults() {
        let config = FuncConfig::from_yaml("{}").unwrap();
        assert_eq!(config, FuncConfig::default());
        assert_eq!(config.aliases(), PropertyAliases::default());
    }

    #[test]
    fn test_config_camel_case_keys() {
        let config = FuncConfig::from_yaml(
            "files: { classes: c.yaml, colors: k.json }\n\
             jsonOutput: out/props.json\n\
             propertyAliases: { fill: fill }\n\
             states: [hover]",
        )
        .unwrap();
        assert_eq!(config.files.classes, Some(PathBuf::from("c.yaml")));
        assert_eq!(config.json_output, Some(PathBuf::from("out/props.json")));
        assert_eq!(config.aliases().resolve("icon-fill"), "fill");
        assert_eq!(config.states, vec!["hover"]);
    }

    #[test]
    fn test_output_paths_default() {
        let paths = FuncConfig::default().output_paths(Path::new("/work"));
        assert_eq!(
            paths,
            OutputPaths {
                stylesheet: PathBuf::from("/work/func.css"),
                json: PathBuf::from("/work/func.json"),
                tokens: None,
                index: None,
            }
        );
    }

    #[test]
    fn test_output_paths_follow_stylesheet_dir() {
        let config = FuncConfig {
            output: Some("dist/styles.css".into()),
            tokens: true,
            index_output: Some("meta/index.json".into()),
            ..FuncConfig::default()
        };
        let paths = config.output_paths(Path::new("/work"));
        assert_eq!(paths.stylesheet, PathBuf::from("/work/dist/styles.css"));
        assert_eq!(paths.json, PathBuf::from("/work/dist/func.json"));
        assert_eq!(paths.tokens, Some(PathBuf::from("/work/dist/func.tokens.json")));
        assert_eq!(paths.index, Some(PathBuf::from("/work/meta/index.json")));
    }

    // =========================================================================
    // Generation
    // =========================================================================

    #[test]
    fn test_generate_bulk_then_expanded() {
        let artifacts = generate(&snapshot(
            "properties: { color: '${name}-color' }",
            Some("button: red"),
            "red: '#f00'",
        ))
        .unwrap();

        assert_eq!(
            artifacts.stylesheet,
            ".red-color { color: hsl(0, 100%, 50%) }\n.button { color: hsl(0, 100%, 50%) }"
        );
        assert_eq!(artifacts.index.len(), 2);
        assert_eq!(artifacts.props.unwrap()["button"], "#ff0000");
        assert_eq!(artifacts.tokens["red"], "#ff0000");
    }

    #[test]
    fn test_generate_without_classes_has_no_props() {
        let artifacts = generate(&snapshot("{}", None, "red: '#f00'")).unwrap();
        assert_eq!(artifacts.stylesheet, "");
        assert_eq!(artifacts.props, None);
        assert_eq!(artifacts.props_json().unwrap(), None);
    }

    #[test]
    fn test_generate_collects_diagnostics() {
        let artifacts = generate(&snapshot("{}", Some("button: brand"), "red: '#f00'")).unwrap();
        assert_eq!(artifacts.diagnostics.len(), 2);
        assert!(matches!(
            artifacts.diagnostics[0],
            Diagnostic::UnresolvedReference { .. }
        ));
        assert!(matches!(
            artifacts.diagnostics[1],
            Diagnostic::MissingPaletteReference { .. }
        ));
    }

    #[test]
    fn test_generate_fails_on_invalid_palette() {
        let result = generate(&snapshot(
            "{}",
            None,
            "gray: { hue: 0, saturation: 0, lightness: 0 }",
        ));
        assert!(matches!(result, Err(FuncError::Color(_))));
    }

    #[test]
    fn test_json_helpers() {
        let artifacts = generate(&snapshot("{}", Some("button: red"), "red: '#f00'")).unwrap();
        assert_eq!(
            artifacts.tokens_json().unwrap(),
            "{\n  \"red\": \"#ff0000\"\n}"
        );
        assert_eq!(
            artifacts.props_json().unwrap().unwrap(),
            "{\n  \"button\": \"#ff0000\",\n  \"red\": \"#ff0000\"\n}"
        );
        let index: serde_json::Value =
            serde_json::from_str(&artifacts.index_json().unwrap()).unwrap();
        assert_eq!(index[0]["selector"], ".button");
        assert_eq!(index[0]["props"][0]["property"], "color");
    }
}
