//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use func_css::FuncConfig;

/// Generate functional color classes, property maps and design tokens.
///
/// Configuration is read from `--config`, or from the first of `.funcrc`,
/// `.funcrc.json`, `.funcrc.yaml`, `.funcrc.yml`, `func.config.json`,
/// `func.config.yaml` or `func.config.yml` in the current directory.
#[derive(Debug, Clone, Parser)]
#[command(name = "func", version)]
pub struct Args {
    /// Configuration file (.json, .yaml or .yml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Filepath for the generated stylesheet
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Filepath for the generated property JSON
    #[arg(long, value_name = "PATH")]
    pub json_output: Option<PathBuf>,

    /// Skip writing the property JSON
    #[arg(long)]
    pub no_json: bool,

    /// Write design tokens (color name to hex)
    #[arg(long)]
    pub tokens: bool,

    /// Filepath for the design tokens; implies --tokens
    #[arg(long, value_name = "PATH")]
    pub tokens_output: Option<PathBuf>,

    /// Write the stylesheet index (selectors and their properties)
    #[arg(long)]
    pub index: bool,

    /// Filepath for the stylesheet index; implies --index
    #[arg(long, value_name = "PATH")]
    pub index_output: Option<PathBuf>,

    /// Watch configuration files and regenerate on change
    #[arg(short, long)]
    pub watch: bool,

    /// Polling interval for --watch, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub interval: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Flags win over values from the configuration file.
    pub fn apply_overrides(&self, config: &mut FuncConfig) {
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(json_output) = &self.json_output {
            config.json_output = Some(json_output.clone());
        }
        if let Some(tokens_output) = &self.tokens_output {
            config.tokens_output = Some(tokens_output.clone());
        }
        if let Some(index_output) = &self.index_output {
            config.index_output = Some(index_output.clone());
        }
        config.tokens |= self.tokens;
        config.index |= self.index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["func"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.interval, 500);
        assert!(!args.watch);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "func",
            "-o",
            "dist/app.css",
            "--tokens",
            "--index-output",
            "meta.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);

        let mut config = FuncConfig {
            output: Some("func.css".into()),
            json_output: Some("props.json".into()),
            ..FuncConfig::default()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.output, Some(PathBuf::from("dist/app.css")));
        assert_eq!(config.json_output, Some(PathBuf::from("props.json")));
        assert!(config.tokens);
        assert!(!config.index);
        assert_eq!(config.index_output, Some(PathBuf::from("meta.json")));
    }
}
