//! Error types for palette parsing and artifact generation.
//!
//! Palette errors are fatal: [`parse_palette`](crate::parse_palette) either
//! returns a complete palette or one of these. Non-fatal findings from class
//! expansion are reported as [`Diagnostic`](crate::Diagnostic)s instead.

/// Errors raised while normalizing a color declaration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// A CSS color string could not be parsed.
    #[error("Invalid color '{name}': cannot parse '{value}' ({reason})")]
    InvalidColor {
        name: String,
        value: String,
        reason: String,
    },

    /// The channel keys do not form a known color model.
    #[error("Invalid color model for '{name}': unrecognized channel keys [{}]", .keys.join(", "))]
    InvalidColorModel { name: String, keys: Vec<String> },

    /// An explicit hue of 0 was given for pure black or pure white.
    #[error("Invalid hue for '{name}': hue 0 is ambiguous on pure black or white")]
    InvalidHue { name: String },

    /// A channel value is not a finite number or is out of range.
    #[error("Invalid channel '{channel}' for '{name}': '{value}' {reason}")]
    InvalidChannel {
        name: String,
        channel: String,
        value: String,
        reason: String,
    },

    /// A `shades`/`tints` directive is malformed.
    #[error("Invalid '{directive}' directive for '{name}': {reason}")]
    InvalidMixture {
        name: String,
        directive: String,
        reason: String,
    },

    /// A `shades`/`tints` directive asks for more stops than there are stop names.
    #[error("Too many stops for '{directive}' on '{name}': {stops} requested, at most {max}")]
    TooManyStops {
        name: String,
        directive: String,
        stops: u64,
        max: usize,
    },
}

impl ColorError {
    /// The palette key the error refers to.
    pub fn name(&self) -> &str {
        match self {
            ColorError::InvalidColor { name, .. }
            | ColorError::InvalidColorModel { name, .. }
            | ColorError::InvalidHue { name }
            | ColorError::InvalidChannel { name, .. }
            | ColorError::InvalidMixture { name, .. }
            | ColorError::TooManyStops { name, .. } => name,
        }
    }

    pub(crate) fn channel(
        name: &str,
        channel: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ColorError::InvalidChannel {
            name: name.to_string(),
            channel: channel.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning a configuration snapshot into artifacts.
#[derive(Debug, thiserror::Error)]
pub enum FuncError {
    #[error(transparent)]
    Color(#[from] ColorError),

    /// A YAML document could not be deserialized.
    #[error("Failed to parse {what}: {source}")]
    Yaml {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An artifact could not be serialized to JSON.
    #[error("Failed to serialize {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_model_error_lists_keys() {
        let err = ColorError::InvalidColorModel {
            name: "brand".into(),
            keys: vec!["x".into(), "y".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid color model for 'brand': unrecognized channel keys [x, y]"
        );
        assert_eq!(err.name(), "brand");
    }

    #[test]
    fn test_func_error_wraps_color_error() {
        let err: FuncError = ColorError::InvalidHue {
            name: "gray".into(),
        }
        .into();
        assert!(err.to_string().contains("'gray'"));
    }
}
