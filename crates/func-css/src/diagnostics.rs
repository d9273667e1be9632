//! Non-fatal findings reported while expanding classes.
//!
//! None of these stop generation. The generator logs each one through
//! `tracing` as it is found and also returns them, so callers can surface or
//! assert on them without installing a subscriber.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A class references something that is neither a palette color nor a
    /// CSS value; it was emitted verbatim.
    #[error("Class '{class}': '{reference}' is not a palette color, passing it through")]
    UnresolvedReference { class: String, reference: String },

    /// A property map entry was skipped because its color is not in the palette.
    #[error("Class '{class}': '{reference}' is not a palette color, skipping")]
    MissingPaletteReference { class: String, reference: String },

    /// An adjuster token could not be parsed and was ignored.
    #[error("Class '{class}': malformed adjuster '{token}' ({reason})")]
    MalformedAdjuster {
        class: String,
        token: String,
        reason: String,
    },

    /// An adjuster with an unknown name was ignored.
    #[error("Class '{class}': unknown adjuster '{name}'")]
    UnknownAdjuster { class: String, name: String },

    /// A second adjuster was found; only the first one applies.
    #[error("Class '{class}': extra adjuster '{token}' ignored")]
    ExtraAdjuster { class: String, token: String },

    /// The declaration has no color reference.
    #[error("Class '{class}': empty declaration")]
    EmptyDeclaration { class: String },
}

impl Diagnostic {
    /// The class the finding belongs to.
    pub fn class(&self) -> &str {
        match self {
            Diagnostic::UnresolvedReference { class, .. }
            | Diagnostic::MissingPaletteReference { class, .. }
            | Diagnostic::MalformedAdjuster { class, .. }
            | Diagnostic::UnknownAdjuster { class, .. }
            | Diagnostic::ExtraAdjuster { class, .. }
            | Diagnostic::EmptyDeclaration { class } => class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_kind_tag() {
        let diagnostic = Diagnostic::UnknownAdjuster {
            class: "button".into(),
            name: "blur".into(),
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "unknownAdjuster");
        assert_eq!(json["name"], "blur");
        assert_eq!(diagnostic.class(), "button");
    }
}
