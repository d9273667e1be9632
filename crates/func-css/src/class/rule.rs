//! Emitted CSS rules.

use std::fmt;

use serde::Serialize;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub property: String,
    pub value: String,
}

/// A flat CSS rule: one selector and its declarations.
///
/// Serializes as `{"selector": ..., "props": [{"property": ..., "value": ...}]}`,
/// the shape of the stylesheet index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub selector: String,
    #[serde(rename = "props")]
    pub declarations: Vec<Property>,
}

impl Rule {
    /// A rule with a single declaration.
    pub fn new(
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            declarations: vec![Property {
                property: property.into(),
                value: value.into(),
            }],
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.selector)?;
        for (i, decl) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", decl.property, decl.value)?;
        }
        f.write_str(" }")
    }
}

/// Renders rules one per line.
pub fn render(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(Rule::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
