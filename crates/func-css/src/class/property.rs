//! Mapping class names to the CSS property they set.

use indexmap::IndexMap;

/// Property used when no alias matches.
pub const FALLBACK_PROPERTY: &str = "color";

/// An ordered table of class-name fragments to CSS properties.
///
/// A class name resolves to the property of the first alias it contains, so
/// `button-bg-hover` resolves through `bg` to `background-color`. Order
/// matters when aliases overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAliases {
    aliases: Vec<(String, String)>,
}

impl PropertyAliases {
    /// An empty table: every class resolves to `color`.
    pub fn empty() -> Self {
        Self {
            aliases: Vec::new(),
        }
    }

    /// Appends an alias.
    pub fn alias(mut self, fragment: impl Into<String>, property: impl Into<String>) -> Self {
        self.aliases.push((fragment.into(), property.into()));
        self
    }

    /// Resolves the property a class sets.
    ///
    /// ```rust
    /// use func_css::PropertyAliases;
    ///
    /// let aliases = PropertyAliases::default();
    /// assert_eq!(aliases.resolve("button-bg"), "background-color");
    /// assert_eq!(aliases.resolve("input-border-focus"), "border-color");
    /// assert_eq!(aliases.resolve("title"), "color");
    /// ```
    pub fn resolve(&self, class_name: &str) -> &str {
        self.aliases
            .iter()
            .find(|(fragment, _)| class_name.contains(fragment.as_str()))
            .map(|(_, property)| property.as_str())
            .unwrap_or(FALLBACK_PROPERTY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(fragment, property)| (fragment.as_str(), property.as_str()))
    }
}

impl Default for PropertyAliases {
    fn default() -> Self {
        Self::empty()
            .alias("bg", "background-color")
            .alias("border", "border-color")
    }
}

impl From<IndexMap<String, String>> for PropertyAliases {
    fn from(map: IndexMap<String, String>) -> Self {
        Self {
            aliases: map.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aliases() {
        let aliases = PropertyAliases::default();
        assert_eq!(aliases.resolve("bg-primary"), "background-color");
        assert_eq!(aliases.resolve("border"), "border-color");
        assert_eq!(aliases.resolve("link"), "color");
    }

    #[test]
    fn test_first_match_wins() {
        let aliases = PropertyAliases::default();
        assert_eq!(aliases.resolve("border-bg"), "background-color");
    }

    #[test]
    fn test_override_from_map() {
        let mut map = IndexMap::new();
        map.insert("fill".to_string(), "fill".to_string());
        map.insert("bg".to_string(), "background".to_string());
        let aliases = PropertyAliases::from(map);

        assert_eq!(aliases.resolve("icon-fill"), "fill");
        assert_eq!(aliases.resolve("card-bg"), "background");
        assert_eq!(aliases.resolve("card-border"), "color");
        assert_eq!(aliases.iter().count(), 2);
    }
}
