//! Class expansion: palette plus class shorthand to CSS rules and property maps.
//!
//! Three entry points, all pure functions of their arguments:
//!
//! - [`expand_classes`] turns `class → shorthand` declarations into rules
//! - [`generate_classes`] emits one class per palette color per property
//!   template, e.g. `${name}-color` → `.red-color`, `.blue-color`
//! - [`generate_props`] flattens classes and colors into a `camelCase → hex`
//!   map for consumption from JavaScript
//!
//! Output order always follows the input maps' key order.
//!
//! # Example
//!
//! ```rust
//! use func_css::{expand_classes, ClassMap, Palette};
//!
//! let palette = Palette::from_yaml("red: '#ff0000'").unwrap();
//! let mut classes = ClassMap::new();
//! classes.insert("button".into(), "red".into());
//! classes.insert("button-bg-hover".into(), "red a(0.5) :hover".into());
//!
//! assert_eq!(
//!     expand_classes(&classes, &palette),
//!     ".button { color: hsl(0, 100%, 50%) }\n\
//!      .button-bg-hover:hover { background-color: hsla(0, 100%, 50%, 0.5) }"
//! );
//! ```

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::class::{render, Declaration, PropertyAliases, Rule};
use crate::color::is_color;
use crate::diagnostics::Diagnostic;
use crate::palette::Palette;
use crate::util::{camel_case, kebab_case};

/// Class name to shorthand declaration.
pub type ClassMap = IndexMap<String, String>;

/// CSS property to class-name template.
pub type Properties = IndexMap<String, String>;

/// Flat `camelCase` name to color value map.
pub type PropertyMap = IndexMap<String, String>;

/// Replaced by the kebab-cased color name in a class template.
pub const NAME_PLACEHOLDER: &str = "${name}";

/// Values that are valid CSS for any color property.
const CSS_WIDE_KEYWORDS: &[&str] = &[
    "currentcolor",
    "inherit",
    "initial",
    "unset",
    "revert",
    "revert-layer",
    "transparent",
];

/// The result of expanding class declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub rules: Vec<Rule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    /// Renders the rules one per line.
    pub fn to_css(&self) -> String {
        render(&self.rules)
    }
}

/// Expands class declarations with the default property aliases.
pub fn expand_classes(classes: &ClassMap, palette: &Palette) -> String {
    expand_classes_with(classes, palette, &PropertyAliases::default()).to_css()
}

/// Expands class declarations into rules, collecting diagnostics.
///
/// Each class yields a base rule `.{class} { property: value }` unless its
/// declaration mentions `hover` or `focus`, followed by one rule per state
/// modifier. Palette references render as `hsl()`/`hsla()`; anything else is
/// passed through verbatim.
pub fn expand_classes_with(
    classes: &ClassMap,
    palette: &Palette,
    aliases: &PropertyAliases,
) -> Expansion {
    let mut expansion = Expansion::default();

    for (class, raw) in classes {
        let mut found = Vec::new();

        if let Some(decl) = Declaration::parse(class, raw, &mut found) {
            let property = aliases.resolve(class);
            let value = resolve_value(class, &decl, palette, &mut found);
            let selector = format!(".{}", class);

            if !decl.interactive {
                expansion
                    .rules
                    .push(Rule::new(selector.as_str(), property, value.as_str()));
            }
            for state in &decl.states {
                expansion.rules.push(Rule::new(
                    format!("{}{}", selector, state.selector_suffix()),
                    property,
                    value.as_str(),
                ));
            }
        }

        report(&found);
        expansion.diagnostics.extend(found);
    }

    debug!(
        classes = classes.len(),
        rules = expansion.rules.len(),
        "expanded classes"
    );
    expansion
}

fn resolve_value(
    class: &str,
    decl: &Declaration,
    palette: &Palette,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    if let Some(entry) = palette.get(&decl.reference) {
        let color = match &decl.adjuster {
            Some(adjuster) => adjuster.apply(entry.color),
            None => entry.color,
        };
        return color.css_hsl();
    }

    if is_css_value(&decl.reference) {
        debug!(class, value = %decl.reference, "passing through css value");
    } else {
        diagnostics.push(Diagnostic::UnresolvedReference {
            class: class.to_string(),
            reference: decl.reference.clone(),
        });
    }
    decl.reference.clone()
}

/// True for CSS-wide keywords, `var()` references and color literals.
fn is_css_value(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    CSS_WIDE_KEYWORDS.contains(&lower.as_str()) || lower.starts_with("var(") || is_color(value)
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        warn!(class = diagnostic.class(), "{}", diagnostic);
    }
}

/// Emits a class per palette color per property template.
///
/// Every rule gets a `.{class}:{state}` sibling for each state.
pub fn generate_class_rules(
    palette: &Palette,
    properties: &Properties,
    states: &[String],
) -> Vec<Rule> {
    let mut rules = Vec::with_capacity(palette.len() * properties.len() * (states.len() + 1));

    for (name, entry) in palette.iter() {
        let color_name = kebab_case(name);
        for (property, template) in properties {
            let class = template.replacen(NAME_PLACEHOLDER, &color_name, 1);
            rules.push(Rule::new(
                format!(".{}", class),
                property.as_str(),
                entry.hsl_css.as_str(),
            ));
            for state in states {
                rules.push(Rule::new(
                    format!(".{}:{}", class, state),
                    property.as_str(),
                    entry.hsl_css.as_str(),
                ));
            }
        }
    }

    debug!(rules = rules.len(), "generated color classes");
    rules
}

/// [`generate_class_rules`], rendered one rule per line.
pub fn generate_classes(palette: &Palette, properties: &Properties, states: &[String]) -> String {
    render(&generate_class_rules(palette, properties, states))
}

/// Builds the flat property map for classes and colors.
///
/// Class keys come first, then color keys. A color key equal to a class key
/// overrides its value in place.
pub fn generate_props(classes: &ClassMap, palette: &Palette) -> PropertyMap {
    generate_props_with_diagnostics(classes, palette).0
}

/// [`generate_props`], also returning the classes that were skipped.
///
/// Only [`Diagnostic::MissingPaletteReference`] is reported here; adjuster
/// problems surface through [`expand_classes_with`].
pub fn generate_props_with_diagnostics(
    classes: &ClassMap,
    palette: &Palette,
) -> (PropertyMap, Vec<Diagnostic>) {
    let mut props = PropertyMap::new();
    let mut diagnostics = Vec::new();

    for (class, raw) in classes {
        let Some(decl) = Declaration::parse(class, raw, &mut Vec::new()) else {
            continue;
        };

        let Some(entry) = palette.get(&decl.reference) else {
            debug!(
                class = %class,
                reference = %decl.reference,
                "skipping class without palette color"
            );
            diagnostics.push(Diagnostic::MissingPaletteReference {
                class: class.clone(),
                reference: decl.reference,
            });
            continue;
        };

        let color = match &decl.adjuster {
            Some(adjuster) => adjuster.apply(entry.color),
            None => entry.color,
        };
        let value = if color.is_opaque() {
            color.hex()
        } else {
            color.css_rgb()
        };
        props.insert(camel_case(class), value);
    }

    for (name, entry) in palette.iter() {
        props.insert(camel_case(name), entry.color.hex());
    }

    (props, diagnostics)
}
