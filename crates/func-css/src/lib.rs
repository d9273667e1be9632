//! # func-css - Functional CSS Color Generation
//!
//! `func-css` turns a declarative palette and a compact class shorthand into
//! stylesheet text, a flat property map and design tokens.
//!
//! ## Core Concepts
//!
//! - [`Color`]: normalized color with hex, HSL and RGB projections
//! - [`Palette`]: color name to [`ColorEntry`], including derived tint and
//!   shade ramps
//! - Class shorthand: `reference [adjuster] [states...]`, e.g.
//!   `white a(0.8) :hover *:focus`
//! - [`Rule`]: a flat `selector { property: value }` rule
//! - [`generate`]: runs everything over a loaded configuration [`Snapshot`]
//!
//! ## Quick Start
//!
//! ```rust
//! use func_css::{expand_classes, generate_props, parse_palette, ClassMap, RawColors};
//!
//! let colors: RawColors = serde_yaml::from_str(r##"
//! white: "#fff"
//! brand: { hue: 210, saturation: 65, lightness: 40, shades: 1 }
//! "##).unwrap();
//! let palette = parse_palette(&colors).unwrap();
//!
//! let classes: ClassMap = serde_yaml::from_str(r#"
//! button: white
//! button-bg: dark-brand
//! button-bg-hover: brand :hover
//! "#).unwrap();
//!
//! let css = expand_classes(&classes, &palette);
//! assert!(css.starts_with(".button { color: hsl(0, 0%, 100%) }"));
//! assert!(css.contains(".button-bg-hover:hover { background-color:"));
//!
//! let props = generate_props(&classes, &palette);
//! assert_eq!(props["button"], "#ffffff");
//! ```
//!
//! ## Palettes
//!
//! Colors are CSS strings or channel mappings in HSL, HSV/HSB or RGB, with
//! terse (`h`, `s`, `l`) or verbose (`hue`, `saturation`, `lightness`) keys.
//! `shades` and `tints` directives add up to six stops each, named
//! `dark-{name}`, `darker-{name}`, ... and `light-{name}`, `lighter-{name}`, ...
//!
//! ## Class Shorthand
//!
//! | Token           | Meaning                                    |
//! |-----------------|--------------------------------------------|
//! | `red`           | palette color, or any CSS value verbatim   |
//! | `a(0.5)`        | set alpha (`alpha()`, `opacity()` too)     |
//! | `:hover`        | same-element state                         |
//! | `&:hover`       | nested state, `&` dropped                  |
//! | `*:hover`       | descendant state                           |
//! | `::placeholder` | pseudo-element                             |
//!
//! A declaration mentioning `hover` or `focus` gets no unconditional base
//! rule. The CSS property comes from the class name: `bg` selects
//! `background-color`, `border` selects `border-color`, anything else
//! `color` (see [`PropertyAliases`]).
//!
//! ## Logging
//!
//! The crate logs through `tracing`: warnings for unresolved class references
//! and other [`Diagnostic`]s, debug events for counts. Install a subscriber to
//! see them.

pub mod class;
pub mod color;
pub mod colorspace;
pub mod config;
mod diagnostics;
mod error;
pub mod generator;
pub mod palette;
mod util;

pub use class::{Adjuster, Declaration, Property, PropertyAliases, Rule, StateModifier};
pub use color::{from_channels, is_color, Channel, Color, ColorModel};
pub use colorspace::{mix, mix_with, MixMode};
pub use config::{generate, Artifacts, ConfigFiles, FuncConfig, OutputPaths, Snapshot};
pub use diagnostics::Diagnostic;
pub use error::{ColorError, FuncError};
pub use generator::{
    expand_classes, expand_classes_with, generate_class_rules, generate_classes, generate_props,
    generate_props_with_diagnostics, ClassMap, Expansion, Properties, PropertyMap,
};
pub use palette::{
    parse_palette, ColorEntry, Mixture, MixtureMethod, Palette, RawColorSpec, RawColors,
};
pub use util::{camel_case, kebab_case, words};
