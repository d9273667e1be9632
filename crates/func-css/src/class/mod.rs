//! Class shorthand parsing and the rules it produces.

mod declaration;
mod property;
mod rule;

pub use declaration::{Adjuster, Declaration, StateModifier};
pub use property::{PropertyAliases, FALLBACK_PROPERTY};
pub use rule::{render, Property, Rule};
