//! Color values, CSS color parsing, and channel-mapping color models.
//!
//! - [`Color`]: the normalized color value with hex, HSL and RGB projections
//! - [`Color::parse`]: CSS color strings
//! - [`from_channels`]: mappings such as `{hue: 210, s: 65%, l: 40}`

mod model;
mod named;
mod parse;
mod value;

pub use model::{from_channels, Channel, ColorModel};
pub use parse::is_color;
pub use value::Color;
pub(crate) use value::format_number;
