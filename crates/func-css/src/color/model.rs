//! Color declarations written as channel mappings.
//!
//! A palette entry can describe a color as a mapping of channel keys instead
//! of a CSS string:
//!
//! ```yaml
//! brand:   { hue: 210, saturation: 65%, lightness: 40 }
//! accent:  { h: 30, s: 1, b: 0.9 }
//! overlay: { r: 0, g: 0, b: 0, alpha: 50% }
//! ```
//!
//! The set of keys picks the model. Each model has a fixed vocabulary of
//! terse and verbose aliases, so recognition is an explicit lookup rather
//! than a guess: a key set that does not map cleanly onto exactly one model
//! is rejected.
//!
//! # Value normalization
//!
//! Saturation, lightness, value and alpha are unit-interval channels. They
//! accept `0.5`, `50` and `"50%"` as the same amount: percentages and numbers
//! greater than 1 are divided by 100, numbers in `[0, 1]` pass through.
//! RGB channels are `0..=255`, or percentages of 255. Hue is in degrees.

use serde_yaml::Value;

use super::Color;
use crate::error::ColorError;

/// The color models a channel mapping can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    Rgb,
    Hsl,
    /// Hue, saturation, value. HSB keys normalize to this model.
    Hsv,
}

/// The role a channel key plays within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Hue,
    Saturation,
    Lightness,
    Value,
    Red,
    Green,
    Blue,
    Alpha,
}

impl ColorModel {
    const ALL: [ColorModel; 3] = [ColorModel::Hsl, ColorModel::Hsv, ColorModel::Rgb];

    /// Maps a channel key onto its role in this model.
    pub fn channel(self, key: &str) -> Option<Channel> {
        use ColorModel::*;

        let key = key.to_ascii_lowercase();
        let channel = match (self, key.as_str()) {
            (_, "a" | "alpha") => Channel::Alpha,
            (Hsl | Hsv, "h" | "hue") => Channel::Hue,
            (Hsl | Hsv, "s" | "saturation") => Channel::Saturation,
            (Hsl, "l" | "lightness") => Channel::Lightness,
            (Hsv, "v" | "value" | "b" | "brightness") => Channel::Value,
            (Rgb, "r" | "red") => Channel::Red,
            (Rgb, "g" | "green") => Channel::Green,
            (Rgb, "b" | "blue") => Channel::Blue,
            _ => return None,
        };
        Some(channel)
    }

    /// Channels that must be present for this model.
    pub fn required(self) -> &'static [Channel] {
        match self {
            ColorModel::Rgb => &[Channel::Red, Channel::Green, Channel::Blue],
            ColorModel::Hsl => &[Channel::Hue, Channel::Saturation, Channel::Lightness],
            ColorModel::Hsv => &[Channel::Hue, Channel::Saturation, Channel::Value],
        }
    }

    /// Finds the model whose vocabulary covers every key exactly once.
    ///
    /// ```rust
    /// use func_css::ColorModel;
    ///
    /// assert_eq!(ColorModel::recognize(&["hue", "s", "l"]), Some(ColorModel::Hsl));
    /// assert_eq!(ColorModel::recognize(&["h", "s", "brightness"]), Some(ColorModel::Hsv));
    /// assert_eq!(ColorModel::recognize(&["r", "g", "b", "a"]), Some(ColorModel::Rgb));
    /// assert_eq!(ColorModel::recognize(&["h", "s"]), None);
    /// ```
    pub fn recognize(keys: &[&str]) -> Option<ColorModel> {
        Self::ALL
            .into_iter()
            .find(|model| model.assign(keys).is_some())
    }

    fn assign(self, keys: &[&str]) -> Option<Vec<Channel>> {
        let mut roles: Vec<Channel> = Vec::with_capacity(keys.len());
        for key in keys {
            let channel = self.channel(key)?;
            if roles.contains(&channel) {
                return None;
            }
            roles.push(channel);
        }

        self.required()
            .iter()
            .all(|required| roles.contains(required))
            .then_some(roles)
    }
}

/// Builds a color from channel key/value pairs.
///
/// `name` is the palette key, used for error reporting.
pub fn from_channels(name: &str, channels: &[(&str, &Value)]) -> Result<Color, ColorError> {
    let keys: Vec<&str> = channels.iter().map(|(key, _)| *key).collect();
    let (model, roles) = ColorModel::ALL
        .into_iter()
        .find_map(|model| model.assign(&keys).map(|roles| (model, roles)))
        .ok_or_else(|| ColorError::InvalidColorModel {
            name: name.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        })?;

    let mut values = Channels::default();
    for (channel, (key, value)) in roles.into_iter().zip(channels) {
        let number = read_number(name, key, value)?;
        let normalized = match channel {
            Channel::Hue => {
                if number.percent {
                    return Err(ColorError::channel(
                        name,
                        key,
                        describe(value),
                        "hue must be in degrees",
                    ));
                }
                number.value
            }
            Channel::Red | Channel::Green | Channel::Blue => {
                let byte = if number.percent {
                    number.value * 2.55
                } else {
                    number.value
                };
                if !(0.0..=255.0).contains(&byte) {
                    return Err(ColorError::channel(
                        name,
                        key,
                        describe(value),
                        "must be between 0 and 255",
                    ));
                }
                byte
            }
            Channel::Saturation | Channel::Lightness | Channel::Value | Channel::Alpha => {
                let unit = if number.percent || number.value > 1.0 {
                    number.value / 100.0
                } else {
                    number.value
                };
                if !(0.0..=1.0).contains(&unit) {
                    return Err(ColorError::channel(
                        name,
                        key,
                        describe(value),
                        "must be between 0 and 1 or 0% and 100%",
                    ));
                }
                unit
            }
        };
        values.set(channel, normalized);
    }

    let color = match model {
        ColorModel::Rgb => Color::from_rgb(values.red, values.green, values.blue),
        ColorModel::Hsl => {
            reject_ambiguous_hue(name, &values, values.lightness)?;
            Color::from_hsl(values.hue, values.saturation, values.lightness)
        }
        ColorModel::Hsv => {
            reject_ambiguous_hue(name, &values, values.value)?;
            Color::from_hsv(values.hue, values.saturation, values.value)
        }
    };

    Ok(color.with_alpha(values.alpha))
}

/// Hue 0 with zero saturation on pure black or white is rejected.
fn reject_ambiguous_hue(name: &str, values: &Channels, level: f64) -> Result<(), ColorError> {
    if values.hue == 0.0 && values.saturation == 0.0 && (level == 0.0 || level == 1.0) {
        return Err(ColorError::InvalidHue {
            name: name.to_string(),
        });
    }
    Ok(())
}

struct Channels {
    hue: f64,
    saturation: f64,
    lightness: f64,
    value: f64,
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            lightness: 0.0,
            value: 0.0,
            red: 0.0,
            green: 0.0,
            blue: 0.0,
            alpha: 1.0,
        }
    }
}

impl Channels {
    fn set(&mut self, channel: Channel, value: f64) {
        let slot = match channel {
            Channel::Hue => &mut self.hue,
            Channel::Saturation => &mut self.saturation,
            Channel::Lightness => &mut self.lightness,
            Channel::Value => &mut self.value,
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
            Channel::Alpha => &mut self.alpha,
        };
        *slot = value;
    }
}

struct Number {
    value: f64,
    percent: bool,
}

fn read_number(name: &str, key: &str, value: &Value) -> Result<Number, ColorError> {
    let number = match value {
        Value::Number(n) => n.as_f64().map(|value| Number {
            value,
            percent: false,
        }),
        Value::String(s) => {
            let trimmed = s.trim();
            let (digits, percent) = match trimmed.strip_suffix('%') {
                Some(digits) => (digits.trim_end(), true),
                None => (trimmed, false),
            };
            digits.parse::<f64>().ok().map(|value| Number { value, percent })
        }
        _ => None,
    };

    match number {
        Some(number) if number.value.is_finite() => Ok(number),
        Some(_) => Err(ColorError::channel(name, key, describe(value), "is not finite")),
        None => Err(ColorError::channel(name, key, describe(value), "is not a number")),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) => "<sequence>".to_string(),
        Value::Mapping(_) => "<mapping>".to_string(),
        Value::Tagged(tagged) => format!("{}", tagged.tag),
    }
}
