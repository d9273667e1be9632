//! Palette parsing: raw color declarations to normalized color entries.
//!
//! A palette file maps color names to either a CSS color string or a channel
//! mapping, optionally with `shades`/`tints` directives:
//!
//! ```yaml
//! white: "#fff"
//! brand:
//!   hue: 210
//!   saturation: 65
//!   lightness: 40
//!   shades: { stops: 3 }
//!   tints: 2
//! ```
//!
//! [`parse_palette`] turns that into a [`Palette`] containing `white`,
//! `brand`, `dark-brand`, `darker-brand`, `darkest-brand`, `light-brand` and
//! `lighter-brand`, in that order.
//!
//! Parsing is all-or-nothing: the first invalid entry aborts with a
//! [`ColorError`] and no palette is returned.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, warn};

use crate::color::{from_channels, Color};
use crate::colorspace::mix;
use crate::error::{ColorError, FuncError};

/// The most stops a mixture directive can request; one per stop name.
pub const MAX_STOPS: usize = 6;

/// Stops generated when a directive does not say how many.
pub const DEFAULT_STOPS: usize = 2;

/// A color declaration as written in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawColorSpec {
    /// Any CSS color string: `"#ff6b35"`, `"rebeccapurple"`, `"hsl(0, 100%, 50%)"`.
    Css(String),
    /// Channel keys plus optional `shades`/`tints` directives.
    Model(IndexMap<String, Value>),
}

/// Raw color declarations keyed by color name, in declaration order.
pub type RawColors = IndexMap<String, RawColorSpec>;

/// The two ways a base color can be mixed into a ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MixtureMethod {
    /// Mix toward black.
    Shade,
    /// Mix toward white.
    Tint,
}

impl MixtureMethod {
    /// Recognizes a directive key: `shades` or `tints`.
    pub fn from_directive(key: &str) -> Option<Self> {
        match key {
            "shades" => Some(MixtureMethod::Shade),
            "tints" => Some(MixtureMethod::Tint),
            _ => None,
        }
    }

    pub fn directive(self) -> &'static str {
        match self {
            MixtureMethod::Shade => "shades",
            MixtureMethod::Tint => "tints",
        }
    }

    /// Stop names, nearest to the base color first.
    pub fn stop_names(self) -> &'static [&'static str; MAX_STOPS] {
        match self {
            MixtureMethod::Shade => &["dark", "darker", "darkest", "x-dark", "xx-dark", "xxx-dark"],
            MixtureMethod::Tint => &[
                "light",
                "lighter",
                "lightest",
                "x-light",
                "xx-light",
                "xxx-light",
            ],
        }
    }

    /// The color this method mixes toward.
    pub fn target(self) -> Color {
        match self {
            MixtureMethod::Shade => Color::black(),
            MixtureMethod::Tint => Color::white(),
        }
    }
}

/// Where a derived palette entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mixture {
    pub method: MixtureMethod,
    pub stop: String,
    /// Name of the color the ramp was derived from.
    pub base: String,
}

/// A normalized palette color with its precomputed CSS projections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEntry {
    pub name: String,
    #[serde(skip)]
    pub color: Color,
    /// Six-digit hex, alpha ignored.
    pub hex: String,
    pub hsl_css: String,
    pub rgb_css: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixture: Option<Mixture>,
}

impl ColorEntry {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            hex: color.hex_rgb(),
            hsl_css: color.css_hsl(),
            rgb_css: color.css_rgb(),
            color,
            mixture: None,
        }
    }

    pub fn with_mixture(mut self, mixture: Mixture) -> Self {
        self.mixture = Some(mixture);
        self
    }
}

/// Normalized colors keyed by name, in declaration order.
///
/// Built once by [`parse_palette`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    entries: IndexMap<String, ColorEntry>,
}

impl Palette {
    /// Parses a YAML (or JSON) palette document.
    pub fn from_yaml(source: &str) -> Result<Self, FuncError> {
        let raw: RawColors = serde_yaml::from_str(source).map_err(|source| FuncError::Yaml {
            what: "colors".to_string(),
            source,
        })?;
        Ok(parse_palette(&raw)?)
    }

    pub fn get(&self, name: &str) -> Option<&ColorEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Design tokens: color name to six-digit hex.
    pub fn tokens(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.hex.clone()))
            .collect()
    }

    /// Inserts an entry under its name. On collision the new entry replaces
    /// the old one in place.
    pub(crate) fn insert(&mut self, entry: ColorEntry) {
        if self.entries.contains_key(&entry.name) {
            warn!(color = %entry.name, "color name collision, later definition wins");
        }
        self.entries.insert(entry.name.clone(), entry);
    }
}

impl FromIterator<ColorEntry> for Palette {
    fn from_iter<I: IntoIterator<Item = ColorEntry>>(iter: I) -> Self {
        let mut palette = Palette::default();
        for entry in iter {
            palette.insert(entry);
        }
        palette
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = (&'a String, &'a ColorEntry);
    type IntoIter = indexmap::map::Iter<'a, String, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Normalizes raw color declarations into a palette.
///
/// ```rust
/// use func_css::{parse_palette, RawColors};
///
/// let raw: RawColors = serde_yaml::from_str(r##"
/// red: "#f00"
/// gray: { hue: 360, saturation: 0, brightness: 0, shades: { stops: 3 } }
/// "##).unwrap();
///
/// let palette = parse_palette(&raw).unwrap();
/// let names: Vec<_> = palette.names().collect();
/// assert_eq!(names, ["red", "gray", "dark-gray", "darker-gray", "darkest-gray"]);
/// ```
pub fn parse_palette(raw: &RawColors) -> Result<Palette, ColorError> {
    let mut palette = Palette::default();
    for (name, spec) in raw {
        for entry in parse_entry(name, spec)? {
            palette.insert(entry);
        }
    }

    debug!(colors = palette.len(), "parsed palette");
    Ok(palette)
}

fn parse_entry(name: &str, spec: &RawColorSpec) -> Result<Vec<ColorEntry>, ColorError> {
    let fields = match spec {
        RawColorSpec::Css(value) => {
            let color = Color::parse(value).map_err(|reason| ColorError::InvalidColor {
                name: name.to_string(),
                value: value.clone(),
                reason,
            })?;
            return Ok(vec![ColorEntry::new(name, color)]);
        }
        RawColorSpec::Model(fields) => fields,
    };

    let mut channels = Vec::with_capacity(fields.len());
    let mut directives = Vec::new();
    for (key, value) in fields {
        match MixtureMethod::from_directive(key) {
            Some(method) => directives.push((method, value)),
            None => channels.push((key.as_str(), value)),
        }
    }

    let base = from_channels(name, &channels)?;
    let mut entries = vec![ColorEntry::new(name, base)];

    for (method, value) in directives {
        let stops = parse_stops(name, method, value)?;
        let names = method.stop_names();
        for (stop, color) in names.iter().zip(mix(base, method.target(), stops)) {
            entries.push(
                ColorEntry::new(format!("{}-{}", stop, name), color).with_mixture(Mixture {
                    method,
                    stop: stop.to_string(),
                    base: name.to_string(),
                }),
            );
        }
    }

    Ok(entries)
}

/// Reads `{stops: N}`, a bare `N`, or an empty directive.
fn parse_stops(name: &str, method: MixtureMethod, value: &Value) -> Result<usize, ColorError> {
    let invalid = |reason: &str| ColorError::InvalidMixture {
        name: name.to_string(),
        directive: method.directive().to_string(),
        reason: reason.to_string(),
    };

    let stops = match value {
        Value::Null => return Ok(DEFAULT_STOPS),
        Value::Mapping(mapping) => match mapping.get("stops") {
            None | Some(Value::Null) => return Ok(DEFAULT_STOPS),
            Some(stops) => stops,
        },
        other => other,
    };

    let count = match stops {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| invalid("stops must be a non-negative integer"))?,
        _ => return Err(invalid("stops must be a number")),
    };

    if count > MAX_STOPS as u64 {
        return Err(ColorError::TooManyStops {
            name: name.to_string(),
            directive: method.directive().to_string(),
            stops: count,
            max: MAX_STOPS,
        });
    }

    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yaml: &str) -> RawColors {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn names(palette: &Palette) -> Vec<&str> {
        palette.names().collect()
    }

    // =========================================================================
    // Base entries
    // =========================================================================

    #[test]
    fn test_css_string_entry() {
        let palette = parse_palette(&raw("red: '#ff0000'")).unwrap();
        let red = palette.get("red").unwrap();
        assert_eq!(red.hex, "#ff0000");
        assert_eq!(red.hsl_css, "hsl(0, 100%, 50%)");
        assert_eq!(red.rgb_css, "rgb(255, 0, 0)");
        assert_eq!(red.mixture, None);
    }

    #[test]
    fn test_invalid_css_string() {
        let err = parse_palette(&raw("red: 'reddish'")).unwrap_err();
        assert!(matches!(err, ColorError::InvalidColor { ref name, .. } if name == "red"));
    }

    #[test]
    fn test_order_follows_declaration() {
        let palette = parse_palette(&raw("zeta: red\nalpha: blue\nmid: green")).unwrap();
        assert_eq!(names(&palette), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_error_aborts_whole_palette() {
        let result = parse_palette(&raw("ok: red\ngray: { hue: 0, saturation: 0, lightness: 0 }"));
        assert_eq!(result, Err(ColorError::InvalidHue { name: "gray".into() }));
    }

    // =========================================================================
    // Mixtures
    // =========================================================================

    #[test]
    fn test_shade_stops_are_named() {
        let palette = parse_palette(&raw(
            "gray: { hue: 360, saturation: 0, brightness: 0, shades: { stops: 3 } }",
        ))
        .unwrap();
        assert_eq!(names(&palette), ["gray", "dark-gray", "darker-gray", "darkest-gray"]);

        let darkest = palette.get("darkest-gray").unwrap();
        assert_eq!(
            darkest.mixture,
            Some(Mixture {
                method: MixtureMethod::Shade,
                stop: "darkest".into(),
                base: "gray".into(),
            })
        );
    }

    #[test]
    fn test_tints_default_to_two_stops() {
        let palette = parse_palette(&raw("brand: { h: 210, s: 65, l: 40, tints: {} }")).unwrap();
        assert_eq!(names(&palette), ["brand", "light-brand", "lighter-brand"]);
    }

    #[test]
    fn test_bare_stop_count() {
        let palette =
            parse_palette(&raw("brand: { h: 210, s: 65, l: 40, tints: 1, shades: 6 }")).unwrap();
        assert_eq!(palette.len(), 8);
        assert!(palette.contains("light-brand"));
        assert!(palette.contains("xxx-dark-brand"));
    }

    #[test]
    fn test_too_many_stops() {
        let err = parse_palette(&raw("brand: { h: 210, s: 65, l: 40, shades: { stops: 7 } }"))
            .unwrap_err();
        assert_eq!(
            err,
            ColorError::TooManyStops {
                name: "brand".into(),
                directive: "shades".into(),
                stops: 7,
                max: MAX_STOPS,
            }
        );
    }

    #[test]
    fn test_invalid_stop_count() {
        let err = parse_palette(&raw("brand: { h: 210, s: 65, l: 40, shades: { stops: 1.5 } }"))
            .unwrap_err();
        assert!(matches!(err, ColorError::InvalidMixture { .. }));

        let err = parse_palette(&raw("brand: { h: 210, s: 65, l: 40, tints: lots }"))
            .unwrap_err();
        assert!(matches!(err, ColorError::InvalidMixture { .. }));
    }

    #[test]
    fn test_name_collision_last_write_wins() {
        let palette = parse_palette(&raw(
            "dark-red: '#000001'\nred: { h: 0, s: 100, l: 50, shades: 1 }",
        ))
        .unwrap();
        assert_eq!(names(&palette), ["dark-red", "red"]);
        assert_eq!(palette.get("dark-red").unwrap().hex, "#800000");
    }

    // =========================================================================
    // Views
    // =========================================================================

    #[test]
    fn test_tokens() {
        let palette = parse_palette(&raw("white: '#fff'\nblack: '#000'")).unwrap();
        let tokens = palette.tokens();
        assert_eq!(tokens["white"], "#ffffff");
        assert_eq!(tokens["black"], "#000000");
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = ColorEntry::new("red", Color::from_rgb(255.0, 0.0, 0.0));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["hslCss"], "hsl(0, 100%, 50%)");
        assert!(json.get("mixture").is_none());
        assert!(json.get("color").is_none());
    }

    #[test]
    fn test_from_yaml() {
        let palette = Palette::from_yaml("blue: '#00f'").unwrap();
        assert_eq!(palette.get("blue").unwrap().hex, "#0000ff");
        assert!(Palette::from_yaml("- not a mapping").is_err());
    }
}
