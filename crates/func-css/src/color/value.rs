//! The color value shared by the palette and the class generator.
//!
//! A [`Color`] stores sRGB channels as floating point numbers in `0.0..=255.0`
//! plus an alpha channel in `0.0..=1.0`. Channels are kept unrounded so that
//! mixtures and model conversions do not accumulate quantization error; the
//! string projections ([`hex`](Color::hex), [`css_hsl`](Color::css_hsl),
//! [`css_rgb`](Color::css_rgb)) round only at the output boundary.
//!
//! # Example
//!
//! ```rust
//! use func_css::Color;
//!
//! let red = Color::from_hsl(0.0, 1.0, 0.5);
//! assert_eq!(red.hex(), "#ff0000");
//! assert_eq!(red.css_hsl(), "hsl(0, 100%, 50%)");
//! assert_eq!(red.with_alpha(0.5).css_rgb(), "rgba(255, 0, 0, 0.5)");
//! ```

use std::fmt;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    alpha: f64,
}

impl Color {
    /// Creates an opaque color from sRGB channels (`0.0..=255.0`).
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::from_rgba(r, g, b, 1.0)
    }

    /// Creates a color from sRGB channels and alpha.
    ///
    /// Channels are clamped into range; `NaN` becomes `0`.
    pub fn from_rgba(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self {
            r: clamp(r, 255.0),
            g: clamp(g, 255.0),
            b: clamp(b, 255.0),
            alpha: clamp(alpha, 1.0),
        }
    }

    /// Creates an opaque color from hue (degrees), saturation and lightness (`0.0..=1.0`).
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let [r, g, b] = hsl_to_rgb(h, s, l);
        Self::from_rgb(r, g, b)
    }

    /// Creates an opaque color from hue (degrees), saturation and value (`0.0..=1.0`).
    ///
    /// HSB is the same model under another name.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let [r, g, b] = hsv_to_rgb(h, s, v);
        Self::from_rgb(r, g, b)
    }

    pub fn black() -> Self {
        Self::from_rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::from_rgb(255.0, 255.0, 255.0)
    }

    /// Returns the unrounded sRGB channels.
    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the sRGB channels rounded to bytes.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    /// Returns `(hue, saturation, lightness)`.
    ///
    /// Hue is in degrees `0.0..360.0`; achromatic colors report a hue of `0`.
    pub fn hsl(&self) -> (f64, f64, f64) {
        let (r, g, b) = (self.r / 255.0, self.g / 255.0, self.b / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let delta = max - min;
        let s = if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        (hue(r, g, b, max, delta), s, l)
    }

    /// Returns `(hue, saturation, value)`.
    pub fn hsv(&self) -> (f64, f64, f64) {
        let (r, g, b) = (self.r / 255.0, self.g / 255.0, self.b / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        if delta == 0.0 {
            return (0.0, 0.0, max);
        }

        (hue(r, g, b, max, delta), delta / max, max)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns a copy of this color with its alpha channel replaced.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: clamp(alpha, 1.0),
            ..self
        }
    }

    /// Returns true when alpha is exactly 1.
    pub fn is_opaque(&self) -> bool {
        self.alpha == 1.0
    }

    /// Hex notation: `#rrggbb`, or `#rrggbbaa` when the color is translucent.
    pub fn hex(&self) -> String {
        if self.is_opaque() {
            self.hex_rgb()
        } else {
            format!("{}{:02x}", self.hex_rgb(), to_byte(self.alpha * 255.0))
        }
    }

    /// Six-digit hex notation, ignoring alpha.
    pub fn hex_rgb(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// CSS `hsl(h, s%, l%)`, or `hsla(h, s%, l%, a)` when translucent.
    pub fn css_hsl(&self) -> String {
        let (h, s, l) = self.hsl();
        let body = format!(
            "{}, {}%, {}%",
            format_number(h),
            format_number(s * 100.0),
            format_number(l * 100.0)
        );

        if self.is_opaque() {
            format!("hsl({})", body)
        } else {
            format!("hsla({}, {})", body, format_number(self.alpha))
        }
    }

    /// CSS `rgb(r, g, b)`, or `rgba(r, g, b, a)` when translucent.
    pub fn css_rgb(&self) -> String {
        let (r, g, b) = self.rgb();
        if self.is_opaque() {
            format!("rgb({}, {}, {})", r, g, b)
        } else {
            format!("rgba({}, {}, {}, {})", r, g, b, format_number(self.alpha))
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

fn clamp(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

fn to_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Formats a number for CSS output: two decimals at most, no trailing zeros.
pub(crate) fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // collapses -0 into 0
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

fn hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let sector = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    let degrees = sector * 60.0;
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    if s == 0.0 {
        let v = l * 255.0;
        return [v, v, v];
    }

    let h = h.rem_euclid(360.0) / 360.0;
    let t2 = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let t1 = 2.0 * l - t2;

    let channel = |offset: f64| {
        let mut t3 = h + offset;
        if t3 < 0.0 {
            t3 += 1.0;
        }
        if t3 > 1.0 {
            t3 -= 1.0;
        }

        let c = if 6.0 * t3 < 1.0 {
            t1 + (t2 - t1) * 6.0 * t3
        } else if 2.0 * t3 < 1.0 {
            t2
        } else if 3.0 * t3 < 2.0 {
            t1 + (t2 - t1) * (2.0 / 3.0 - t3) * 6.0
        } else {
            t1
        };
        c * 255.0
    };

    [channel(1.0 / 3.0), channel(0.0), channel(-1.0 / 3.0)]
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    if s == 0.0 {
        let c = v * 255.0;
        return [c, c, c];
    }

    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [r * 255.0, g * 255.0, b * 255.0]
}
