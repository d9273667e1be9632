//! Color mixing for tint and shade ramps.
//!
//! # Mixing modes
//!
//! [`MixMode::Rgb`] interpolates the sRGB channels directly. Mixing any color
//! toward black or white this way moves its HSL lightness in exactly equal
//! steps, which is what a `shades: {stops: 3}` ramp is expected to look like
//! in a generated stylesheet, so it is the default.
//!
//! [`MixMode::Lab`] interpolates in CIE LAB (D65). LAB is perceptually
//! uniform: equal numerical distances look like equal color differences, so
//! ramps between two saturated colors avoid the muddy midpoints that sRGB
//! interpolation produces.
//!
//! # Example
//!
//! ```rust
//! use func_css::colorspace::mix;
//! use func_css::Color;
//!
//! let red = Color::from_hsl(0.0, 1.0, 0.5);
//! let shades = mix(red, Color::black(), 3);
//!
//! assert_eq!(shades.len(), 3);
//! assert_eq!(shades[1].hex(), "#800000");
//! ```

use crate::color::Color;

/// How two colors are interpolated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MixMode {
    #[default]
    Rgb,
    Lab,
}

/// Returns `stops` colors strictly between `a` and `b`, evenly spaced, in sRGB.
pub fn mix(a: Color, b: Color, stops: usize) -> Vec<Color> {
    mix_with(a, b, stops, MixMode::Rgb)
}

/// Returns `stops` colors strictly between `a` and `b` at ratios `i / (stops + 1)`.
pub fn mix_with(a: Color, b: Color, stops: usize, mode: MixMode) -> Vec<Color> {
    let divisions = (stops + 1) as f64;
    (1..=stops)
        .map(|i| mix_at(a, b, i as f64 / divisions, mode))
        .collect()
}

/// Mixes a single color `ratio` of the way from `a` to `b`.
///
/// `ratio` is clamped to `0.0..=1.0`. Alpha is always interpolated linearly.
pub fn mix_at(a: Color, b: Color, ratio: f64, mode: MixMode) -> Color {
    let t = ratio.clamp(0.0, 1.0);
    let [r, g, bl] = match mode {
        MixMode::Rgb => {
            let (from, to) = (a.channels(), b.channels());
            [
                lerp(t, from[0], to[0]),
                lerp(t, from[1], to[1]),
                lerp(t, from[2], to[2]),
            ]
        }
        MixMode::Lab => lab_to_rgb(lerp_lab(
            t,
            &rgb_to_lab(a.channels()),
            &rgb_to_lab(b.channels()),
        )),
    };

    Color::from_rgba(r, g, bl, lerp(t, a.alpha(), b.alpha()))
}

fn lerp(t: f64, from: f64, to: f64) -> f64 {
    from + t * (to - from)
}

// ─── CIE LAB internals ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Lab {
    l: f64,
    a: f64,
    b: f64,
}

/// D65 reference white point for CIE XYZ → LAB conversion.
const XN: f64 = 0.95047;
const YN: f64 = 1.00000;
const ZN: f64 = 1.08883;

/// sRGB component (0–255) to linear light (0.0–1.0).
fn srgb_to_linear(c: f64) -> f64 {
    let c = c / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light (0.0–1.0) to an unrounded sRGB component (0–255).
fn linear_to_srgb(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    let s = if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    s * 255.0
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > 0.206896 {
        t * t * t
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

fn rgb_to_lab([r, g, b]: [f64; 3]) -> Lab {
    let r = srgb_to_linear(r);
    let g = srgb_to_linear(g);
    let b = srgb_to_linear(b);

    let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
    let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
    let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

    let fx = lab_f(x / XN);
    let fy = lab_f(y / YN);
    let fz = lab_f(z / ZN);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

fn lab_to_rgb(lab: Lab) -> [f64; 3] {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    let x = XN * lab_f_inv(fx);
    let y = YN * lab_f_inv(fy);
    let z = ZN * lab_f_inv(fz);

    let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
    let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
    let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

    [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b)]
}

fn lerp_lab(t: f64, a: &Lab, b: &Lab) -> Lab {
    Lab {
        l: lerp(t, a.l, b.l),
        a: lerp(t, a.a, b.a),
        b: lerp(t, a.b, b.b),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(color: &Color) -> f64 {
        color.hsl().2
    }

    // =====================================================================
    // Stop placement
    // =====================================================================

    #[test]
    fn test_mix_returns_requested_stops() {
        assert_eq!(mix(Color::white(), Color::black(), 0).len(), 0);
        assert_eq!(mix(Color::white(), Color::black(), 6).len(), 6);
    }

    #[test]
    fn test_mix_excludes_endpoints() {
        let stops = mix(Color::white(), Color::black(), 1);
        assert_eq!(stops[0].channels(), [127.5, 127.5, 127.5]);
    }

    #[test]
    fn test_shades_step_evenly_in_lightness() {
        let base = Color::from_hsl(210.0, 0.65, 0.4);
        let mut ramp = vec![base];
        ramp.extend(mix(base, Color::black(), 3));

        let steps: Vec<f64> = ramp
            .windows(2)
            .map(|w| lightness(&w[0]) - lightness(&w[1]))
            .collect();
        for step in &steps {
            assert!((step - 0.1).abs() < 1e-9, "uneven step {:?}", steps);
        }
    }

    #[test]
    fn test_tints_step_evenly_in_lightness() {
        let base = Color::from_hsl(0.0, 1.0, 0.5);
        let tints = mix(base, Color::white(), 4);
        let deltas: Vec<f64> = tints
            .windows(2)
            .map(|w| lightness(&w[1]) - lightness(&w[0]))
            .collect();
        assert!(deltas.iter().all(|d| (d - deltas[0]).abs() < 1e-9));
        assert!(deltas[0] > 0.0);
    }

    #[test]
    fn test_alpha_is_interpolated() {
        let clear = Color::white().with_alpha(0.0);
        let stops = mix(clear, Color::white(), 1);
        assert_eq!(stops[0].alpha(), 0.5);
    }

    // =====================================================================
    // LAB
    // =====================================================================

    #[test]
    fn test_lab_roundtrip() {
        for rgb in [[255.0, 0.0, 0.0], [12.0, 200.0, 80.0], [128.0, 128.0, 128.0]] {
            let back = lab_to_rgb(rgb_to_lab(rgb));
            for (a, b) in rgb.iter().zip(back.iter()) {
                assert!((a - b).abs() < 0.5, "{:?} became {:?}", rgb, back);
            }
        }
    }

    #[test]
    fn test_lab_endpoints() {
        let red = Color::from_rgb(255.0, 0.0, 0.0);
        let blue = Color::from_rgb(0.0, 0.0, 255.0);
        assert_eq!(mix_at(red, blue, 0.0, MixMode::Lab).rgb(), (255, 0, 0));
        assert_eq!(mix_at(red, blue, 1.0, MixMode::Lab).rgb(), (0, 0, 255));
    }

    #[test]
    fn test_lab_midpoint_differs_from_rgb() {
        let red = Color::from_rgb(255.0, 0.0, 0.0);
        let blue = Color::from_rgb(0.0, 0.0, 255.0);
        let lab = mix_at(red, blue, 0.5, MixMode::Lab);
        let rgb = mix_at(red, blue, 0.5, MixMode::Rgb);
        assert_ne!(lab.rgb(), rgb.rgb());
    }
}
