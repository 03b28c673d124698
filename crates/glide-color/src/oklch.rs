//! OKLCH to sRGB conversion.
//!
//! `oklch(L C H)` is converted through a fixed pipeline:
//! OKLCH -> OKLAB (polar to rectangular) -> non-linear LMS via a 3x3
//! matrix -> cube each component -> XYZ (D65) via a second matrix ->
//! linear sRGB via a third matrix -> gamma-encoded sRGB channels.
//!
//! The matrices are static constant data (Ottosson's OKLAB definition and
//! the sRGB/D65 primaries); there is no mutable state here.

use crate::Rgba;

/// OKLAB (with L unchanged) to non-linear LMS.
const OKLAB_TO_LMS: [[f32; 3]; 3] = [
    [1.0, 0.396_337_78, 0.215_803_76],
    [1.0, -0.105_561_346, -0.063_854_17],
    [1.0, -0.089_484_18, -1.291_485_5],
];

/// Cubed LMS to XYZ with a D65 white point.
const LMS_TO_XYZ: [[f32; 3]; 3] = [
    [1.227_013_8, -0.557_8, 0.281_256_14],
    [-0.040_580_18, 1.112_256_9, -0.071_676_68],
    [-0.076_381_28, -0.421_481_97, 1.586_163_2],
];

/// XYZ (D65) to linear sRGB.
const XYZ_TO_LINEAR_SRGB: [[f32; 3]; 3] = [
    [3.240_97, -1.537_383_2, -0.498_610_76],
    [-0.969_243_65, 1.875_967_5, 0.041_555_06],
    [0.055_630_08, -0.203_976_96, 1.056_971_5],
];

fn multiply(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Gamma-encode one linear sRGB component.
///
/// Values with magnitude at or below 0.0031308 scale linearly by 12.92;
/// everything else takes the signed power law.
fn gamma_encode(c: f32) -> f32 {
    if c.abs() <= 0.003_130_8 {
        12.92 * c
    } else {
        c.signum() * (1.055 * c.abs().powf(1.0 / 2.4) - 0.055)
    }
}

/// Convert OKLCH components to a gamma-encoded RGBA color.
///
/// Hue is in degrees; a NaN hue is treated as zero chroma (a = b = 0).
/// Out-of-gamut results are clamped per channel.
pub fn oklch_to_rgba(l: f32, c: f32, h: f32, alpha: f32) -> Rgba {
    let (a, b) = if h.is_nan() {
        (0.0, 0.0)
    } else {
        let radians = h.to_radians();
        (c * radians.cos(), c * radians.sin())
    };

    let lms = multiply(&OKLAB_TO_LMS, [l, a, b]);
    let cubed = [lms[0].powi(3), lms[1].powi(3), lms[2].powi(3)];
    let xyz = multiply(&LMS_TO_XYZ, cubed);
    let linear = multiply(&XYZ_TO_LINEAR_SRGB, xyz);

    let channel = |c: f32| (gamma_encode(c) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::new(channel(linear[0]), channel(linear[1]), channel(linear[2]), alpha)
}

/// Parse `oklch(L C H)` with an optional `/ alpha` component.
///
/// L and C accept a trailing `%` (percent of 1.0 and of 0.4 respectively);
/// H accepts a `deg` suffix or the `none` keyword.
pub(crate) fn parse(value: &str) -> Option<Rgba> {
    let inner = value
        .split_once('(')
        .and_then(|(_, rest)| rest.rsplit_once(')'))
        .map(|(body, _)| body)?;

    let (components, alpha_part) = match inner.split_once('/') {
        Some((head, tail)) => (head, Some(tail.trim())),
        None => (inner, None),
    };

    let mut parts = components.split_whitespace();
    let l = scaled_component(parts.next()?, 1.0)?;
    let c = scaled_component(parts.next()?, 0.4)?;
    let h = hue_component(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    let alpha = match alpha_part {
        Some(raw) => alpha_component(raw)?,
        None => 1.0,
    };

    Some(oklch_to_rgba(l, c, h, alpha))
}

/// Parse a number that may carry `%`, which maps 100% to `percent_base`.
fn scaled_component(raw: &str, percent_base: f32) -> Option<f32> {
    if raw == "none" {
        return Some(0.0);
    }
    match raw.strip_suffix('%') {
        Some(number) => Some(number.parse::<f32>().ok()? / 100.0 * percent_base),
        None => raw.parse().ok(),
    }
}

fn hue_component(raw: &str) -> Option<f32> {
    if raw == "none" {
        // Missing hue: chroma is ignored downstream.
        return Some(f32::NAN);
    }
    raw.strip_suffix("deg").unwrap_or(raw).parse().ok()
}

fn alpha_component(raw: &str) -> Option<f32> {
    match raw.strip_suffix('%') {
        Some(number) => Some(number.parse::<f32>().ok()? / 100.0),
        None => raw.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(color: Rgba, r: u8, g: u8, b: u8, tolerance: i32) -> bool {
        (color.r as i32 - r as i32).abs() <= tolerance
            && (color.g as i32 - g as i32).abs() <= tolerance
            && (color.b as i32 - b as i32).abs() <= tolerance
    }

    #[test]
    fn test_white_and_black_endpoints() {
        let white = oklch_to_rgba(1.0, 0.0, 0.0, 1.0);
        assert!(close(white, 255, 255, 255, 1), "got {white:?}");
        let black = oklch_to_rgba(0.0, 0.0, 0.0, 1.0);
        assert!(close(black, 0, 0, 0, 1), "got {black:?}");
    }

    #[test]
    fn test_srgb_red_round_trip() {
        // OKLCH coordinates of sRGB red.
        let red = oklch_to_rgba(0.627_955, 0.257_683, 29.233_885, 1.0);
        assert!(close(red, 255, 0, 0, 2), "got {red:?}");
    }

    #[test]
    fn test_srgb_blue_round_trip() {
        let blue = oklch_to_rgba(0.452_014, 0.313_214, 264.052_02, 1.0);
        assert!(close(blue, 0, 0, 255, 2), "got {blue:?}");
    }

    #[test]
    fn test_nan_hue_is_achromatic() {
        let gray = oklch_to_rgba(0.6, 0.25, f32::NAN, 1.0);
        assert!(close(gray, gray.r, gray.r, gray.r, 1), "got {gray:?}");
    }

    #[test]
    fn test_parse_basic() {
        let parsed = parse("oklch(0.627955 0.257683 29.233885)").unwrap();
        assert!(close(parsed, 255, 0, 0, 2), "got {parsed:?}");
        assert_eq!(parsed.a, 1.0);
    }

    #[test]
    fn test_parse_percent_and_alpha() {
        let parsed = parse("oklch(100% 0 0 / 50%)").unwrap();
        assert!(close(parsed, 255, 255, 255, 1));
        assert!((parsed.a - 0.5).abs() < 1e-6);

        let parsed = parse("oklch(0.7 0.1 180deg / 0.25)").unwrap();
        assert!((parsed.a - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_parse_none_hue() {
        let parsed = parse("oklch(0.5 0.2 none)").unwrap();
        assert!(close(parsed, parsed.r, parsed.r, parsed.r, 1), "got {parsed:?}");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse("oklch()"), None);
        assert_eq!(parse("oklch(0.5 0.1)"), None);
        assert_eq!(parse("oklch(0.5 0.1 20 30)"), None);
        assert_eq!(parse("oklch(x y z)"), None);
    }
}
