//! Color resolution for animatable style values.
//!
//! This crate turns an arbitrary style-value string into a normalized RGBA
//! quadruple, or reports that the string is not a color at all. The explicit
//! parsers cover the syntaxes the animation engine interpolates natively:
//!
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)`
//! - Hex forms `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - `oklch(L C H)` with the full OKLCH -> sRGB conversion pipeline
//! - The CSS named-color table
//!
//! Anything else can be handed to a [`ColorOracle`], the pluggable stand-in
//! for an off-screen rendering surface. The distinction between "not a
//! color" (`None`) and "a fully transparent color" (`Some` with alpha 0)
//! matters to callers: the latter is still interpolable.
//!
//! # Examples
//!
//! ```
//! use glide_color::{resolve, Rgba};
//!
//! assert_eq!(resolve("#f00"), Some(Rgba::new(255, 0, 0, 1.0)));
//! assert_eq!(resolve("rgb(255, 0, 0)"), Some(Rgba::new(255, 0, 0, 1.0)));
//! assert_eq!(resolve("red"), Some(Rgba::new(255, 0, 0, 1.0)));
//! assert_eq!(resolve("10px"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod named;
mod oklch;
mod oracle;

pub use oklch::oklch_to_rgba;
pub use oracle::{ColorOracle, CssOracle};

/// Normalized RGBA color.
///
/// RGB channels are 0-255, alpha is 0.0-1.0. This is the common
/// representation every recognized color syntax is converted into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0.0-1.0).
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    /// Create a color from explicit channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Return this color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// True if the color contributes no visible coverage.
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    /// Format as a writable style value: `rgb(r, g, b, a)`.
    ///
    /// RGB channels are integers; alpha is emitted unrounded and is always
    /// present, even when fully opaque. This is the exact format the
    /// interpolator writes back each frame, and it round-trips through
    /// [`resolve`].
    pub fn to_css_string(&self) -> String {
        format!("rgb({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Parse a color string, reporting why it was rejected.
    ///
    /// [`resolve`] is the lenient variant that collapses every failure into
    /// `None`; this one is for callers who want a diagnostic.
    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        if let Some(color) = resolve(trimmed) {
            return Ok(color);
        }
        if trimmed.starts_with('#') {
            Err(ColorParseError::InvalidHex(trimmed.to_string()))
        } else if trimmed.contains('(') {
            Err(ColorParseError::InvalidFunction(trimmed.to_string()))
        } else {
            Err(ColorParseError::Unrecognized(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css_string())
    }
}

/// Error produced by [`Rgba::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// A `#...` token with a bad length or non-hex digits.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    /// A functional form (`rgb(...)`, `oklch(...)`, ...) with bad arguments.
    #[error("invalid color function: {0}")]
    InvalidFunction(String),
    /// Not a color syntax this crate knows about.
    #[error("unrecognized color: {0}")]
    Unrecognized(String),
}

/// Resolve a style-value string into a normalized RGBA quadruple.
///
/// The syntaxes are tried in a fixed order and the first match wins:
/// `rgb()`, `rgba()`, hex, `oklch()`, named colors. Returns `None` when the
/// value is not a color; see [`resolve_with_oracle`] for the fallback path.
pub fn resolve(value: &str) -> Option<Rgba> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if lower.starts_with("rgba(") {
        return parse_rgba(value);
    }
    if lower.starts_with("rgb(") {
        return parse_rgb(value);
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if lower.starts_with("oklch(") {
        return oklch::parse(value);
    }
    named::lookup(&lower)
}

/// Resolve a color, consulting `oracle` when the explicit parsers fail.
///
/// The oracle is how inputs outside the explicit grammar (browser-specific
/// keywords, `hsl()`, `transparent`, ...) are normalized; its results are
/// environment-dependent for such inputs. A transparent oracle result is a
/// valid color, not a rejection.
pub fn resolve_with_oracle(value: &str, oracle: Option<&dyn ColorOracle>) -> Option<Rgba> {
    resolve(value).or_else(|| oracle.and_then(|o| o.resolve_color(value.trim())))
}

/// Parse `rgb(r, g, b)` or `rgb(r, g, b, a)`: comma-separated non-negative
/// integer channels with an optional alpha float in [0, 1].
///
/// The four-argument form is the canonical output of
/// [`Rgba::to_css_string`], so it must resolve back.
fn parse_rgb(value: &str) -> Option<Rgba> {
    let channels = function_args(value)?;
    let (rgb, alpha) = match channels.as_slice() {
        [r, g, b] => ([r, g, b], 1.0),
        [r, g, b, a] => ([r, g, b], parse_alpha(a)?),
        _ => return None,
    };
    let [r, g, b] = rgb;
    Some(Rgba::new(
        parse_channel(r)?,
        parse_channel(g)?,
        parse_channel(b)?,
        alpha,
    ))
}

/// Parse `rgba(r, g, b, a)`: three integers plus an alpha float in [0, 1].
fn parse_rgba(value: &str) -> Option<Rgba> {
    let channels = function_args(value)?;
    let [r, g, b, a] = channels.as_slice() else {
        return None;
    };
    Some(Rgba::new(
        parse_channel(r)?,
        parse_channel(g)?,
        parse_channel(b)?,
        parse_alpha(a)?,
    ))
}

/// Parse an alpha component, rejecting values outside [0, 1].
fn parse_alpha(s: &str) -> Option<f32> {
    let alpha: f32 = s.parse().ok()?;
    (0.0..=1.0).contains(&alpha).then_some(alpha)
}

/// Split `name(a, b, c)` into trimmed comma-separated arguments.
fn function_args(value: &str) -> Option<Vec<&str>> {
    let inner = value
        .split_once('(')
        .and_then(|(_, rest)| rest.rsplit_once(')'))
        .map(|(body, _)| body)?;
    Some(inner.split(',').map(str::trim).collect())
}

/// Parse one integer RGB channel, clamping values above 255.
fn parse_channel(s: &str) -> Option<u8> {
    let value: u32 = s.parse().ok()?;
    Some(value.min(255) as u8)
}

/// Parse a hex body (`#` already stripped): RGB, RGBA, RRGGBB or RRGGBBAA.
///
/// Short forms expand each nibble by duplication, so `abc` becomes `aabbcc`.
fn parse_hex(hex: &str) -> Option<Rgba> {
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(
            nibble(0)?,
            nibble(1)?,
            nibble(2)?,
            nibble(3)? as f32 / 255.0,
        )),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)? as f32 / 255.0,
        )),
        _ => None,
    }
}
