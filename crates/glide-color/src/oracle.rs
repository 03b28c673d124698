//! Color-normalization oracle.
//!
//! The explicit parsers in this crate cover a fixed grammar. Real style
//! values can go beyond it (`hsl()`, `transparent`, vendor keywords), and
//! the original surface for those is the rendering environment itself:
//! paint the value somewhere off-screen and read the pixels back. The
//! [`ColorOracle`] trait is that boundary; hosts with a real rendering
//! surface implement it themselves, everyone else gets [`CssOracle`].
//!
//! Oracle results for out-of-grammar inputs are environment-dependent
//! (gamma and rounding vary between implementations); callers should treat
//! them as a best-effort normalization, not bit-exact data.

use crate::Rgba;

/// Resolves color strings the explicit parsers do not recognize.
pub trait ColorOracle {
    /// Normalize `raw` into RGBA, or report that it has no color meaning.
    ///
    /// A result with zero alpha is a valid, fully transparent color; it
    /// must not be collapsed into `None`.
    fn resolve_color(&self, raw: &str) -> Option<Rgba>;
}

/// [`ColorOracle`] backed by the `csscolorparser` crate.
///
/// Covers the full CSS color grammar (hsl, hwb, lab, `transparent`, ...)
/// without needing a display.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssOracle;

impl ColorOracle for CssOracle {
    fn resolve_color(&self, raw: &str) -> Option<Rgba> {
        let color = csscolorparser::parse(raw).ok()?;
        let [r, g, b, _] = color.to_rgba8();
        Some(Rgba::new(r, g, b, color.a as f32))
    }
}
