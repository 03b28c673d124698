//! Easing functions for animation timing.
//!
//! The engine feeds every easing function the *raw* progress, a linear
//! time fraction already clamped to [0, 1]. The output is deliberately not
//! clamped: overshooting curves are legal, and the interpolator is
//! required to extrapolate for them. The default is [`Easing::Linear`],
//! the identity function.
//!
//! # Usage
//!
//! ```
//! use glide_anim::Easing;
//!
//! let ease = Easing::EaseOut;
//! let progress = ease.evaluate(0.5);
//!
//! // Arbitrary caller-supplied easing:
//! let overshoot = Easing::Custom(|t| t * t * (3.0 - 2.0 * t) * 1.1);
//! let progress = overshoot.evaluate(0.5);
//! ```

use glide_config::EasingSpec;

/// Easing function applied to raw progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Identity: eased progress equals raw progress.
    #[default]
    Linear,

    /// CSS `ease` - `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,

    /// CSS `ease-in` - `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,

    /// CSS `ease-out` - `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,

    /// CSS `ease-in-out` - `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,

    /// Custom cubic bezier curve with control points (x1, y1) and (x2, y2).
    /// x values must be in [0, 1]; y values may overshoot.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Arbitrary caller-supplied easing function over [0, 1].
    ///
    /// The output is passed through untouched, so curves that leave [0, 1]
    /// produce extrapolated intermediate values.
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Evaluate the easing function at raw progress `t`.
    ///
    /// `t` is clamped to [0, 1] on the way in; the result is not clamped.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
            Self::Custom(f) => f(t),
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }
}

impl From<EasingSpec> for Easing {
    fn from(spec: EasingSpec) -> Self {
        match spec {
            EasingSpec::Linear => Self::Linear,
            EasingSpec::Ease => Self::Ease,
            EasingSpec::EaseIn => Self::EaseIn,
            EasingSpec::EaseOut => Self::EaseOut,
            EasingSpec::EaseInOut => Self::EaseInOut,
            EasingSpec::CubicBezier { x1, y1, x2, y2 } => Self::CubicBezier { x1, y1, x2, y2 },
        }
    }
}

/// Evaluate a cubic bezier timing curve at progress `t`.
///
/// Newton-Raphson solves for the curve parameter whose x equals `t`, then
/// the y coordinate at that parameter is the eased progress.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_curve_x(x1, x2, progress);
    sample_axis(y1, y2, t)
}

/// Solve the bezier x(t) = target equation by Newton-Raphson iteration.
fn solve_curve_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let error = sample_axis(x1, x2, t) - target_x;
        if error.abs() < 1e-6 {
            break;
        }

        let slope = sample_derivative(x1, x2, t);
        if slope.abs() < 1e-6 {
            break;
        }

        t -= error / slope;
        t = t.clamp(0.0, 1.0);
    }

    t
}

/// One-dimensional bezier: p(t) = 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3.
#[inline]
fn sample_axis(p1: f32, p2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let mt = 1.0 - t;

    3.0 * mt * mt * t * p1 + 3.0 * mt * t2 * p2 + t2 * t
}

/// Derivative of [`sample_axis`] with respect to t.
#[inline]
fn sample_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
