//! Per-property interpolation plans.
//!
//! When an animation request becomes active, every (current, destination)
//! value pair is classified once into a [`PropertyPlan`], which fixes the
//! interpolation strategy for the rest of the task:
//!
//! - both sides resolve as colors -> per-channel color blend
//! - both sides are numbers with an optional unit -> numeric blend, with
//!   the unit taken from the *current* value
//! - anything else -> opaque: the destination string is applied verbatim,
//!   once, at completion
//!
//! Color classification is tried strictly before numeric, so an input that
//! could be read both ways is a color. Classification never fails; every
//! degraded input lands in the opaque plan.

use glide_color::{resolve_with_oracle, ColorOracle, Rgba};
use serde::{Deserialize, Serialize};

/// The resolved interpolation strategy for one style property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyPlan {
    /// Blend two RGBA colors channel by channel.
    Color { from: Rgba, to: Rgba },
    /// Blend two numbers and reattach the unit suffix.
    Numeric { from: f32, to: f32, unit: String },
    /// No defined interpolation; snap to the destination at completion.
    Opaque { to: String },
}

impl PropertyPlan {
    /// Classify a (current, destination) value pair.
    ///
    /// Pure and idempotent: the same pair always yields the same plan.
    pub fn classify(current: &str, destination: &str, oracle: Option<&dyn ColorOracle>) -> Self {
        // Colors first; the ordering is load-bearing for values that also
        // parse as bare numbers.
        if let (Some(from), Some(to)) = (
            resolve_with_oracle(current, oracle),
            resolve_with_oracle(destination, oracle),
        ) {
            return Self::Color { from, to };
        }

        if let (Some((from, unit)), Some((to, _))) = (
            split_number_unit(current),
            split_number_unit(destination),
        ) {
            return Self::Numeric {
                from,
                to,
                unit: unit.to_string(),
            };
        }

        Self::Opaque {
            to: destination.to_string(),
        }
    }

    /// Compute the writable style value at eased progress `eased`.
    ///
    /// `completed` is whether the *raw* progress has reached 1. Color and
    /// numeric plans extrapolate for eased values outside [0, 1]; the
    /// opaque plan produces nothing until completion, then the destination
    /// verbatim.
    pub fn evaluate(&self, eased: f32, completed: bool) -> Option<String> {
        match self {
            Self::Color { from, to } => Some(blend_color(from, to, eased).to_css_string()),
            Self::Numeric { from, to, unit } => {
                let value = from + (to - from) * eased;
                Some(format!("{value}{unit}"))
            }
            Self::Opaque { to } => completed.then(|| to.clone()),
        }
    }
}

/// Per-channel linear color blend; RGB rounds to integers, alpha does not.
fn blend_color(from: &Rgba, to: &Rgba, t: f32) -> Rgba {
    let channel = |from: u8, to: u8| {
        let value = from as f32 + (to as f32 - from as f32) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
        from.a + (to.a - from.a) * t,
    )
}

/// Split a signed decimal with an optional unit suffix, e.g. `-12.5px`.
///
/// The unit may be empty; it must be alphabetic or `%` with no embedded
/// whitespace, otherwise the value does not match the numeric pattern.
fn split_number_unit(value: &str) -> Option<(f32, &str)> {
    let value = value.trim();
    let bytes = value.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if end == digits_start {
        return None;
    }

    let number: f32 = value[..end].parse().ok()?;
    let unit = &value[end..];
    if !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        return None;
    }
    Some((number, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_color_pair() {
        let plan = PropertyPlan::classify("rgb(255, 0, 0)", "blue", None);
        assert_eq!(
            plan,
            PropertyPlan::Color {
                from: Rgba::rgb(255, 0, 0),
                to: Rgba::rgb(0, 0, 255),
            }
        );
    }

    #[test]
    fn test_classify_numeric_takes_unit_from_current() {
        let plan = PropertyPlan::classify("0px", "100%", None);
        assert_eq!(
            plan,
            PropertyPlan::Numeric {
                from: 0.0,
                to: 100.0,
                unit: "px".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_bare_numbers() {
        let plan = PropertyPlan::classify("0", "1", None);
        assert_eq!(
            plan,
            PropertyPlan::Numeric {
                from: 0.0,
                to: 1.0,
                unit: String::new(),
            }
        );
    }

    #[test]
    fn test_classify_opaque_fallback() {
        // One unresolvable side degrades the whole pair.
        let plan = PropertyPlan::classify("block", "flex", None);
        assert_eq!(
            plan,
            PropertyPlan::Opaque {
                to: "flex".to_string()
            }
        );
        let plan = PropertyPlan::classify("red", "10px", None);
        assert_eq!(
            plan,
            PropertyPlan::Opaque {
                to: "10px".to_string()
            }
        );
        // Unreadable current style value.
        let plan = PropertyPlan::classify("", "100px", None);
        assert_eq!(
            plan,
            PropertyPlan::Opaque {
                to: "100px".to_string()
            }
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        for (current, destination) in [("0px", "10px"), ("red", "blue"), ("auto", "none")] {
            let first = PropertyPlan::classify(current, destination, None);
            let second = PropertyPlan::classify(current, destination, None);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_color_blend_midpoint() {
        let plan = PropertyPlan::classify("rgb(255, 0, 0)", "blue", None);
        assert_eq!(
            plan.evaluate(0.5, false).unwrap(),
            "rgb(128, 0, 128, 1)"
        );
    }

    #[test]
    fn test_color_boundaries() {
        let plan = PropertyPlan::Color {
            from: Rgba::rgb(10, 20, 30),
            to: Rgba::new(200, 100, 0, 0.5),
        };
        assert_eq!(plan.evaluate(0.0, false).unwrap(), "rgb(10, 20, 30, 1)");
        assert_eq!(plan.evaluate(1.0, true).unwrap(), "rgb(200, 100, 0, 0.5)");
    }

    #[test]
    fn test_color_extrapolation_clamps_channels() {
        let plan = PropertyPlan::Color {
            from: Rgba::rgb(0, 0, 0),
            to: Rgba::rgb(200, 200, 200),
        };
        // Eased progress overshooting 1.0 must still be writable.
        assert_eq!(plan.evaluate(1.5, false).unwrap(), "rgb(255, 255, 255, 1)");
        assert_eq!(plan.evaluate(-0.5, false).unwrap(), "rgb(0, 0, 0, 1)");
    }

    #[test]
    fn test_numeric_blend_and_unit_reattachment() {
        let plan = PropertyPlan::Numeric {
            from: 0.0,
            to: 100.0,
            unit: "px".to_string(),
        };
        assert_eq!(plan.evaluate(0.0, false).unwrap(), "0px");
        assert_eq!(plan.evaluate(0.5, false).unwrap(), "50px");
        assert_eq!(plan.evaluate(1.0, true).unwrap(), "100px");
        // No rounding of intermediate values.
        assert_eq!(plan.evaluate(0.125, false).unwrap(), "12.5px");
    }

    #[test]
    fn test_numeric_monotonic_under_identity_easing() {
        let plan = PropertyPlan::Numeric {
            from: -20.0,
            to: 80.0,
            unit: "em".to_string(),
        };
        let mut previous = f32::NEG_INFINITY;
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let value = match plan.evaluate(t, false).unwrap().strip_suffix("em") {
                Some(number) => number.parse::<f32>().unwrap(),
                None => panic!("unit missing"),
            };
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_numeric_extrapolation() {
        let plan = PropertyPlan::Numeric {
            from: 0.0,
            to: 100.0,
            unit: "px".to_string(),
        };
        assert_eq!(plan.evaluate(1.5, false).unwrap(), "150px");
        assert_eq!(plan.evaluate(-0.5, false).unwrap(), "-50px");
    }

    #[test]
    fn test_opaque_snaps_only_on_completion() {
        let plan = PropertyPlan::Opaque {
            to: "flex".to_string(),
        };
        assert_eq!(plan.evaluate(0.0, false), None);
        assert_eq!(plan.evaluate(0.999, false), None);
        // Eased progress past 1.0 without raw completion still waits.
        assert_eq!(plan.evaluate(1.2, false), None);
        assert_eq!(plan.evaluate(1.0, true), Some("flex".to_string()));
    }

    #[test]
    fn test_split_number_unit() {
        assert_eq!(split_number_unit("100px"), Some((100.0, "px")));
        assert_eq!(split_number_unit("-12.5em"), Some((-12.5, "em")));
        assert_eq!(split_number_unit("+3%"), Some((3.0, "%")));
        assert_eq!(split_number_unit("42"), Some((42.0, "")));
        assert_eq!(split_number_unit(" 7px "), Some((7.0, "px")));
        assert_eq!(split_number_unit("px"), None);
        assert_eq!(split_number_unit("10 px"), None);
        assert_eq!(split_number_unit("1.2.3"), None);
        assert_eq!(split_number_unit(""), None);
    }
}
