//! Glide: a style animation toolkit.
//!
//! This crate re-exports the public surface of the workspace:
//!
//! - [`glide_color`]: CSS color resolution (rgb/rgba, hex, oklch, named
//!   colors) and the [`ColorOracle`] normalization fallback
//! - [`glide_anim`]: the queueing animation engine itself
//! - [`glide_config`]: file and environment configuration

pub use glide_anim::{
    AnimationRequest, Animator, Easing, MemoryStyleSurface, PropertyPlan, StyleSurface,
    DEFAULT_DURATION_MS,
};
pub use glide_color::{resolve as resolve_color, ColorOracle, CssOracle, Rgba};
pub use glide_config::{AnimationConfig, EasingSpec, GlideConfig};
