//! Glide configuration system
//!
//! This crate provides centralized configuration for the animation engine,
//! loading settings from `glide.toml` as an alternative to environment
//! variables. Every field has a default, so a missing or partial file is
//! never an error for the `load_or_default` path.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Glide
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlideConfig {
    /// Animation engine settings
    pub animation: AnimationConfig,
}

/// Animation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration applied to requests that do not specify one, in milliseconds
    pub default_duration_ms: f32,
    /// Easing applied to requests that do not specify one
    pub default_easing: EasingSpec,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 400.0,
            default_easing: EasingSpec::Linear,
        }
    }
}

/// Serializable easing selection for configuration files.
///
/// This is the declarative subset of the runtime easing type: custom
/// caller-supplied easing functions exist only in code, not in config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingSpec {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// CSS `ease` - Slow start, fast middle, slow end.
    Ease,
    /// CSS `ease-in` - Slow start, accelerating.
    EaseIn,
    /// CSS `ease-out` - Fast start, decelerating.
    EaseOut,
    /// CSS `ease-in-out` - Slow start and end, fast middle.
    EaseInOut,
    /// Custom cubic bezier curve.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl GlideConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the glide.toml configuration file
    ///
    /// # Returns
    /// * `Ok(GlideConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (glide.toml in the
    /// current directory) or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("glide.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("GLIDE_DURATION_MS") {
            if let Ok(duration) = val.parse::<f32>() {
                self.animation.default_duration_ms = duration;
            }
        }
        if let Ok(val) = std::env::var("GLIDE_EASING") {
            if let Some(easing) = EasingSpec::from_keyword(&val) {
                self.animation.default_easing = easing;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from glide.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

impl EasingSpec {
    /// Parse a CSS-style easing keyword. Bezier parameters are config-file
    /// only and have no keyword form.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "linear" => Some(Self::Linear),
            "ease" => Some(Self::Ease),
            "ease-in" => Some(Self::EaseIn),
            "ease-out" => Some(Self::EaseOut),
            "ease-in-out" => Some(Self::EaseInOut),
            _ => None,
        }
    }
}
