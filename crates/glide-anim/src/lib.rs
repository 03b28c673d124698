//! Glide animation engine
//!
//! A frame-driven style animation engine with one FIFO queue per node.
//! The pipeline has four stages:
//!
//! - **classify** ([`plan`]): pair each requested property's destination
//!   with the node's current value and fix an interpolation plan (color,
//!   numeric-with-unit, or opaque snap)
//! - **ease** ([`easing`]): map raw time fraction through an easing
//!   curve; overshooting curves are allowed to leave [0, 1]
//! - **evaluate** ([`plan`]): produce the style string for the current
//!   eased progress
//! - **drive** ([`engine`]): advance every queue once per host frame,
//!   firing completion callbacks and promoting queued requests
//!
//! The engine never touches a real document: it reads and writes styles
//! through the [`StyleSurface`] trait, with [`MemoryStyleSurface`]
//! provided for hosts and tests that keep styles in memory.

pub mod easing;
pub mod engine;
pub mod plan;
pub mod queue;
pub mod surface;

pub use easing::Easing;
pub use engine::Animator;
pub use plan::PropertyPlan;
pub use queue::{AnimationRequest, CompletionCallback, NodeQueue, TaskDefaults};
pub use surface::{MemoryStyleSurface, StyleSurface};

/// Duration used when a request does not specify one, in milliseconds.
pub const DEFAULT_DURATION_MS: f32 = 400.0;
