//! The cooperative animation engine.
//!
//! [`Animator`] owns an explicit map from node id to [`NodeQueue`]; no
//! state is ever hung off the nodes themselves. Execution is
//! single-threaded and frame-driven: the host calls [`Animator::tick`]
//! once per display refresh with the current timestamp, and the engine
//! advances the active task of every queue. Enqueuing onto an idle node
//! starts the new task synchronously in the same call, so there is no
//! first-frame delay.
//!
//! There is no cancellation primitive: an active task always runs to raw
//! progress 1. Completion fires the task's callback exactly once, then
//! promotes the next pending request (if any) and steps it immediately,
//! so back-to-back requests chain within a single tick.
//!
//! # Usage
//!
//! ```
//! use glide_anim::{AnimationRequest, Animator, MemoryStyleSurface};
//!
//! let mut surface = MemoryStyleSurface::new();
//! surface.set_style("box", "left", "0px");
//!
//! let mut animator = Animator::new();
//! animator.animate(
//!     &mut surface,
//!     "box",
//!     AnimationRequest::new([("left", "100px")]).duration_ms(400.0),
//!     0.0,
//! );
//!
//! // The host's frame callback:
//! let more = animator.tick(&mut surface, 200.0);
//! assert!(more);
//! assert_eq!(surface.style("box", "left"), Some("50px"));
//! ```

use std::collections::HashMap;

use glide_color::{ColorOracle, CssOracle};
use glide_config::AnimationConfig;

use crate::queue::{ActiveTask, AnimationRequest, NodeQueue, TaskDefaults};
use crate::surface::StyleSurface;

/// Frame-driven animation engine with one FIFO queue per node.
pub struct Animator {
    queues: HashMap<String, NodeQueue>,
    oracle: Option<Box<dyn ColorOracle>>,
    defaults: TaskDefaults,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    /// Create an engine with the stock defaults (400 ms, linear easing)
    /// and the [`CssOracle`] color fallback.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            oracle: Some(Box::new(CssOracle)),
            defaults: TaskDefaults::default(),
        }
    }

    /// Create an engine from configuration.
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            defaults: TaskDefaults {
                duration_ms: config.default_duration_ms,
                easing: config.default_easing.into(),
            },
            ..Self::new()
        }
    }

    /// Replace the color-normalization oracle.
    pub fn with_oracle(mut self, oracle: Box<dyn ColorOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Drop the oracle; only the explicit color parsers apply.
    pub fn without_oracle(mut self) -> Self {
        self.oracle = None;
        self
    }

    /// Enqueue `request` for `node`, activating it immediately if the node
    /// was idle.
    ///
    /// Activation classifies every property against the node's current
    /// style and runs the first drive step before returning; a busy node
    /// queues the request strictly behind the in-flight entries.
    pub fn animate(
        &mut self,
        surface: &mut dyn StyleSurface,
        node: &str,
        request: AnimationRequest,
        now_ms: f64,
    ) {
        let queue = self.queues.entry(node.to_string()).or_default();
        queue.pending.push_back(request);
        tracing::debug!(node, depth = queue.len(), "animation enqueued");

        if queue.active.is_none() {
            drive_node(
                queue,
                self.oracle.as_deref(),
                &self.defaults,
                surface,
                node,
                now_ms,
            );
        }
        if queue.is_drained() {
            self.queues.remove(node);
        }
    }

    /// Enqueue one independent copy of `request` for every node of a
    /// selection. Per-node queues do not synchronize with each other.
    pub fn animate_all(
        &mut self,
        surface: &mut dyn StyleSurface,
        nodes: &[&str],
        request: AnimationRequest,
        now_ms: f64,
    ) {
        for node in nodes {
            self.animate(surface, node, request.clone(), now_ms);
        }
    }

    /// Advance every active task to `now_ms`: the body of the host's
    /// display-refresh callback.
    ///
    /// Returns `true` while any task remains active, i.e. while the host
    /// should keep requesting frames.
    pub fn tick(&mut self, surface: &mut dyn StyleSurface, now_ms: f64) -> bool {
        for (node, queue) in &mut self.queues {
            drive_node(
                queue,
                self.oracle.as_deref(),
                &self.defaults,
                surface,
                node,
                now_ms,
            );
        }
        self.queues.retain(|_, queue| !queue.is_drained());
        !self.queues.is_empty()
    }

    /// True when no node has pending or active work.
    pub fn is_idle(&self) -> bool {
        self.queues.is_empty()
    }

    /// Number of queued entries (active and pending) for `node`.
    pub fn queued_len(&self, node: &str) -> usize {
        self.queues.get(node).map_or(0, NodeQueue::len)
    }
}

/// Run one drive step for a node, chaining through completions.
///
/// Promotes the head request if nothing is active, evaluates every plan at
/// the current progress, and writes the results. When raw progress reaches
/// 1 the completion callback fires exactly once, the entry is discarded,
/// and the loop continues with the next pending request at the same
/// timestamp (which is how zero-duration chains settle in one call).
fn drive_node(
    queue: &mut NodeQueue,
    oracle: Option<&dyn ColorOracle>,
    defaults: &TaskDefaults,
    surface: &mut dyn StyleSurface,
    node: &str,
    now_ms: f64,
) {
    loop {
        if queue.active.is_none() {
            let Some(request) = queue.pending.pop_front() else {
                return;
            };
            tracing::trace!(node, "animation activated");
            queue.active = Some(ActiveTask::materialize(
                request, defaults, oracle, surface, node, now_ms,
            ));
        }
        let Some(task) = queue.active.as_ref() else {
            return;
        };

        let raw = task.raw_progress(now_ms);
        let eased = task.eased_progress(raw);
        let completed = raw >= 1.0;

        for (property, plan) in task.plans() {
            if let Some(value) = plan.evaluate(eased, completed) {
                surface.write_style(node, property, &value);
            }
        }

        if !completed {
            return;
        }

        if let Some(mut finished) = queue.active.take() {
            if let Some(callback) = finished.take_on_complete() {
                callback();
            }
        }
        tracing::debug!(node, "animation completed");
        // Loop to promote the next pending request, if any.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::surface::MemoryStyleSurface;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_numeric_midpoint_scenario() {
        // left: 0px -> 100px over 400ms, identity easing: 50px at 200ms.
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "left", "0px");

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("left", "100px")]).duration_ms(400.0),
            0.0,
        );
        assert_eq!(surface.style("box", "left"), Some("0px"));

        assert!(animator.tick(&mut surface, 200.0));
        assert_eq!(surface.style("box", "left"), Some("50px"));

        assert!(!animator.tick(&mut surface, 400.0));
        assert_eq!(surface.style("box", "left"), Some("100px"));
        assert!(animator.is_idle());
    }

    #[test]
    fn test_color_midpoint_scenario() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "color", "rgb(255, 0, 0)");

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("color", "blue")]).duration_ms(100.0),
            0.0,
        );
        animator.tick(&mut surface, 50.0);
        assert_eq!(surface.style("box", "color"), Some("rgb(128, 0, 128, 1)"));
    }

    #[test]
    fn test_first_step_runs_synchronously() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "opacity", "1");

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("opacity", "0")]).duration_ms(100.0),
            0.0,
        );
        // The write at raw progress 0 happened inside animate(): the
        // blend re-emits the starting value through the interpolator.
        assert_eq!(surface.style("box", "opacity"), Some("1"));
    }

    #[test]
    fn test_zero_duration_is_an_instant_snap() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "left", "0px");

        let completed = Rc::new(RefCell::new(false));
        let flag = completed.clone();

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("left", "100px")])
                .duration_ms(0.0)
                .on_complete(move || *flag.borrow_mut() = true),
            0.0,
        );

        // Snapped and completed inside animate(), no tick required.
        assert_eq!(surface.style("box", "left"), Some("100px"));
        assert!(*completed.borrow());
        assert!(animator.is_idle());
    }

    #[test]
    fn test_opaque_property_snaps_at_completion_only() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "display", "block");

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("display", "flex")]).duration_ms(100.0),
            0.0,
        );
        animator.tick(&mut surface, 50.0);
        assert_eq!(surface.style("box", "display"), Some("block"));

        animator.tick(&mut surface, 100.0);
        assert_eq!(surface.style("box", "display"), Some("flex"));
    }

    #[test]
    fn test_fifo_per_node() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "left", "0px");

        let order = Rc::new(RefCell::new(Vec::new()));
        let first = order.clone();
        let second = order.clone();

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("left", "100px")])
                .duration_ms(100.0)
                .on_complete(move || first.borrow_mut().push("first")),
            0.0,
        );
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("left", "200px")])
                .duration_ms(100.0)
                .on_complete(move || second.borrow_mut().push("second")),
            0.0,
        );
        assert_eq!(animator.queued_len("box"), 2);

        // Mid-flight of the first entry: second has not started.
        animator.tick(&mut surface, 50.0);
        assert_eq!(surface.style("box", "left"), Some("50px"));
        assert!(order.borrow().is_empty());

        // First completes; second activates in the same tick from 100px.
        animator.tick(&mut surface, 100.0);
        assert_eq!(*order.borrow(), vec!["first"]);
        assert_eq!(surface.style("box", "left"), Some("100px"));
        assert_eq!(animator.queued_len("box"), 1);

        animator.tick(&mut surface, 150.0);
        assert_eq!(surface.style("box", "left"), Some("150px"));

        assert!(!animator.tick(&mut surface, 200.0));
        assert_eq!(surface.style("box", "left"), Some("200px"));
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_nodes_run_independently() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("a", "left", "0px");
        surface.set_style("b", "top", "0px");

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "a",
            AnimationRequest::new([("left", "100px")]).duration_ms(100.0),
            0.0,
        );
        animator.animate(
            &mut surface,
            "b",
            AnimationRequest::new([("top", "100px")]).duration_ms(200.0),
            0.0,
        );

        animator.tick(&mut surface, 100.0);
        // "a" finished while "b" is only half way.
        assert_eq!(surface.style("a", "left"), Some("100px"));
        assert_eq!(surface.style("b", "top"), Some("50px"));
        assert_eq!(animator.queued_len("a"), 0);
        assert_eq!(animator.queued_len("b"), 1);
    }

    #[test]
    fn test_animate_all_fans_out() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("a", "opacity", "0");
        surface.set_style("b", "opacity", "0");

        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();

        let mut animator = Animator::new();
        let request = AnimationRequest::new([("opacity", "1")])
            .duration_ms(100.0)
            .on_complete(move || *counter.borrow_mut() += 1);
        animator.animate_all(&mut surface, &["a", "b"], request, 0.0);

        animator.tick(&mut surface, 100.0);
        assert_eq!(surface.style("a", "opacity"), Some("1"));
        assert_eq!(surface.style("b", "opacity"), Some("1"));
        // The shared callback fired once per node entry.
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_defaults_from_config() {
        let config = AnimationConfig {
            default_duration_ms: 100.0,
            default_easing: glide_config::EasingSpec::Linear,
        };

        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "left", "0px");

        let mut animator = Animator::from_config(&config);
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("left", "100px")]),
            0.0,
        );
        animator.tick(&mut surface, 50.0);
        assert_eq!(surface.style("box", "left"), Some("50px"));
    }

    #[test]
    fn test_eased_overshoot_extrapolates() {
        let mut surface = MemoryStyleSurface::new();
        surface.set_style("box", "left", "0px");

        let mut animator = Animator::new();
        animator.animate(
            &mut surface,
            "box",
            AnimationRequest::new([("left", "100px")])
                .duration_ms(100.0)
                .easing(Easing::Custom(|t| t * 1.5)),
            0.0,
        );
        animator.tick(&mut surface, 50.0);
        // Eased progress 0.75 of the way at raw 0.5.
        assert_eq!(surface.style("box", "left"), Some("75px"));
    }
}
