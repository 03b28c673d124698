//! Per-node animation queues.
//!
//! Each animated node owns exactly one [`NodeQueue`], created lazily on
//! the first request and dropped once it drains. The head of the queue is
//! the only entry allowed to write styles; everything behind it is pending
//! and untouched. Requests never merge or cancel: a request targeting a
//! property already mid-flight queues strictly behind the active task.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::easing::Easing;
use crate::plan::PropertyPlan;
use crate::surface::StyleSurface;
use glide_color::ColorOracle;

/// Completion callback shared across the per-node clones of one request.
pub type CompletionCallback = Rc<dyn Fn()>;

/// An animation request as issued by a caller.
///
/// Immutable once enqueued. Duration and easing are optional; unset fields
/// take the engine defaults at activation time. Cloning is cheap so a
/// single request can fan out to every node of a selection, each node
/// getting its own independent queue entry.
#[derive(Clone)]
pub struct AnimationRequest {
    properties: Vec<(String, String)>,
    duration_ms: Option<f32>,
    easing: Option<Easing>,
    on_complete: Option<CompletionCallback>,
}

impl AnimationRequest {
    /// Create a request animating `properties` to their destination values.
    pub fn new<K, V, I>(properties: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            duration_ms: None,
            easing: None,
            on_complete: None,
        }
    }

    /// Set the duration in milliseconds. Non-positive durations snap to the
    /// destination on the first frame step.
    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Set a callback invoked exactly once when this entry completes.
    pub fn on_complete(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }

    /// The properties this request animates.
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// The requested duration, if one was set.
    pub fn requested_duration_ms(&self) -> Option<f32> {
        self.duration_ms
    }
}

impl fmt::Debug for AnimationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRequest")
            .field("properties", &self.properties)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Engine defaults filled into requests that leave duration or easing unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskDefaults {
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            duration_ms: crate::DEFAULT_DURATION_MS,
            easing: Easing::Linear,
        }
    }
}

/// A request materialized at the moment it reached the queue head.
///
/// Materialization reads the node's current style for every property and
/// classifies each (current, destination) pair into a fixed plan; from
/// then on the task only depends on time.
pub struct ActiveTask {
    started_at: f64,
    duration_ms: f32,
    easing: Easing,
    plans: Vec<(String, PropertyPlan)>,
    on_complete: Option<CompletionCallback>,
}

impl ActiveTask {
    /// Materialize `request` against the node's current styles.
    pub fn materialize(
        request: AnimationRequest,
        defaults: &TaskDefaults,
        oracle: Option<&dyn ColorOracle>,
        surface: &dyn StyleSurface,
        node: &str,
        now_ms: f64,
    ) -> Self {
        let mut plans = Vec::with_capacity(request.properties.len());
        for (property, destination) in request.properties {
            let current = surface.read_style(node, &property).unwrap_or_default();
            let plan = PropertyPlan::classify(&current, &destination, oracle);
            plans.push((property, plan));
        }

        Self {
            started_at: now_ms,
            duration_ms: request.duration_ms.unwrap_or(defaults.duration_ms),
            easing: request.easing.unwrap_or(defaults.easing),
            plans,
            on_complete: request.on_complete,
        }
    }

    /// Linear time fraction in [0, 1]. Non-positive durations saturate
    /// immediately, turning the task into an instant snap.
    pub fn raw_progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at) / self.duration_ms as f64).clamp(0.0, 1.0) as f32
    }

    /// Eased progress; may leave [0, 1] for overshooting curves.
    pub fn eased_progress(&self, raw: f32) -> f32 {
        self.easing.evaluate(raw)
    }

    /// The per-property plans of this task.
    pub fn plans(&self) -> &[(String, PropertyPlan)] {
        &self.plans
    }

    /// Take the completion callback, leaving none behind.
    pub fn take_on_complete(&mut self) -> Option<CompletionCallback> {
        self.on_complete.take()
    }
}

impl fmt::Debug for ActiveTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveTask")
            .field("started_at", &self.started_at)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("plans", &self.plans)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// FIFO queue of animation work for a single node.
///
/// Invariant: `active` is the materialized head; at most one task per node
/// drives style writes at any time.
#[derive(Debug, Default)]
pub struct NodeQueue {
    pub(crate) active: Option<ActiveTask>,
    pub(crate) pending: VecDeque<AnimationRequest>,
}

impl NodeQueue {
    /// True once both the active slot and the pending list are empty.
    pub fn is_drained(&self) -> bool {
        self.active.is_none() && self.pending.is_empty()
    }

    /// Number of entries, counting the active task.
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.active.is_some())
    }

    /// True when the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
