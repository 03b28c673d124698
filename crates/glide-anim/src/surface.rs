//! Style surface abstraction.
//!
//! The engine never touches a real display. It reads current style values
//! through [`StyleSurface`] when a task activates and writes interpolated
//! values back through it every frame; the host decides what a "node" is.
//! [`MemoryStyleSurface`] is the in-memory implementation used by tests
//! and demos, where logical time stands in for a display clock.

use std::collections::HashMap;

/// Host boundary for reading and writing per-node style values.
pub trait StyleSurface {
    /// Read the current value of `property` on `node`, if any.
    fn read_style(&self, node: &str, property: &str) -> Option<String>;

    /// Write `value` as the new value of `property` on `node`.
    fn write_style(&mut self, node: &str, property: &str, value: &str);
}

/// In-memory [`StyleSurface`] keyed by node id.
#[derive(Debug, Default, Clone)]
pub struct MemoryStyleSurface {
    styles: HashMap<String, HashMap<String, String>>,
}

impl MemoryStyleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a style value, e.g. to model a node's computed style before an
    /// animation starts.
    pub fn set_style(&mut self, node: &str, property: &str, value: &str) {
        self.styles
            .entry(node.to_string())
            .or_default()
            .insert(property.to_string(), value.to_string());
    }

    /// Current value of `property` on `node`.
    pub fn style(&self, node: &str, property: &str) -> Option<&str> {
        self.styles.get(node)?.get(property).map(String::as_str)
    }
}

impl StyleSurface for MemoryStyleSurface {
    fn read_style(&self, node: &str, property: &str) -> Option<String> {
        self.style(node, property).map(str::to_string)
    }

    fn write_style(&mut self, node: &str, property: &str, value: &str) {
        self.set_style(node, property, value);
    }
}
