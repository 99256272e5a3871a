//! Viewport without a layout engine.

use std::collections::HashMap;

use docpage_nav::Viewport;

/// Viewport with fixed anchor positions.
///
/// Used where no real layout exists: server-side rendering, the CLI and
/// tests. Anchors are registered up front with their vertical offsets.
#[derive(Debug, Default, Clone)]
pub struct StaticViewport {
    top: f64,
    anchors: HashMap<String, f64>,
}

impl StaticViewport {
    /// Create an empty viewport scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an anchor at vertical position `top`.
    #[must_use]
    pub fn with_anchor(mut self, id: impl Into<String>, top: f64) -> Self {
        self.anchors.insert(id.into(), top);
        self
    }

    /// Replace all anchors.
    pub fn set_anchors(&mut self, anchors: impl IntoIterator<Item = (String, f64)>) {
        self.anchors = anchors.into_iter().collect();
    }
}

impl Viewport for StaticViewport {
    fn scroll_top(&self) -> f64 {
        self.top
    }

    fn anchor_top(&self, id: &str) -> Option<f64> {
        self.anchors.get(id).copied()
    }

    fn set_scroll_top(&mut self, position: f64) {
        self.top = position;
    }
}
