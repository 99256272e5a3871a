//! Scroll controller.
//!
//! Two kinds of scroll happen on a documentation page: back to the top of
//! the content container after a load, and to a heading anchor when the URL
//! carries a fragment or a table of contents link is clicked. Both are fixed
//! duration animations. Starting a new animation replaces the one in flight.

use std::time::Duration;

/// A scroll request emitted by the navigation state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Scroll the content container to its top.
    Top,
    /// Scroll to the element with this anchor id.
    Anchor(String),
}

/// Easing curve applied to animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Accelerate then decelerate (quadratic).
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Scroll timing and geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollSettings {
    /// Duration of scroll-to-top after a load.
    pub top_duration: Duration,
    /// Duration of scroll-to-anchor.
    pub anchor_duration: Duration,
    /// Height of the sticky header; anchors stop this far below the top.
    pub header_offset: f64,
    /// Easing used by both animations.
    pub easing: Easing,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            top_duration: Duration::from_millis(300),
            anchor_duration: Duration::from_millis(600),
            header_offset: 85.0,
            easing: Easing::EaseInOut,
        }
    }
}

/// Scrollable content container.
pub trait Viewport {
    /// Current vertical scroll position.
    fn scroll_top(&self) -> f64;

    /// Vertical position of the element with anchor `id`, if present.
    fn anchor_top(&self, id: &str) -> Option<f64>;

    /// Move to a vertical scroll position.
    fn set_scroll_top(&mut self, position: f64);
}

/// A single scroll animation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollAnimation {
    /// Start position.
    pub from: f64,
    /// Target position.
    pub to: f64,
    /// Total duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl ScrollAnimation {
    /// Position after `elapsed` time.
    pub fn position_at(&self, elapsed: Duration) -> f64 {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }

    /// Whether the animation has reached its target after `elapsed`.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Runs scroll commands against a viewport, one animation at a time.
#[derive(Debug, Default)]
pub struct ScrollController {
    settings: ScrollSettings,
    active: Option<(ScrollAnimation, Duration)>,
}

impl ScrollController {
    /// Create a controller with the given settings.
    pub fn new(settings: ScrollSettings) -> Self {
        Self {
            settings,
            active: None,
        }
    }

    /// Scroll settings in use.
    pub fn settings(&self) -> &ScrollSettings {
        &self.settings
    }

    /// Animation currently in flight.
    pub fn active(&self) -> Option<&ScrollAnimation> {
        self.active.as_ref().map(|(animation, _)| animation)
    }

    /// Start the animation for `command`, cancelling any in flight.
    ///
    /// Returns the started animation, or `None` when the anchor does not
    /// exist in the viewport.
    pub fn start(
        &mut self,
        command: &ScrollCommand,
        viewport: &dyn Viewport,
    ) -> Option<&ScrollAnimation> {
        let (to, duration) = match command {
            ScrollCommand::Top => (0.0, self.settings.top_duration),
            ScrollCommand::Anchor(id) => {
                let Some(top) = viewport.anchor_top(id) else {
                    tracing::debug!(anchor = %id, "Scroll target not found");
                    self.active = None;
                    return None;
                };
                (
                    (top - self.settings.header_offset).max(0.0),
                    self.settings.anchor_duration,
                )
            }
        };

        if self.active.is_some() {
            tracing::debug!("Cancelling in-flight scroll");
        }
        let animation = ScrollAnimation {
            from: viewport.scroll_top(),
            to,
            duration,
            easing: self.settings.easing,
        };
        self.active = Some((animation, Duration::ZERO));
        self.active()
    }

    /// Advance the active animation by `delta` and apply it to the viewport.
    ///
    /// Returns `true` while an animation is still running.
    pub fn tick(&mut self, delta: Duration, viewport: &mut dyn Viewport) -> bool {
        let Some((animation, elapsed)) = self.active.as_mut() else {
            return false;
        };
        *elapsed += delta;
        viewport.set_scroll_top(animation.position_at(*elapsed));

        if animation.is_finished(*elapsed) {
            self.active = None;
            false
        } else {
            true
        }
    }

    /// Run the active animation to completion.
    pub fn finish(&mut self, viewport: &mut dyn Viewport) {
        if let Some((animation, _)) = self.active.take() {
            viewport.set_scroll_top(animation.to);
        }
    }
}
