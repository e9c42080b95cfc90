//! Scrollable panes as seen by the coordinator.

/// Scroll geometry of one pane, in host units (pixels, rows, ...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl PaneMetrics {
    pub const fn new(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            viewport_height,
        }
    }

    /// Scrollable range: content height minus viewport height, never negative.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }

    /// Scroll offset as a fraction of the scrollable range, clamped to `[0, 1]`.
    ///
    /// Returns `None` when the pane has no overflow or the geometry is not
    /// finite, since no meaningful ratio exists.
    pub fn ratio(&self) -> Option<f64> {
        let range = self.max_scroll();
        if !(range.is_finite() && self.scroll_top.is_finite()) || range <= 0.0 {
            return None;
        }
        Some((self.scroll_top / range).clamp(0.0, 1.0))
    }
}

/// A scrollable region the coordinator can read and move.
pub trait ScrollPane {
    fn metrics(&self) -> PaneMetrics;

    /// Move the pane. Hosts should tag the resulting scroll event as
    /// [`ScrollOrigin::Programmatic`].
    fn set_scroll_top(&mut self, scroll_top: f64);
}

/// Which side of the split a pane sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    /// The editor, whose scroll drives the preview.
    Source,
    /// The preview.
    Mirror,
}

impl PaneId {
    pub const fn other(self) -> Self {
        match self {
            Self::Source => Self::Mirror,
            Self::Mirror => Self::Source,
        }
    }
}

/// Who caused a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOrigin {
    User,
    /// Caused by the coordinator writing the pane's scroll position.
    Programmatic,
}

/// A scroll event reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub pane: PaneId,
    pub metrics: PaneMetrics,
    pub origin: ScrollOrigin,
}

impl ScrollEvent {
    pub const fn user(pane: PaneId, metrics: PaneMetrics) -> Self {
        Self {
            pane,
            metrics,
            origin: ScrollOrigin::User,
        }
    }

    pub const fn programmatic(pane: PaneId, metrics: PaneMetrics) -> Self {
        Self {
            pane,
            metrics,
            origin: ScrollOrigin::Programmatic,
        }
    }
}

/// In-memory pane for headless hosts and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualPane {
    metrics: PaneMetrics,
    writes: usize,
}

impl VirtualPane {
    pub const fn new(scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            metrics: PaneMetrics::new(0.0, scroll_height, viewport_height),
            writes: 0,
        }
    }

    pub const fn scroll_top(&self) -> f64 {
        self.metrics.scroll_top
    }

    /// Number of programmatic scroll writes received.
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Simulate the user scrolling; returns the event the host would report.
    pub fn user_scroll_to(&mut self, scroll_top: f64, pane: PaneId) -> ScrollEvent {
        self.metrics.scroll_top = scroll_top.clamp(0.0, self.metrics.max_scroll());
        ScrollEvent::user(pane, self.metrics)
    }

    /// Content height changed (e.g. the preview re-rendered).
    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.metrics.scroll_height = scroll_height;
        self.metrics.scroll_top = self.metrics.scroll_top.min(self.metrics.max_scroll());
    }
}

impl ScrollPane for VirtualPane {
    fn metrics(&self) -> PaneMetrics {
        self.metrics
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        self.metrics.scroll_top = scroll_top;
        self.writes += 1;
    }
}
