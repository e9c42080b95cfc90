use super::pane::{PaneId, ScrollEvent, ScrollOrigin, ScrollPane};

/// Default window during which echo scroll events are suppressed.
pub const DEFAULT_GUARD_MS: u64 = 50;

/// Guard state of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    /// A programmatic scroll was applied and the guard window is open.
    Syncing,
}

/// Why a sync call left both panes untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    /// The target pane is not bound.
    Unbound,
    /// Inside the guard window of a previous sync.
    Syncing,
    /// Ratio is NaN, infinite or outside `[0, 1]`.
    InvalidRatio,
    /// The reporting pane cannot scroll, so it has no ratio.
    NoOverflow,
    /// The event was caused by the coordinator itself.
    ProgrammaticEcho,
}

/// Result of a sync call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// The target pane was moved to `scroll_top`.
    Applied { target: PaneId, scroll_top: f64 },
    Skipped(SkipReason),
}

impl SyncOutcome {
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Keeps two panes at the same relative scroll position.
///
/// Owned by the editor session: created when both panes mount, released
/// with [`take_elements`](Self::take_elements) on unmount.
///
/// Each applied sync opens a guard window (`guard_ms`) during which every
/// further sync call, in either direction, is skipped. This absorbs the
/// scroll event the target pane fires in response to being moved. Hosts
/// that tag events with [`ScrollOrigin`] can set the window to 0 and rely
/// on [`handle_scroll`](Self::handle_scroll) dropping programmatic events.
#[derive(Debug)]
pub struct ScrollSync<P> {
    source: Option<P>,
    mirror: Option<P>,
    enabled: bool,
    guard_ms: u64,
    syncing_until: Option<u64>,
}

impl<P: ScrollPane> ScrollSync<P> {
    pub const fn new(guard_ms: u64) -> Self {
        Self {
            source: None,
            mirror: None,
            enabled: true,
            guard_ms,
            syncing_until: None,
        }
    }

    /// Bind (or rebind, or unbind with `None`) the two panes.
    ///
    /// Returns the previously bound panes.
    pub fn set_elements(&mut self, source: Option<P>, mirror: Option<P>) -> (Option<P>, Option<P>) {
        let previous = (
            std::mem::replace(&mut self.source, source),
            std::mem::replace(&mut self.mirror, mirror),
        );
        self.syncing_until = None;
        previous
    }

    /// Unbind both panes and hand them back.
    pub fn take_elements(&mut self) -> (Option<P>, Option<P>) {
        self.set_elements(None, None)
    }

    pub const fn enable_sync(&mut self) {
        self.enabled = true;
    }

    pub const fn disable_sync(&mut self) {
        self.enabled = false;
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn guard_ms(&self) -> u64 {
        self.guard_ms
    }

    pub fn state(&self, now_ms: u64) -> SyncState {
        match self.syncing_until {
            Some(until) if now_ms < until => SyncState::Syncing,
            _ => SyncState::Idle,
        }
    }

    pub fn is_syncing(&self, now_ms: u64) -> bool {
        self.state(now_ms) == SyncState::Syncing
    }

    /// Scroll the mirror to `ratio` of its scrollable range.
    pub fn sync_source_to_mirror(&mut self, ratio: f64, now_ms: u64) -> SyncOutcome {
        self.sync_to(PaneId::Mirror, ratio, now_ms)
    }

    /// Scroll the source to `ratio` of its scrollable range.
    pub fn sync_mirror_to_source(&mut self, ratio: f64, now_ms: u64) -> SyncOutcome {
        self.sync_to(PaneId::Source, ratio, now_ms)
    }

    /// Route a host scroll event to the opposite pane.
    ///
    /// Programmatic events are always dropped, so a coordinator-driven
    /// scroll can never feed back into another sync.
    pub fn handle_scroll(&mut self, event: ScrollEvent, now_ms: u64) -> SyncOutcome {
        if event.origin == ScrollOrigin::Programmatic {
            return skipped(SkipReason::ProgrammaticEcho, event.pane.other());
        }
        let Some(ratio) = event.metrics.ratio() else {
            return skipped(SkipReason::NoOverflow, event.pane.other());
        };
        self.sync_to(event.pane.other(), ratio, now_ms)
    }

    fn sync_to(&mut self, target: PaneId, ratio: f64, now_ms: u64) -> SyncOutcome {
        if !self.enabled {
            return skipped(SkipReason::Disabled, target);
        }
        if self.is_syncing(now_ms) {
            return skipped(SkipReason::Syncing, target);
        }
        if !(0.0..=1.0).contains(&ratio) {
            return skipped(SkipReason::InvalidRatio, target);
        }
        let pane = match target {
            PaneId::Source => self.source.as_mut(),
            PaneId::Mirror => self.mirror.as_mut(),
        };
        let Some(pane) = pane else {
            return skipped(SkipReason::Unbound, target);
        };

        let scroll_top = ratio * pane.metrics().max_scroll();
        self.syncing_until = Some(now_ms.saturating_add(self.guard_ms));
        pane.set_scroll_top(scroll_top);
        tracing::trace!(?target, ratio, scroll_top, "scroll synced");
        SyncOutcome::Applied { target, scroll_top }
    }

    pub const fn source(&self) -> Option<&P> {
        self.source.as_ref()
    }

    pub const fn mirror(&self) -> Option<&P> {
        self.mirror.as_ref()
    }

    /// Mutable access for host-driven changes (user scrolls, resizes).
    pub fn source_mut(&mut self) -> Option<&mut P> {
        self.source.as_mut()
    }

    pub fn mirror_mut(&mut self) -> Option<&mut P> {
        self.mirror.as_mut()
    }
}

impl<P: ScrollPane> Default for ScrollSync<P> {
    fn default() -> Self {
        Self::new(DEFAULT_GUARD_MS)
    }
}

fn skipped(reason: SkipReason, target: PaneId) -> SyncOutcome {
    tracing::debug!(?reason, ?target, "scroll sync skipped");
    SyncOutcome::Skipped(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::pane::{PaneMetrics, VirtualPane};

    fn bound() -> ScrollSync<VirtualPane> {
        let mut sync = ScrollSync::new(50);
        sync.set_elements(
            Some(VirtualPane::new(2000.0, 500.0)),
            Some(VirtualPane::new(1200.0, 400.0)),
        );
        sync
    }

    fn mirror_top(sync: &ScrollSync<VirtualPane>) -> f64 {
        sync.mirror().unwrap().scroll_top()
    }

    fn source_top(sync: &ScrollSync<VirtualPane>) -> f64 {
        sync.source().unwrap().scroll_top()
    }

    #[test]
    fn test_source_to_mirror_applies_ratio_of_mirror_range() {
        let mut sync = bound();
        let outcome = sync.sync_source_to_mirror(0.25, 0);
        assert_eq!(
            outcome,
            SyncOutcome::Applied {
                target: PaneId::Mirror,
                scroll_top: 200.0
            }
        );
        assert_eq!(mirror_top(&sync), 0.25 * (1200.0 - 400.0));
        assert_eq!(source_top(&sync), 0.0);
    }

    #[test]
    fn test_mirror_to_source_applies_ratio_of_source_range() {
        let mut sync = bound();
        assert!(sync.sync_mirror_to_source(1.0, 0).is_applied());
        assert_eq!(source_top(&sync), 1500.0);
    }

    #[test]
    fn test_guard_blocks_both_directions_until_window_elapses() {
        let mut sync = bound();
        assert!(sync.sync_source_to_mirror(0.5, 100).is_applied());
        assert_eq!(sync.state(100), SyncState::Syncing);

        assert_eq!(
            sync.sync_mirror_to_source(0.9, 120),
            SyncOutcome::Skipped(SkipReason::Syncing)
        );
        assert_eq!(
            sync.sync_source_to_mirror(0.9, 149),
            SyncOutcome::Skipped(SkipReason::Syncing)
        );
        assert_eq!(source_top(&sync), 0.0);
        assert_eq!(mirror_top(&sync), 400.0);

        assert_eq!(sync.state(150), SyncState::Idle);
        assert!(sync.sync_mirror_to_source(0.9, 150).is_applied());
    }

    #[test]
    fn test_disabled_sync_is_noop_until_reenabled() {
        let mut sync = bound();
        sync.disable_sync();
        assert_eq!(
            sync.sync_source_to_mirror(0.5, 0),
            SyncOutcome::Skipped(SkipReason::Disabled)
        );
        assert_eq!(
            sync.sync_mirror_to_source(0.5, 1000),
            SyncOutcome::Skipped(SkipReason::Disabled)
        );
        assert_eq!(sync.mirror().unwrap().writes(), 0);
        assert_eq!(sync.source().unwrap().writes(), 0);
        assert!(sync.source().is_some(), "bindings survive disable");

        sync.enable_sync();
        assert!(sync.sync_source_to_mirror(0.5, 2000).is_applied());
    }

    #[test]
    fn test_unbound_pane_is_silent_noop() {
        let mut sync: ScrollSync<VirtualPane> = ScrollSync::new(50);
        assert_eq!(
            sync.sync_source_to_mirror(0.5, 0),
            SyncOutcome::Skipped(SkipReason::Unbound)
        );
        sync.set_elements(Some(VirtualPane::new(1000.0, 100.0)), None);
        assert_eq!(
            sync.sync_source_to_mirror(0.5, 0),
            SyncOutcome::Skipped(SkipReason::Unbound)
        );
        assert!(!sync.is_syncing(0), "skipped call must not open the guard");
        assert!(sync.sync_mirror_to_source(0.5, 0).is_applied());
    }

    #[test]
    fn test_invalid_ratios_are_rejected() {
        let mut sync = bound();
        for ratio in [f64::NAN, f64::INFINITY, -0.1, 1.0001] {
            assert_eq!(
                sync.sync_source_to_mirror(ratio, 0),
                SyncOutcome::Skipped(SkipReason::InvalidRatio)
            );
        }
        assert_eq!(sync.mirror().unwrap().writes(), 0);
    }

    #[test]
    fn test_programmatic_event_never_syncs() {
        let mut sync: ScrollSync<VirtualPane> = ScrollSync::new(0);
        sync.set_elements(
            Some(VirtualPane::new(2000.0, 500.0)),
            Some(VirtualPane::new(1200.0, 400.0)),
        );
        let event = ScrollEvent::programmatic(PaneId::Mirror, PaneMetrics::new(400.0, 1200.0, 400.0));
        assert_eq!(
            sync.handle_scroll(event, 0),
            SyncOutcome::Skipped(SkipReason::ProgrammaticEcho)
        );
        assert_eq!(source_top(&sync), 0.0);
    }

    #[test]
    fn test_user_event_routes_to_other_pane() {
        let mut sync = bound();
        let event = sync
            .source_mut()
            .unwrap()
            .user_scroll_to(750.0, PaneId::Source);
        assert!(sync.handle_scroll(event, 0).is_applied());
        assert_eq!(mirror_top(&sync), 400.0);
    }

    #[test]
    fn test_user_event_without_overflow_is_skipped() {
        let mut sync = bound();
        let event = ScrollEvent::user(PaneId::Source, PaneMetrics::new(0.0, 300.0, 500.0));
        assert_eq!(
            sync.handle_scroll(event, 0),
            SyncOutcome::Skipped(SkipReason::NoOverflow)
        );
    }

    #[test]
    fn test_zero_guard_allows_immediate_user_scrolls() {
        let mut sync: ScrollSync<VirtualPane> = ScrollSync::new(0);
        sync.set_elements(
            Some(VirtualPane::new(2000.0, 500.0)),
            Some(VirtualPane::new(1200.0, 400.0)),
        );
        assert!(sync.sync_source_to_mirror(0.1, 10).is_applied());
        assert!(sync.sync_source_to_mirror(0.2, 10).is_applied());
        assert_eq!(mirror_top(&sync), 160.0);
    }

    #[test]
    fn test_rebinding_returns_previous_panes_and_resets_guard() {
        let mut sync = bound();
        sync.sync_source_to_mirror(1.0, 0);
        let (old_source, old_mirror) = sync.set_elements(
            Some(VirtualPane::new(900.0, 300.0)),
            Some(VirtualPane::new(900.0, 300.0)),
        );
        assert_eq!(old_mirror.unwrap().scroll_top(), 800.0);
        assert!(old_source.is_some());
        assert!(!sync.is_syncing(1));
        assert!(sync.sync_source_to_mirror(0.5, 1).is_applied());
        assert_eq!(mirror_top(&sync), 300.0);
    }

    #[test]
    fn test_take_elements_unbinds() {
        let mut sync = bound();
        let (source, mirror) = sync.take_elements();
        assert!(source.is_some() && mirror.is_some());
        assert_eq!(
            sync.sync_source_to_mirror(0.5, 0),
            SyncOutcome::Skipped(SkipReason::Unbound)
        );
    }
}
