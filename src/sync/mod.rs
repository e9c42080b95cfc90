//! Scroll synchronization between the editor and preview panes.
//!
//! Positions are mapped by ratio: a pane scrolled `r` of the way through
//! its scrollable range moves the other pane to `r` of its own range.

mod coordinator;
mod pane;

pub use coordinator::{DEFAULT_GUARD_MS, ScrollSync, SkipReason, SyncOutcome, SyncState};
pub use pane::{PaneId, PaneMetrics, ScrollEvent, ScrollOrigin, ScrollPane, VirtualPane};
