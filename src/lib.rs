// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderError)
    clippy::module_name_repetitions
)]

//! # Quillpane
//!
//! The engine behind a split-pane markdown editor with live preview.
//!
//! Quillpane keeps a source pane and a rendered preview pane in step:
//! - Markdown converted to HTML with GitHub-flavored extensions
//! - Preview HTML sanitized against a fixed allow-list
//! - Debounced re-rendering that never shows a stale result
//! - Proportional scroll synchronization without feedback loops
//!
//! ## Architecture
//!
//! A session follows The Elm Architecture (TEA) pattern:
//! - **Model**: buffer, render pipeline and scroll coordinator
//! - **Message**: edits, scroll events and clock ticks from the host
//! - **Update**: state transitions driven by an explicit millisecond clock
//!
//! Nothing in the library reads the wall clock, so every timing rule is
//! testable by passing timestamps.
//!
//! ## Modules
//!
//! - [`sync`]: Scroll synchronization between two panes
//! - [`render`]: Markdown conversion, sanitization and the render pipeline
//! - [`debounce`]: Explicit-clock debouncing
//! - [`editor`]: Text buffer and formatting toolbar actions
//! - [`session`]: Session state and message handling
//! - [`watcher`]: File watching for the CLI's watch mode
//! - [`config`]: Saved CLI defaults

pub mod config;
pub mod debounce;
pub mod editor;
pub mod render;
pub mod session;
pub mod sync;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::render::{RenderOutput, RenderPipeline, Renderer};
    pub use crate::session::{Message, Model, SessionConfig, ViewMode, update};
    pub use crate::sync::{PaneId, PaneMetrics, ScrollEvent, ScrollPane, ScrollSync};
}
