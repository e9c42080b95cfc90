//! Editing session state and message handling.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: buffer, render pipeline, scroll coordinator and layout
//! - [`Message`]: everything the hosting view reports
//! - [`update`]: state transitions, driven by the host's millisecond clock
//!
//! A session's scroll coordinator lives exactly as long as its panes are
//! mounted: [`Model::mount`] binds them and [`Model::unmount`] hands them back.

mod model;
mod update;

pub use model::{Model, SessionConfig, ViewMode};
pub use update::{Message, update};

#[cfg(test)]
mod tests;
