//! The markdown source being edited.
//!
//! Provides a rope-backed text buffer with cursor and selection handling,
//! plus the toolbar formatting actions (bold, headings, links, ...).

mod buffer;
mod format;

pub use buffer::{Cursor, EditorBuffer, TextStats};
pub use format::MarkdownFormat;
