use std::ops::Range;

use super::model::{Model, ViewMode};
use crate::editor::MarkdownFormat;
use crate::sync::{ScrollEvent, ScrollPane};

/// Everything the hosting view can tell a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Editing
    /// The host editor reported its full new content
    ContentReplaced(String),
    /// Type or paste at the cursor, replacing any selection
    InsertText(String),
    /// Backspace
    DeleteBack,
    /// Delete
    DeleteForward,
    /// Select a char range
    Select(Range<usize>),
    /// Place the cursor at a char index
    MoveCursor(usize),
    /// Toolbar formatting action
    Format(MarkdownFormat),

    // Scrolling
    /// A pane scrolled
    Scrolled(ScrollEvent),
    /// Flip scroll sync on or off
    ToggleScrollSync,

    // Layout
    /// Switch between editor, preview and split layouts
    SetViewMode(ViewMode),

    // Lifecycle
    /// The document was persisted by the host
    MarkSaved,
    /// Time passed; lets the debounced render fire
    Tick,
}

/// Apply `msg` at time `now_ms` and return the new state.
pub fn update<P: ScrollPane>(mut model: Model<P>, msg: Message, now_ms: u64) -> Model<P> {
    match msg {
        // Editing
        Message::ContentReplaced(text) => {
            if model.buffer.replace_all(&text) {
                model.content_changed(now_ms);
            }
        }
        Message::InsertText(text) => {
            model.buffer.insert_str(&text);
            model.content_changed(now_ms);
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                model.content_changed(now_ms);
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                model.content_changed(now_ms);
            }
        }
        Message::Select(range) => model.buffer.select(range),
        Message::MoveCursor(pos) => model.buffer.set_cursor(pos),
        Message::Format(format) => {
            model.buffer.apply_format(format);
            model.content_changed(now_ms);
        }

        // Scrolling
        Message::Scrolled(event) => {
            if model.view_mode.is_split() {
                model.sync.handle_scroll(event, now_ms);
            }
        }
        Message::ToggleScrollSync => {
            if model.sync.is_enabled() {
                model.sync.disable_sync();
            } else {
                model.sync.enable_sync();
            }
        }

        // Layout
        Message::SetViewMode(mode) => model.view_mode = mode,

        // Lifecycle
        Message::MarkSaved => model.buffer.mark_clean(),
        Message::Tick => {
            model.pipeline.tick(now_ms);
        }
    }
    model
}
