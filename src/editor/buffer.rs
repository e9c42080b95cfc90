use std::ops::Range;

use ropey::Rope;

use super::format::MarkdownFormat;

/// Line/column position, both zero-based, column counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
}

/// Word, character and line counts for the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
    pub lines: usize,
}

/// The markdown source of an editing session, backed by a rope.
///
/// Positions are char indices. A selection is the span between the anchor
/// and the cursor; with no anchor the selection is empty.
pub struct EditorBuffer {
    rope: Rope,
    cursor: usize,
    anchor: Option<usize>,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            anchor: None,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Cursor as a char index.
    pub const fn cursor_pos(&self) -> usize {
        self.cursor
    }

    /// Cursor as line and column.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.cursor);
        Cursor {
            line,
            col: self.cursor - self.rope.line_to_char(line),
        }
    }

    /// Selected char range, ordered; empty when nothing is selected.
    pub fn selection(&self) -> Range<usize> {
        let anchor = self.anchor.unwrap_or(self.cursor);
        anchor.min(self.cursor)..anchor.max(self.cursor)
    }

    pub fn selected_text(&self) -> String {
        self.rope.slice(self.selection()).to_string()
    }

    /// Select `range`, leaving the cursor at its end. Out-of-bounds ends are clamped.
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.anchor = Some(start);
        self.cursor = end;
    }

    /// Move the cursor and drop the selection.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len_chars());
        self.anchor = None;
    }

    /// Replace the selection (or insert at the cursor) with `s`.
    pub fn insert_str(&mut self, s: &str) {
        let range = self.selection();
        if s.is_empty() && range.is_empty() {
            return;
        }
        self.rope.remove(range.clone());
        self.rope.insert(range.start, s);
        self.cursor = range.start + s.chars().count();
        self.anchor = None;
        self.dirty = true;
    }

    /// Delete the selection, or the char before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        let range = self.selection();
        if !range.is_empty() {
            self.delete_range(range);
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        self.delete_range(self.cursor - 1..self.cursor);
        true
    }

    /// Delete the selection, or the char at the cursor (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let range = self.selection();
        if !range.is_empty() {
            self.delete_range(range);
            return true;
        }
        if self.cursor >= self.len_chars() {
            return false;
        }
        self.delete_range(self.cursor..self.cursor + 1);
        true
    }

    fn delete_range(&mut self, range: Range<usize>) {
        self.rope.remove(range.clone());
        self.cursor = range.start;
        self.anchor = None;
        self.dirty = true;
    }

    /// Replace the whole content, as when the host editor reports a new value.
    ///
    /// The cursor is clamped into the new text. Returns `false` if the
    /// content is unchanged.
    pub fn replace_all(&mut self, text: &str) -> bool {
        if self.rope == text {
            return false;
        }
        self.rope = Rope::from_str(text);
        self.cursor = self.cursor.min(self.len_chars());
        self.anchor = None;
        self.dirty = true;
        true
    }

    /// Apply a toolbar format around the selection.
    ///
    /// With a selection, the markers wrap it and the cursor lands after the
    /// closing marker. Without one, the markers are inserted and the cursor
    /// lands between them, ready for typing.
    pub fn apply_format(&mut self, format: MarkdownFormat) {
        let (before, after) = format.markers();
        let selected = self.selected_text();
        let start = self.selection().start;
        self.insert_str(&format!("{before}{selected}{after}"));
        if selected.is_empty() {
            self.cursor = start + before.chars().count();
        }
    }

    pub fn stats(&self) -> TextStats {
        let words = self
            .rope
            .lines()
            .map(|line| line.to_string().split_whitespace().count())
            .sum();
        TextStats {
            words,
            chars: self.len_chars(),
            lines: self.line_count(),
        }
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("dirty", &self.dirty)
            .finish()
    }
}
