//! Text buffer contract and the rope-backed default implementation.
//!
//! The session model never inherits from a text component; it holds an
//! opaque `TextBuffer` capability and forwards the handful of edit
//! primitives the shell needs.

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Borrow the slice as a str when it is contiguous, copy otherwise.
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Capability interface over the text-editing collaborator.
///
/// Cursor columns are grapheme indices, rows are line indices.
pub trait TextBuffer {
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    fn len_lines(&self) -> usize;

    /// Line content without the trailing newline.
    fn line(&self, row: usize) -> Option<String>;

    fn line_grapheme_len(&self, row: usize) -> usize;

    fn is_empty(&self) -> bool;

    fn cursor(&self) -> (usize, usize);

    fn set_cursor(&mut self, row: usize, col: usize);

    fn insert_char(&mut self, c: char);

    fn insert_str(&mut self, s: &str);

    /// Backspace at the cursor. Returns false at the start of the buffer.
    fn delete_backward(&mut self) -> bool;

    /// Delete at the cursor. Returns false at the end of the buffer.
    fn delete_forward(&mut self) -> bool;
}

#[derive(Clone)]
pub struct RopeBuffer {
    rope: Rope,
    cursor: (usize, usize),
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: (0, 0),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
        }
    }

    fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        line.graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    fn pos_to_char(&self, pos: (usize, usize)) -> usize {
        self.rope.line_to_char(pos.0) + self.grapheme_to_char_index(pos.0, pos.1)
    }
}

impl TextBuffer for RopeBuffer {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = (0, 0);
    }

    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn line(&self, row: usize) -> Option<String> {
        if row < self.rope.len_lines() {
            let line = slice_to_cow(self.rope.line(row));
            Some(line.strip_suffix('\n').unwrap_or(&line).to_string())
        } else {
            None
        }
    }

    fn line_grapheme_len(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }
        let line = slice_to_cow(self.rope.line(row));
        let without_newline = line.strip_suffix('\n').unwrap_or(&line);
        without_newline.graphemes(true).count()
    }

    fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.rope.len_lines().saturating_sub(1));
        let col = col.min(self.line_grapheme_len(row));
        self.cursor = (row, col);
    }

    fn insert_char(&mut self, c: char) {
        let offset = self.pos_to_char(self.cursor);
        self.rope.insert_char(offset, c);
        self.cursor = if c == '\n' {
            (self.cursor.0 + 1, 0)
        } else {
            (self.cursor.0, self.cursor.1 + 1)
        };
    }

    fn insert_str(&mut self, s: &str) {
        let offset = self.pos_to_char(self.cursor);
        self.rope.insert(offset, s);

        let newlines = s.chars().filter(|&c| c == '\n').count();
        self.cursor = if newlines > 0 {
            let tail = &s[s.rfind('\n').map(|i| i + 1).unwrap_or(0)..];
            (self.cursor.0 + newlines, tail.graphemes(true).count())
        } else {
            (self.cursor.0, self.cursor.1 + s.graphemes(true).count())
        };
    }

    fn delete_backward(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            let start = self.pos_to_char((row, col - 1));
            let end = self.pos_to_char((row, col));
            self.rope.remove(start..end);
            self.cursor = (row, col - 1);
            true
        } else if row > 0 {
            let prev_len = self.line_grapheme_len(row - 1);
            let end = self.pos_to_char((row, 0));
            self.rope.remove(end - 1..end);
            self.cursor = (row - 1, prev_len);
            true
        } else {
            false
        }
    }

    fn delete_forward(&mut self) -> bool {
        let (row, col) = self.cursor;
        let line_len = self.line_grapheme_len(row);
        if col < line_len {
            let start = self.pos_to_char((row, col));
            let end = self.pos_to_char((row, col + 1));
            self.rope.remove(start..end);
            true
        } else if row + 1 < self.rope.len_lines() {
            let start = self.pos_to_char((row, col));
            self.rope.remove(start..start + 1);
            true
        } else {
            false
        }
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new()
    }
}
