use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// A single-line editable text buffer.
///
/// The session only reads and writes whole-buffer content; cursor handling
/// is entirely up to the implementation.
pub trait TextEntry {
    fn content(&self) -> &str;
    fn set_content(&mut self, text: &str);
    fn handle_key(&mut self, key: KeyEvent);
    /// Cursor column in terminal cells
    fn cursor_position(&self) -> usize;
}

/// Grapheme-aware single-line editor
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    fn delete_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    fn delete_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }
}

impl TextEntry for LineEditor {
    fn content(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer and park the cursor at the end.
    fn set_content(&mut self, text: &str) {
        self.buffer = text.replace(['\n', '\r'], " ");
        self.cursor = self.buffer.len();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => self.cursor = 0,
            (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.buffer.len()
            }
            (m, _) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            (_, KeyCode::Char(c)) => self.insert(c),
            (_, KeyCode::Left) => self.left(),
            (_, KeyCode::Right) => self.right(),
            (_, KeyCode::Home) => self.cursor = 0,
            (_, KeyCode::End) => self.cursor = self.buffer.len(),
            (_, KeyCode::Backspace) => self.delete_left(),
            (_, KeyCode::Delete) => self.delete_right(),
            _ => {}
        }
    }

    fn cursor_position(&self) -> usize {
        unicode::display_col(&self.buffer, self.cursor)
    }
}
