//! Single-line text buffer with a cursor

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::autoclose::EditBuffer;

/// A single block of text plus a byte cursor
///
/// The cursor always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    /// The text content (without trailing newline)
    text: String,
    /// Byte offset of the cursor
    cursor: usize,
}

impl LineBuffer {
    /// Create a new empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line with the cursor at the end
    pub fn from_string(s: String) -> Self {
        let cursor = s.len();
        Self { text: s, cursor }
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the display width of the line
    pub fn display_width(&self) -> usize {
        self.text.width()
    }

    /// Display column of the cursor
    pub fn cursor_col(&self) -> usize {
        self.text[..self.cursor].width()
    }

    /// Move the cursor one character left
    pub fn move_left(&mut self) {
        if let Some(ch) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    /// Move the cursor one character right
    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Take the text out, leaving an empty line
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Find the nearest valid UTF-8 char boundary at or before `pos`
    fn floor_char_boundary(&self, pos: usize) -> usize {
        if pos >= self.text.len() {
            return self.text.len();
        }
        let mut p = pos;
        while p > 0 && !self.text.is_char_boundary(p) {
            p -= 1;
        }
        p
    }
}

impl EditBuffer for LineBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, pos: usize) {
        self.cursor = self.floor_char_boundary(pos);
    }

    fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    fn delete_backward(&mut self) -> Option<char> {
        let ch = self.text[..self.cursor].chars().next_back()?;
        self.cursor -= ch.len_utf8();
        self.text.remove(self.cursor);
        Some(ch)
    }

    fn replace_range(&mut self, range: Range<usize>, s: &str) {
        let start = self.floor_char_boundary(range.start);
        let end = self.floor_char_boundary(range.end).max(start);
        self.text.replace_range(start..end, s);
        self.cursor = start + s.len();
    }
}

impl From<&str> for LineBuffer {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for LineBuffer {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line_operations() {
        let mut line = LineBuffer::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.len(), 5);
        assert_eq!(line.cursor(), 5);

        line.insert_str("!");
        assert_eq!(line.text(), "Hello!");
        assert_eq!(line.cursor(), 6);
    }

    #[test]
    fn test_cursor_stays_on_char_boundary() {
        let mut line = LineBuffer::from("café");
        line.set_cursor(4);
        assert_eq!(line.cursor(), 3);
        line.move_right();
        assert_eq!(line.cursor(), 5);
        line.move_left();
        line.move_left();
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn test_delete_backward_utf8() {
        let mut line = LineBuffer::from("a😀");
        assert_eq!(line.delete_backward(), Some('😀'));
        assert_eq!(line.text(), "a");
        assert_eq!(line.delete_backward(), Some('a'));
        assert_eq!(line.delete_backward(), None);
    }

    #[test]
    fn test_replace_range() {
        let mut line = LineBuffer::from("int x = fo;");
        line.replace_range(8..10, "foo");
        assert_eq!(line.text(), "int x = foo;");
        assert_eq!(line.cursor(), 11);
    }

    #[test]
    fn test_display_width() {
        let mut line = LineBuffer::from("你好");
        assert_eq!(line.len(), 6);
        assert_eq!(line.display_width(), 4);
        line.move_left();
        assert_eq!(line.cursor_col(), 2);
    }

    #[test]
    fn test_take() {
        let mut line = LineBuffer::from("int x;");
        assert_eq!(line.take(), "int x;");
        assert!(line.is_empty());
        assert_eq!(line.cursor(), 0);
    }
}
