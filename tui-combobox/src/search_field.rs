//! Cursor editing for the combobox input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of applying a key to the input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// The text changed
    Changed(String),
    /// Only the cursor moved
    Moved,
    /// The key is not an editing key
    Ignored,
}

/// Cursor state for the editable input
///
/// The text itself lives in the combobox's display text; this only tracks
/// where the cursor sits in it.
#[derive(Debug, Default)]
pub struct SearchField {
    /// Cursor position (byte index)
    cursor: usize,
}

impl SearchField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position as a byte index, clamped to `text`
    pub fn cursor(&self, text: &str) -> usize {
        let mut cursor = self.cursor.min(text.len());
        while cursor > 0 && !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        cursor
    }

    /// Cursor position in characters, for placing the terminal cursor
    pub fn cursor_column(&self, text: &str) -> usize {
        text[..self.cursor(text)].chars().count()
    }

    /// Put the cursor after the last character
    pub fn move_to_end(&mut self, text: &str) {
        self.cursor = text.len();
    }

    /// Apply a key press to `text`
    pub fn apply(&mut self, key: &KeyEvent, text: &str) -> Edit {
        self.cursor = self.cursor(text);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    Edit::Moved
                }
                KeyCode::Char('e') => {
                    self.cursor = text.len();
                    Edit::Moved
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    if text.is_empty() {
                        Edit::Moved
                    } else {
                        Edit::Changed(String::new())
                    }
                }
                _ => Edit::Ignored,
            };
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return Edit::Ignored;
        }

        match key.code {
            KeyCode::Char(c) => Edit::Changed(self.insert_char(text, c)),
            KeyCode::Backspace => self
                .delete_char_before(text)
                .map_or(Edit::Moved, Edit::Changed),
            KeyCode::Delete => self.delete_char_at(text).map_or(Edit::Moved, Edit::Changed),
            KeyCode::Left => {
                self.move_cursor_left(text);
                Edit::Moved
            }
            KeyCode::Right => {
                self.move_cursor_right(text);
                Edit::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                Edit::Moved
            }
            KeyCode::End => {
                self.cursor = text.len();
                Edit::Moved
            }
            _ => Edit::Ignored,
        }
    }

    fn move_cursor_left(&mut self, text: &str) {
        if let Some((i, _)) = text[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_cursor_right(&mut self, text: &str) {
        if let Some(c) = text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert_char(&mut self, text: &str, c: char) -> String {
        let mut next = String::with_capacity(text.len() + c.len_utf8());
        next.push_str(&text[..self.cursor]);
        next.push(c);
        next.push_str(&text[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    /// Backspace
    fn delete_char_before(&mut self, text: &str) -> Option<String> {
        let (start, _) = text[..self.cursor].char_indices().next_back()?;
        let mut next = String::with_capacity(text.len());
        next.push_str(&text[..start]);
        next.push_str(&text[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    /// Delete
    fn delete_char_at(&self, text: &str) -> Option<String> {
        let c = text[self.cursor..].chars().next()?;
        let mut next = String::with_capacity(text.len());
        next.push_str(&text[..self.cursor]);
        next.push_str(&text[self.cursor + c.len_utf8()..]);
        Some(next)
    }
}
