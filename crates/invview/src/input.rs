#![forbid(unsafe_code)]

//! Single-line text input with a grapheme-indexed cursor.

use unicode_segmentation::UnicodeSegmentation;

/// Longest value the field accepts, in graphemes. Extra input is dropped.
pub const MAX_GRAPHEMES: usize = 64;

/// An edit applied to an [`InputField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    /// Pasted text; line breaks are dropped.
    InsertStr(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// Text plus a cursor measured in grapheme clusters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    text: String,
    cursor: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut field = Self::default();
        field.apply(&InputEdit::InsertStr(text.into()));
        field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in graphemes, `0..=grapheme_count()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Text before the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_offset(self.cursor)]
    }

    fn byte_offset(&self, grapheme: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn insert_str(&mut self, s: &str) -> bool {
        let before = self.grapheme_count();
        let room = MAX_GRAPHEMES.saturating_sub(before);
        let end = s
            .grapheme_indices(true)
            .nth(room)
            .map_or(s.len(), |(i, _)| i);
        let s = &s[..end];
        if s.is_empty() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        // Combining marks can merge with a neighbour, so measure the growth.
        let grown = self.grapheme_count().saturating_sub(before);
        self.cursor = (self.cursor + grown).min(self.grapheme_count());
        true
    }

    fn remove_grapheme(&mut self, index: usize) {
        let start = self.byte_offset(index);
        let end = self.byte_offset(index + 1);
        self.text.replace_range(start..end, "");
    }

    /// Apply one edit. Returns `true` if the text changed.
    pub fn apply(&mut self, edit: &InputEdit) -> bool {
        let len = self.grapheme_count();
        match edit {
            InputEdit::Insert(c) => {
                if c.is_control() {
                    return false;
                }
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf))
            }
            InputEdit::InsertStr(s) => {
                let clean: String = s.chars().filter(|c| !c.is_control()).collect();
                self.insert_str(&clean)
            }
            InputEdit::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                self.remove_grapheme(self.cursor);
                true
            }
            InputEdit::Delete => {
                if self.cursor >= len {
                    return false;
                }
                self.remove_grapheme(self.cursor);
                true
            }
            InputEdit::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            InputEdit::Right => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            InputEdit::Home => {
                self.cursor = 0;
                false
            }
            InputEdit::End => {
                self.cursor = len;
                false
            }
            InputEdit::Clear => {
                let changed = !self.text.is_empty();
                self.text.clear();
                self.cursor = 0;
                changed
            }
        }
    }
}
