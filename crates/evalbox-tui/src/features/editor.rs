//! Command editor cursor and text editing.
//!
//! The text itself lives in the persisted state; the editor only tracks the
//! cursor (a char offset) and produces the edited text for the reducer to
//! save.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditorState {
    cursor: usize,
}

impl EditorState {
    /// Places the cursor after the last character of `text`.
    pub fn at_end(text: &str) -> Self {
        Self {
            cursor: text.chars().count(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts `s` at the cursor and returns the new text.
    pub fn insert(&mut self, text: &str, s: &str) -> String {
        let at = byte_index(text, self.cursor);
        let mut out = String::with_capacity(text.len() + s.len());
        out.push_str(&text[..at]);
        out.push_str(s);
        out.push_str(&text[at..]);
        self.cursor += s.chars().count();
        out
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self, text: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(remove_char(text, self.cursor))
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self, text: &str) -> Option<String> {
        if self.cursor >= text.chars().count() {
            return None;
        }
        Some(remove_char(text, self.cursor))
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self, text: &str) {
        self.cursor = (self.cursor + 1).min(text.chars().count());
    }

    pub fn move_home(&mut self, text: &str) {
        let (_, col) = self.line_col(text);
        self.cursor -= col;
    }

    pub fn move_end(&mut self, text: &str) {
        let (line, col) = self.line_col(text);
        let len = line_lengths(text)[line];
        self.cursor += len - col;
    }

    pub fn move_up(&mut self, text: &str) {
        let (line, col) = self.line_col(text);
        if line > 0 {
            self.cursor = position_of(text, line - 1, col);
        } else {
            self.cursor = 0;
        }
    }

    pub fn move_down(&mut self, text: &str) {
        let (line, col) = self.line_col(text);
        let lines = line_lengths(text);
        if line + 1 < lines.len() {
            self.cursor = position_of(text, line + 1, col);
        } else {
            self.cursor = text.chars().count();
        }
    }

    /// Returns the cursor's line index and char column.
    pub fn line_col(&self, text: &str) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Returns the cursor's line index and display column.
    pub fn visual_position(&self, text: &str) -> (usize, usize) {
        let (line, col) = self.line_col(text);
        let line_text = text.split('\n').nth(line).unwrap_or_default();
        let prefix: String = line_text.chars().take(col).collect();
        (line, prefix.width())
    }
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(i, _)| i)
}

fn remove_char(text: &str, char_idx: usize) -> String {
    text.chars()
        .enumerate()
        .filter_map(|(i, c)| (i != char_idx).then_some(c))
        .collect()
}

fn line_lengths(text: &str) -> Vec<usize> {
    text.split('\n').map(|l| l.chars().count()).collect()
}

fn position_of(text: &str, line: usize, col: usize) -> usize {
    let lines = line_lengths(text);
    let start: usize = lines[..line].iter().map(|len| len + 1).sum();
    start + col.min(lines[line])
}
