//! Cursor movement and word-boundary skipping

use crate::state::{Document, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

impl Document {
    /// Anchors the selection at the current cursor when extending, otherwise
    /// drops it.
    fn begin_motion(&mut self, extend: bool) {
        if extend {
            self.init_highlight(self.cursor);
        } else {
            self.clear_highlights();
        }
    }

    pub fn move_cursor_forward(&mut self, word: bool, extend: bool) {
        self.begin_motion(extend);
        let Position { line, column } = self.cursor;
        if column >= self.line_len(line) {
            if line + 1 < self.num_lines {
                self.cursor = Position::new(line + 1, 0);
            }
        } else if word {
            self.advance_cursor_to_end_of_word(Direction::Forward);
        } else {
            self.cursor.column += 1;
        }
    }

    pub fn move_cursor_backward(&mut self, word: bool, extend: bool) {
        self.begin_motion(extend);
        let Position { line, column } = self.cursor;
        if column == 0 {
            if line > 0 {
                self.cursor = Position::new(line - 1, self.line_len(line - 1));
            }
        } else if word {
            self.advance_cursor_to_end_of_word(Direction::Backward);
        } else {
            self.cursor.column -= 1;
        }
    }

    /// Moves to the previous line at the same column, clamped to its length.
    pub fn move_cursor_up(&mut self, extend: bool) {
        self.begin_motion(extend);
        if self.cursor.line > 0 {
            let line = self.cursor.line - 1;
            self.cursor = Position::new(line, self.cursor.column.min(self.line_len(line)));
        }
    }

    /// Moves to the next line at the same column, clamped to its length.
    pub fn move_cursor_down(&mut self, extend: bool) {
        self.begin_motion(extend);
        if self.cursor.line + 1 < self.num_lines {
            let line = self.cursor.line + 1;
            self.cursor = Position::new(line, self.cursor.column.min(self.line_len(line)));
        }
    }

    pub fn move_cursor_to_line_start(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor.column = 0;
    }

    pub fn move_cursor_to_line_end(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor.column = self.line_len(self.cursor.line);
    }

    /// Skips one run of non-alphanumeric bytes, then one run of alphanumeric
    /// bytes, stopping at the line boundary.
    pub fn advance_cursor_to_end_of_word(&mut self, direction: Direction) {
        let text = self.lines[self.cursor.line].as_bytes();
        let mut column = self.cursor.column;
        match direction {
            Direction::Forward => {
                while column < text.len() && !is_word_byte(text[column]) {
                    column += 1;
                }
                while column < text.len() && is_word_byte(text[column]) {
                    column += 1;
                }
            }
            Direction::Backward => {
                while column > 0 && !is_word_byte(text[column - 1]) {
                    column -= 1;
                }
                while column > 0 && is_word_byte(text[column - 1]) {
                    column -= 1;
                }
            }
        }
        self.cursor.column = column;
    }
}
