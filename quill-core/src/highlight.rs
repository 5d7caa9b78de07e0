//! Selection ("highlight") model

use crate::state::{Document, Position};

/// Normalized view of the active selection, derived from anchor and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightInfo {
    pub top_line: usize,
    /// Column where the selection starts on the top line.
    pub top_start: usize,
    /// Selected bytes on the top line: to the end of the line, or to
    /// `bottom_end` when the selection spans one line.
    pub top_len: usize,
    pub bottom_line: usize,
    /// Column where the selection ends on the bottom line (exclusive).
    pub bottom_end: usize,
    pub spans_one_line: bool,
}

impl HighlightInfo {
    /// Orders two positions: the smaller line is the top; on the same line
    /// the smaller column is.
    pub fn new(anchor: Position, cursor: Position, top_line_len: usize) -> Self {
        let (top, bottom) = if anchor.line != cursor.line {
            if anchor.line < cursor.line {
                (anchor, cursor)
            } else {
                (cursor, anchor)
            }
        } else {
            let line = anchor.line;
            (
                Position::new(line, anchor.column.min(cursor.column)),
                Position::new(line, anchor.column.max(cursor.column)),
            )
        };

        let spans_one_line = top.line == bottom.line;
        let top_len = if spans_one_line {
            bottom.column - top.column
        } else {
            top_line_len - top.column
        };

        Self {
            top_line: top.line,
            top_start: top.column,
            top_len,
            bottom_line: bottom.line,
            bottom_end: bottom.column,
            spans_one_line,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.top_line, self.top_start)
    }

    pub fn is_empty(&self) -> bool {
        self.spans_one_line && self.top_len == 0
    }

    /// Selected column range on `line`, with a flag telling whether the
    /// selection continues past the end of that line.
    pub fn columns_on(&self, line: usize, line_len: usize) -> Option<(usize, usize, bool)> {
        if line < self.top_line || line > self.bottom_line {
            return None;
        }
        let start = if line == self.top_line { self.top_start } else { 0 };
        let (end, continues) = if line == self.bottom_line {
            (self.bottom_end, false)
        } else {
            (line_len, true)
        };
        Some((start, end, continues))
    }
}

impl Document {
    pub fn has_highlight(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn highlight_info(&self) -> Option<HighlightInfo> {
        let anchor = self.anchor?;
        let top_line = anchor.line.min(self.cursor.line);
        Some(HighlightInfo::new(
            anchor,
            self.cursor,
            self.line_len(top_line),
        ))
    }

    /// Starts a selection at `position` unless one is already running.
    pub fn init_highlight(&mut self, position: Position) {
        if self.anchor.is_none() {
            self.anchor = Some(self.clamp(position));
        }
    }

    /// Moves the cursor to `position`, anchoring a selection at the old
    /// cursor if none is running (mouse drag).
    pub fn extend_highlight_to(&mut self, position: Position) {
        self.init_highlight(self.cursor);
        self.cursor = self.clamp(position);
    }

    pub fn clear_highlights(&mut self) {
        self.anchor = None;
    }

    /// Select-all: anchor at the start, cursor at the end of the document.
    pub fn highlight_entire_file(&mut self) {
        let last = self.num_lines - 1;
        self.anchor = Some(Position::zero());
        self.cursor = Position::new(last, self.line_len(last));
    }
}
