//! Mutating operations on a document

use tracing::{debug, trace};

use crate::error::EngineResult;
use crate::state::{Document, Position};

impl Document {
    /// Inserts one typed byte at the cursor.
    ///
    /// A tab becomes `tab_width` spaces and a line feed splits the line.
    /// Carriage returns and NUL are dropped. Any active selection must
    /// already have been removed by the caller.
    pub fn add_char(&mut self, ch: u8) -> EngineResult<()> {
        match ch {
            b'\n' => return self.newline(),
            b'\r' | 0 => {
                trace!(byte = ch, "ignoring control byte");
                return Ok(());
            }
            _ => {}
        }

        let Position { line, column } = self.cursor;
        if ch == b'\t' {
            let spaces = vec![b' '; self.config.tab_width];
            self.lines[line].insert(column, &spaces);
            self.cursor.column += spaces.len();
        } else {
            self.lines[line].insert(column, &[ch]);
            self.cursor.column += 1;
        }
        self.mark_dirty(line);
        Ok(())
    }

    /// Inserts raw bytes on the cursor line without interpreting them.
    pub(crate) fn insert_at_cursor(&mut self, bytes: &[u8]) {
        let Position { line, column } = self.cursor;
        self.lines[line].insert(column, bytes);
        self.cursor.column += bytes.len();
        self.mark_dirty(line);
    }

    /// Deletes the byte before the cursor, joining with the previous line at
    /// column 0. With a selection, deletes the selection instead.
    pub fn backspace(&mut self) {
        if self.remove_selected_text() {
            return;
        }

        let Position { line, column } = self.cursor;
        if column > 0 {
            self.lines[line].remove_range(column - 1..column);
            self.cursor.column -= 1;
            self.mark_dirty(line);
        } else if line > 0 {
            let previous = line - 1;
            let (head, rest) = self.lines.split_at_mut(line);
            let joined_at = head[previous].len();
            head[previous].append(rest[0].as_bytes());
            self.remove_lines(line, line + 1);
            self.cursor = Position::new(previous, joined_at);
            self.mark_dirty(previous);
            debug!(line, into = previous, "joined line into previous");
        }
    }

    /// Deletes the byte under the cursor, pulling the next line up at end of
    /// line. With a selection, deletes the selection instead.
    pub fn delete_forward(&mut self) {
        if self.remove_selected_text() {
            return;
        }

        let Position { line, column } = self.cursor;
        if column < self.lines[line].len() {
            self.lines[line].remove_range(column..column + 1);
            self.mark_dirty(line);
        } else if line + 1 < self.num_lines {
            let (head, rest) = self.lines.split_at_mut(line + 1);
            head[line].append(rest[0].as_bytes());
            self.remove_lines(line + 1, line + 2);
            self.mark_dirty(line);
            debug!(line, "joined next line");
        }
    }

    /// Splits the cursor line at the cursor (Enter).
    ///
    /// An active selection is deleted first. At the line limit the deletion
    /// is the whole edit; with no selection to delete nothing changes and
    /// `CapacityExceeded` is returned.
    pub fn newline(&mut self) -> EngineResult<()> {
        let removed = self.remove_selected_text();
        if removed && self.num_lines >= self.max_lines() {
            return Ok(());
        }

        let Position { line, column } = self.cursor;
        self.insert_lines_after(line, 1)?;
        let tail = self.lines[line].split_off(column);
        self.lines[line + 1].set_text(&tail);
        self.cursor = Position::new(line + 1, 0);
        self.mark_dirty(line);
        debug!(line, column, "split line");
        Ok(())
    }

    /// Removes a non-empty selection, returning whether anything was removed.
    /// An empty selection is simply dropped.
    pub(crate) fn remove_selected_text(&mut self) -> bool {
        match self.highlight_info() {
            Some(info) if !info.is_empty() => {
                self.remove_highlighted_text();
                true
            }
            Some(_) => {
                self.clear_highlights();
                false
            }
            None => false,
        }
    }

    /// Deletes the selected range and collapses the cursor to its start.
    pub fn remove_highlighted_text(&mut self) {
        let Some(info) = self.highlight_info() else {
            return;
        };

        let top = info.top_line;
        if info.spans_one_line {
            self.lines[top].remove_range(info.top_start..info.top_start + info.top_len);
        } else {
            let tail = self.lines[info.bottom_line].as_bytes()[info.bottom_end..].to_vec();
            self.lines[top].truncate(info.top_start);
            self.lines[top].append(&tail);
            self.remove_lines(top + 1, info.bottom_line + 1);
            debug!(
                top,
                bottom = info.bottom_line,
                "removed multi-line selection"
            );
        }

        self.cursor = info.start();
        self.anchor = None;
        self.mark_dirty(top);
    }
}
