//! Document state: line store, cursor, highlight anchor and dirty mark

use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, InvariantViolation};
use crate::line::Line;
use crate::text;

/// A caret position. Ordering follows document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    /// Byte offset into the line; equal to the line length at end of line.
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// The document being edited.
///
/// Line slots past `num_lines` are kept around and reused when lines are
/// inserted again, so a slot's allocation survives deletes.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) lines: Vec<Line>,
    pub(crate) num_lines: usize,
    pub(crate) cursor: Position,
    pub(crate) anchor: Option<Position>,
    /// Lowest line index changed since the last save.
    pub(crate) dirty: Option<usize>,
    pub(crate) file_name: Option<PathBuf>,
    /// Set when the on-disk layout does not match the CRLF layout, which
    /// makes incremental offsets meaningless.
    pub(crate) rewrite_whole_file: bool,
    pub(crate) config: EngineConfig,
}

impl Document {
    pub fn new(config: &EngineConfig) -> Self {
        let config = config.normalized();
        Self {
            lines: vec![Line::with_capacity(config.initial_line_capacity)],
            num_lines: 1,
            cursor: Position::zero(),
            anchor: None,
            dirty: None,
            file_name: None,
            rewrite_whole_file: false,
            config,
        }
    }

    /// Builds a clean document from CRLF or LF separated text.
    pub fn from_text(config: &EngineConfig, content: &str) -> EngineResult<Self> {
        let mut document = Self::new(config);
        document.load_bytes(content.as_bytes(), None)?;
        Ok(document)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn line_count(&self) -> usize {
        self.num_lines
    }

    pub fn max_lines(&self) -> usize {
        self.config.max_lines
    }

    /// Active lines in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines[..self.num_lines]
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines().get(index)
    }

    pub fn line_len(&self, index: usize) -> usize {
        self.line(index).map(Line::len).unwrap_or(0)
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub fn dirty_mark(&self) -> Option<usize> {
        self.dirty
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.is_some()
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Moves the cursor, clamping to the document. Clears any highlight.
    pub fn set_cursor(&mut self, position: Position) {
        self.anchor = None;
        self.cursor = self.clamp(position);
    }

    pub fn clamp(&self, position: Position) -> Position {
        let line = position.line.min(self.num_lines - 1);
        Position::new(line, position.column.min(self.line_len(line)))
    }

    /// Whole document joined with CRLF.
    pub fn to_crlf_bytes(&self) -> Vec<u8> {
        text::join_crlf(self.lines().iter().map(Line::as_bytes))
    }

    pub fn to_crlf_string(&self) -> String {
        String::from_utf8_lossy(&self.to_crlf_bytes()).into_owned()
    }

    pub(crate) fn mark_dirty(&mut self, line: usize) {
        self.dirty = Some(self.dirty.map_or(line, |mark| mark.min(line)));
    }

    pub(crate) fn capacity_error(&self) -> EngineError {
        EngineError::CapacityExceeded {
            max_lines: self.config.max_lines,
        }
    }

    /// Opens `count` empty lines directly after `after`, shifting later lines
    /// down. Inactive slots are recycled before new ones are allocated.
    pub(crate) fn insert_lines_after(&mut self, after: usize, count: usize) -> EngineResult<()> {
        if count == 0 {
            return Ok(());
        }
        if self.num_lines + count > self.config.max_lines {
            return Err(self.capacity_error());
        }
        while self.lines.len() < self.num_lines + count {
            self.lines
                .push(Line::with_capacity(self.config.initial_line_capacity));
        }
        let end = self.num_lines + count;
        self.lines[after + 1..end].rotate_right(count);
        for line in &mut self.lines[after + 1..after + 1 + count] {
            line.clear();
        }
        self.num_lines = end;
        Ok(())
    }

    /// Removes the active lines in `start..end`, shifting later lines up.
    pub(crate) fn remove_lines(&mut self, start: usize, end: usize) {
        let count = end - start;
        if count == 0 {
            return;
        }
        debug_assert!(count < self.num_lines, "cannot remove every line");
        self.lines[start..self.num_lines].rotate_left(count);
        self.num_lines -= count;
    }

    /// Verifies every structural invariant of the document.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let max_lines = self.config.max_lines;
        if self.num_lines == 0 || self.num_lines > max_lines || self.num_lines > self.lines.len() {
            return Err(InvariantViolation::LineCount {
                num_lines: self.num_lines,
                max_lines,
            });
        }

        for (index, line) in self.lines().iter().enumerate() {
            if !line.is_terminated() {
                return Err(InvariantViolation::Unterminated {
                    line: index,
                    len: line.len(),
                    capacity: line.capacity(),
                });
            }
            if line.as_bytes().contains(&b'\n') {
                return Err(InvariantViolation::EmbeddedNewline { line: index });
            }
        }

        let in_bounds = |position: Position| {
            position.line < self.num_lines && position.column <= self.line_len(position.line)
        };
        if !in_bounds(self.cursor) {
            return Err(InvariantViolation::Cursor {
                line: self.cursor.line,
                column: self.cursor.column,
            });
        }
        if let Some(anchor) = self.anchor {
            if !in_bounds(anchor) {
                return Err(InvariantViolation::Anchor {
                    line: anchor.line,
                    column: anchor.column,
                });
            }
        }
        if let Some(mark) = self.dirty {
            if mark >= self.num_lines {
                return Err(InvariantViolation::DirtyMark { mark });
            }
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
