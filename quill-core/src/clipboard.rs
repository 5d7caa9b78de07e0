//! Clipboard bridge and selection (de)serialization

use tracing::debug;

use crate::error::{ClipboardError, EngineResult};
use crate::line::Line;
use crate::state::{Document, Position};
use crate::text;

/// Host clipboard. Text crosses the bridge as CRLF-separated bytes.
pub trait Clipboard {
    fn set_text(&mut self, text: &[u8]) -> Result<(), ClipboardError>;

    /// Current clipboard text, or `None` when it holds no text.
    fn get_text(&mut self) -> Result<Option<Vec<u8>>, ClipboardError>;
}

/// In-process clipboard, used headless and as a fallback.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<Vec<u8>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &[u8]) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_vec());
        Ok(())
    }

    fn get_text(&mut self) -> Result<Option<Vec<u8>>, ClipboardError> {
        Ok(self.contents.clone())
    }
}

impl Document {
    /// The selected text joined with CRLF, or `None` without a selection.
    pub fn highlighted_text(&self) -> Option<Vec<u8>> {
        let info = self.highlight_info()?;
        if info.is_empty() {
            return None;
        }

        let top = self.lines[info.top_line].as_bytes();
        let first = &top[info.top_start..info.top_start + info.top_len];
        if info.spans_one_line {
            return Some(first.to_vec());
        }

        let middle = self.lines[info.top_line + 1..info.bottom_line]
            .iter()
            .map(Line::as_bytes);
        let last = &self.lines[info.bottom_line].as_bytes()[..info.bottom_end];
        Some(text::join_crlf(
            std::iter::once(first).chain(middle).chain(std::iter::once(last)),
        ))
    }

    /// Inserts clipboard text at the cursor.
    ///
    /// New lines are opened before any text moves; the first fragment lands
    /// at the cursor column, the rest at column 0 of the new lines, and the
    /// original tail of the cursor line follows the last fragment. The
    /// cursor ends right after the pasted text. An active selection is not
    /// replaced, only dropped.
    pub fn paste_text(&mut self, blob: &[u8]) -> EngineResult<()> {
        let fragments = text::split_lines(blob);
        let extra = fragments.len() - 1;
        let Position { line, column } = self.cursor;

        self.insert_lines_after(line, extra)?;
        self.anchor = None;

        let tail = self.lines[line].split_off(column);
        self.insert_at_cursor(fragments[0]);
        for (offset, fragment) in fragments[1..].iter().enumerate() {
            self.lines[line + 1 + offset].set_text(fragment);
        }

        let last = line + extra;
        let end = if extra == 0 {
            self.cursor.column
        } else {
            self.lines[last].len()
        };
        self.lines[last].append(&tail);
        self.cursor = Position::new(last, end);
        self.mark_dirty(line);
        debug!(line, lines = fragments.len(), bytes = blob.len(), "pasted text");
        Ok(())
    }
}
