//! View state and the render sink the host draws from

use crate::state::Document;

/// Glyph metrics supplied by the host's font layer.
pub trait FontMetrics {
    fn advance(&self, byte: u8) -> f32;

    fn line_height(&self) -> f32;
}

/// Fixed-width cells, e.g. a terminal grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monospace {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Monospace {
    pub const TERMINAL: Self = Self {
        cell_width: 1.0,
        cell_height: 1.0,
    };
}

impl FontMetrics for Monospace {
    fn advance(&self, _byte: u8) -> f32 {
        self.cell_width
    }

    fn line_height(&self) -> f32 {
        self.cell_height
    }
}

/// Highlighted part of a visible line. Columns are relative to the
/// line's visible text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightSpan {
    pub start_column: usize,
    pub end_column: usize,
    pub x: f32,
    pub width: f32,
    /// The selection carries on past the end of this line.
    pub continues: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Text from the horizontal scroll offset onward.
    pub text: &'a [u8],
    pub y: f32,
    pub highlight: Option<HighlightSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorRect {
    /// Row within the visible lines.
    pub row: usize,
    /// Column relative to the horizontal scroll offset.
    pub column: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    pub lines: Vec<RenderLine<'a>>,
    /// `None` when the cursor is scrolled out of view.
    pub cursor: Option<CursorRect>,
}

/// Scroll offsets and cursor blink phase. The only state rendering mutates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub top_line: usize,
    pub left_column: usize,
    blink_frames: u32,
    blink_counter: u32,
    cursor_shown: bool,
}

impl View {
    pub fn new(blink_frames: u32) -> Self {
        Self {
            blink_frames,
            cursor_shown: true,
            ..Self::default()
        }
    }

    /// Advances the blink timer by one frame.
    pub fn tick(&mut self) {
        if self.blink_frames == 0 {
            self.cursor_shown = true;
            return;
        }
        self.blink_counter += 1;
        if self.blink_counter >= self.blink_frames {
            self.blink_counter = 0;
            self.cursor_shown = !self.cursor_shown;
        }
    }

    /// Makes the cursor solid again, e.g. after it moved.
    pub fn reset_blink(&mut self) {
        self.blink_counter = 0;
        self.cursor_shown = true;
    }

    pub fn cursor_shown(&self) -> bool {
        self.cursor_shown
    }

    /// Adjusts the offsets so the cursor sits inside a `rows` x `columns`
    /// window with `padding` rows of context where possible.
    pub fn scroll_to_cursor(&mut self, document: &Document, rows: usize, columns: usize, padding: usize) {
        let cursor = document.cursor();
        let padding = padding.min(rows.saturating_sub(1) / 2);

        if cursor.line < self.top_line + padding {
            self.top_line = cursor.line.saturating_sub(padding);
        }
        if rows > 0 && cursor.line + padding >= self.top_line + rows {
            self.top_line = cursor.line + padding + 1 - rows;
        }
        let max_top = document.line_count().saturating_sub(1);
        self.top_line = self.top_line.min(max_top);

        if cursor.column < self.left_column {
            self.left_column = cursor.column;
        }
        if columns > 0 && cursor.column >= self.left_column + columns {
            self.left_column = cursor.column + 1 - columns;
        }
    }

    /// Scrolls by whole lines, keeping at least one line on screen.
    pub fn scroll_lines(&mut self, document: &Document, delta: isize) {
        let max_top = document.line_count().saturating_sub(1);
        self.top_line = self.top_line.saturating_add_signed(delta).min(max_top);
    }

    /// Lays out up to `rows` lines starting at the scroll offset.
    pub fn layout<'a>(
        &self,
        document: &'a Document,
        metrics: &impl FontMetrics,
        rows: usize,
    ) -> RenderFrame<'a> {
        let line_height = metrics.line_height();
        let width_of = |bytes: &[u8]| -> f32 { bytes.iter().map(|&b| metrics.advance(b)).sum() };
        let highlight = document.highlight_info().filter(|info| !info.is_empty());

        let end = (self.top_line + rows).min(document.line_count());
        let mut lines = Vec::with_capacity(end.saturating_sub(self.top_line));
        for (row, index) in (self.top_line..end).enumerate() {
            let full = document.lines()[index].as_bytes();
            let left = self.left_column.min(full.len());
            let text = &full[left..];
            let span = highlight
                .and_then(|info| info.columns_on(index, full.len()))
                .and_then(|(start, stop, continues)| {
                    let start = start.max(left) - left;
                    let stop = stop.max(left) - left;
                    if start == stop && !continues {
                        return None;
                    }
                    Some(HighlightSpan {
                        start_column: start,
                        end_column: stop,
                        x: width_of(&text[..start]),
                        width: width_of(&text[start..stop]),
                        continues,
                    })
                });
            lines.push(RenderLine {
                number: index + 1,
                text,
                y: row as f32 * line_height,
                highlight: span,
            });
        }

        let cursor = document.cursor();
        let cursor = (cursor.line >= self.top_line && cursor.line < end && cursor.column >= self.left_column)
            .then(|| {
                let row = cursor.line - self.top_line;
                let column = cursor.column - self.left_column;
                let text = lines[row].text;
                let under = text.get(column).copied().unwrap_or(b' ');
                CursorRect {
                    row,
                    column,
                    x: width_of(&text[..column]),
                    y: row as f32 * line_height,
                    width: metrics.advance(under),
                    height: line_height,
                    visible: self.cursor_shown,
                }
            });

        RenderFrame { lines, cursor }
    }
}
