//! Engine configuration

use serde::Deserialize;

use crate::line::DEFAULT_LINE_CAPACITY;

/// Tunables for a [`crate::Document`] and the engine driving it.
///
/// Every field has a default, so a partial `[engine]` table in a host
/// config file is enough.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hard cap on the number of lines in a document.
    pub max_lines: usize,
    /// Spaces inserted for a typed tab.
    pub tab_width: usize,
    /// Baseline capacity of a freshly created line.
    pub initial_line_capacity: usize,
    /// Frames the cursor stays in each blink phase. Zero disables blinking.
    pub cursor_blink_frames: u32,
}

impl EngineConfig {
    pub const DEFAULT_MAX_LINES: usize = 10_000;
    pub const DEFAULT_TAB_WIDTH: usize = 4;

    /// Returns a copy with out-of-range values pulled back to usable ones.
    pub fn normalized(&self) -> Self {
        Self {
            max_lines: self.max_lines.max(1),
            tab_width: self.tab_width.max(1),
            initial_line_capacity: self.initial_line_capacity.max(1),
            cursor_blink_frames: self.cursor_blink_frames,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_lines: Self::DEFAULT_MAX_LINES,
            tab_width: Self::DEFAULT_TAB_WIDTH,
            initial_line_capacity: DEFAULT_LINE_CAPACITY,
            cursor_blink_frames: 30,
        }
    }
}
