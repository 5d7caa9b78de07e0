//! Platform-agnostic document engine for the Quill text editor.
//!
//! The engine keeps a document as an array of byte lines, tracks a cursor
//! and an optional highlight anchor, and applies editing, navigation and
//! clipboard operations. Hosts feed it [`InputFrame`]s and read back a
//! [`RenderFrame`] to draw.

pub mod actions;
pub mod clipboard;
pub mod config;
pub mod edit;
pub mod engine;
pub mod error;
pub mod file;
pub mod highlight;
pub mod input;
pub mod keymap;
pub mod line;
pub mod navigation;
pub mod render;
pub mod state;
pub mod text;

pub use actions::EditorAction;
pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::EngineConfig;
pub use engine::{EditorEngine, FrameOutcome};
pub use error::{ClipboardError, EngineError, EngineResult, InvariantViolation};
pub use file::{FileBridge, FsFiles, SaveOutcome};
pub use highlight::HighlightInfo;
pub use input::{InputFrame, Key, KeyState, Modifiers};
pub use line::Line;
pub use render::{CursorRect, FontMetrics, HighlightSpan, Monospace, RenderFrame, RenderLine, View};
pub use state::{Document, Position};
