//! Error types for the document engine

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Recoverable failures reported by engine operations.
///
/// None of these leave the document in a partially edited state.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("document is full: line limit of {max_lines} reached")]
    CapacityExceeded { max_lines: usize },

    #[error("no file selected")]
    NoFileSelected,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// A broken document invariant. These indicate a bug in the engine, never a
/// user error, and are treated as fatal by [`crate::EditorEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("line count {num_lines} outside 1..={max_lines}")]
    LineCount { num_lines: usize, max_lines: usize },

    #[error("line {line} is not terminated (len {len}, capacity {capacity})")]
    Unterminated {
        line: usize,
        len: usize,
        capacity: usize,
    },

    #[error("line {line} contains a line feed")]
    EmbeddedNewline { line: usize },

    #[error("cursor {line}:{column} is out of bounds")]
    Cursor { line: usize, column: usize },

    #[error("highlight anchor {line}:{column} is out of bounds")]
    Anchor { line: usize, column: usize },

    #[error("dirty mark {mark} is past the last line")]
    DirtyMark { mark: usize },
}
