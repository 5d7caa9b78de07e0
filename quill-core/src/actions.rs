//! Platform-agnostic editor actions

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    // Text manipulation
    TypeCharacter(u8),
    Backspace,
    Delete,
    Newline,

    // Cursor movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveToBeginningOfLine,
    MoveToEndOfLine,
    MoveWordLeft,
    MoveWordRight,

    // Selection
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    SelectWordLeft,
    SelectWordRight,
    SelectToBeginningOfLine,
    SelectToEndOfLine,
    SelectAll,
    ClearSelection,

    // Clipboard
    Cut,
    Copy,
    Paste,

    // Files
    Open,
    Save,
    SaveAs,

    // Handled by the host
    Quit,
}
