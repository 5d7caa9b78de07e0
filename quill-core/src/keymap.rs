//! Key bindings: a declarative table from (modifiers, key) to action

use crate::actions::EditorAction;
use crate::input::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub modifiers: Modifiers,
    pub key: Key,
    pub action: EditorAction,
}

const fn bind(modifiers: Modifiers, key: Key, action: EditorAction) -> Binding {
    Binding {
        modifiers,
        key,
        action,
    }
}

/// Default bindings. Modifiers must match exactly.
pub const BINDINGS: &[Binding] = &[
    // Cursor movement
    bind(Modifiers::NONE, Key::Left, EditorAction::MoveLeft),
    bind(Modifiers::NONE, Key::Right, EditorAction::MoveRight),
    bind(Modifiers::NONE, Key::Up, EditorAction::MoveUp),
    bind(Modifiers::NONE, Key::Down, EditorAction::MoveDown),
    bind(Modifiers::NONE, Key::Home, EditorAction::MoveToBeginningOfLine),
    bind(Modifiers::NONE, Key::End, EditorAction::MoveToEndOfLine),
    bind(Modifiers::CTRL, Key::Left, EditorAction::MoveWordLeft),
    bind(Modifiers::CTRL, Key::Right, EditorAction::MoveWordRight),
    bind(Modifiers::ALT, Key::Left, EditorAction::MoveWordLeft),
    bind(Modifiers::ALT, Key::Right, EditorAction::MoveWordRight),
    // Selection
    bind(Modifiers::SHIFT, Key::Left, EditorAction::SelectLeft),
    bind(Modifiers::SHIFT, Key::Right, EditorAction::SelectRight),
    bind(Modifiers::SHIFT, Key::Up, EditorAction::SelectUp),
    bind(Modifiers::SHIFT, Key::Down, EditorAction::SelectDown),
    bind(Modifiers::SHIFT, Key::Home, EditorAction::SelectToBeginningOfLine),
    bind(Modifiers::SHIFT, Key::End, EditorAction::SelectToEndOfLine),
    bind(Modifiers::CTRL_SHIFT, Key::Left, EditorAction::SelectWordLeft),
    bind(Modifiers::CTRL_SHIFT, Key::Right, EditorAction::SelectWordRight),
    bind(Modifiers::ALT_SHIFT, Key::Left, EditorAction::SelectWordLeft),
    bind(Modifiers::ALT_SHIFT, Key::Right, EditorAction::SelectWordRight),
    bind(Modifiers::CTRL, Key::A, EditorAction::SelectAll),
    // Text editing
    bind(Modifiers::NONE, Key::Backspace, EditorAction::Backspace),
    bind(Modifiers::SHIFT, Key::Backspace, EditorAction::Backspace),
    bind(Modifiers::NONE, Key::Delete, EditorAction::Delete),
    bind(Modifiers::NONE, Key::Enter, EditorAction::Newline),
    bind(Modifiers::SHIFT, Key::Enter, EditorAction::Newline),
    bind(Modifiers::NONE, Key::Tab, EditorAction::TypeCharacter(b'\t')),
    // Clipboard
    bind(Modifiers::CTRL, Key::C, EditorAction::Copy),
    bind(Modifiers::CTRL, Key::X, EditorAction::Cut),
    bind(Modifiers::CTRL, Key::V, EditorAction::Paste),
    // Files
    bind(Modifiers::CTRL, Key::O, EditorAction::Open),
    bind(Modifiers::CTRL, Key::S, EditorAction::Save),
    bind(Modifiers::CTRL_SHIFT, Key::S, EditorAction::SaveAs),
    // Host
    bind(Modifiers::NONE, Key::Escape, EditorAction::Quit),
    bind(Modifiers::CTRL, Key::Q, EditorAction::Quit),
];

pub fn lookup(modifiers: Modifiers, key: Key) -> Option<EditorAction> {
    BINDINGS
        .iter()
        .find(|binding| binding.key == key && binding.modifiers == modifiers)
        .map(|binding| binding.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_selects_and_ctrl_skips_words() {
        assert_eq!(
            lookup(Modifiers::NONE, Key::Left),
            Some(EditorAction::MoveLeft)
        );
        assert_eq!(
            lookup(Modifiers::SHIFT, Key::Left),
            Some(EditorAction::SelectLeft)
        );
        assert_eq!(
            lookup(Modifiers::CTRL_SHIFT, Key::Right),
            Some(EditorAction::SelectWordRight)
        );
    }

    #[test]
    fn unbound_combinations_return_none() {
        assert_eq!(lookup(Modifiers::NONE, Key::A), None);
        assert_eq!(lookup(Modifiers::ALT, Key::S), None);
    }

    #[test]
    fn no_duplicate_bindings() {
        for (index, binding) in BINDINGS.iter().enumerate() {
            let duplicate = BINDINGS[index + 1..]
                .iter()
                .any(|other| other.key == binding.key && other.modifiers == binding.modifiers);
            assert!(!duplicate, "duplicate binding for {binding:?}");
        }
    }
}
