//! Per-frame input snapshot supplied by the host

/// Logical keys the engine binds. Printable text arrives separately as the
/// frame's pressed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    A,
    C,
    O,
    Q,
    S,
    V,
    X,
}

impl Key {
    /// Every key, in dispatch order.
    pub const ALL: [Key; 18] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Home,
        Key::End,
        Key::Backspace,
        Key::Delete,
        Key::Enter,
        Key::Tab,
        Key::Escape,
        Key::A,
        Key::C,
        Key::O,
        Key::Q,
        Key::S,
        Key::V,
        Key::X,
    ];

    pub const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize {
        self as usize
    }

    /// Maps a letter (either case) to its key, if bound.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'a' => Some(Key::A),
            'c' => Some(Key::C),
            'o' => Some(Key::O),
            'q' => Some(Key::Q),
            's' => Some(Key::S),
            'v' => Some(Key::V),
            'x' => Some(Key::X),
            _ => None,
        }
    }
}

/// Transition flags for one key within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub went_down: bool,
    pub went_up: bool,
    pub held: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self::new(false, false, false);
    pub const SHIFT: Self = Self::new(true, false, false);
    pub const CTRL: Self = Self::new(false, true, false);
    pub const CTRL_SHIFT: Self = Self::new(true, true, false);
    pub const ALT: Self = Self::new(false, false, true);
    pub const ALT_SHIFT: Self = Self::new(true, false, true);

    pub const fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }
}

/// Everything the host observed during one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputFrame {
    keys: [KeyState; Key::COUNT],
    pub modifiers: Modifiers,
    /// Character produced by the key press, already resolved for shift and
    /// caps lock by the host.
    pub pressed_char: Option<u8>,
}

impl InputFrame {
    pub fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            ..Self::default()
        }
    }

    /// A frame with a single key press.
    pub fn key_press(key: Key, modifiers: Modifiers) -> Self {
        let mut frame = Self::new(modifiers);
        frame.press(key);
        frame
    }

    /// A frame that types one character.
    pub fn typed(ch: u8) -> Self {
        Self {
            pressed_char: Some(ch),
            ..Self::default()
        }
    }

    pub fn key(&self, key: Key) -> KeyState {
        self.keys[key.index()]
    }

    pub fn press(&mut self, key: Key) {
        let state = &mut self.keys[key.index()];
        state.went_down = true;
        state.held = true;
    }

    pub fn release(&mut self, key: Key) {
        let state = &mut self.keys[key.index()];
        state.went_up = true;
        state.held = false;
    }

    /// Keys that went down this frame, in dispatch order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL
            .into_iter()
            .filter(move |&key| self.key(key).went_down)
    }
}
