/// Keyboard key identifier.
///
/// Only keys the programs react to get their own variant; top-row and
/// numpad digits both map to `Digit`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    /// Letter key, stored uppercase (`'A'..='Z'`).
    Letter(char),

    /// Digit key `0..=9`, top row or numpad.
    Digit(u8),

    /// Platform key without a dedicated variant.
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when the event is an auto-repeat.
        repeat: bool,
    },

    PointerButton {
        button: MouseButton,
        state: ButtonState,
    },

    /// Window focus change.
    Focused(bool),
}

impl Key {
    /// Returns the digit value for digit keys.
    pub fn digit(self) -> Option<u8> {
        match self {
            Key::Digit(d) => Some(d),
            _ => None,
        }
    }
}
