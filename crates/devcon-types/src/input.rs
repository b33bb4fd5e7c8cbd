//! Platform-agnostic key codes and per-frame keyboard snapshots.
//!
//! Every host maps its native keyboard to [`Key`] and hands the console a
//! [`KeyboardState`] once per frame. The console never sees raw platform
//! input.

use serde::{Deserialize, Serialize};

/// A physical key the console understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    Space,
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Comma,
    Period,
    Slash,
    Grave,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Enter,
    Tab,
    Escape,
    PageUp,
    PageDown,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
}

impl Key {
    /// Letter keys in alphabetical order.
    pub const LETTERS: [Key; 26] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
    ];

    /// Digit keys on the main row, `0` through `9`.
    pub const DIGITS: [Key; 10] = [
        Key::D0,
        Key::D1,
        Key::D2,
        Key::D3,
        Key::D4,
        Key::D5,
        Key::D6,
        Key::D7,
        Key::D8,
        Key::D9,
    ];

    /// Shift, control and alt. These only modify other keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift
                | Key::RightShift
                | Key::LeftControl
                | Key::RightControl
                | Key::LeftAlt
                | Key::RightAlt
        )
    }

    /// Either shift key.
    pub fn is_shift(self) -> bool {
        matches!(self, Key::LeftShift | Key::RightShift)
    }
}

/// The set of keys held down during one frame.
///
/// Keys keep the order the platform reported them in; the console
/// processes them in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    keys: Vec<Key>,
}

impl KeyboardState {
    /// Snapshot with `keys` held. Duplicates are ignored.
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut state = Self::default();
        for key in keys {
            state.press(key);
        }
        state
    }

    /// A frame with nothing held.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mark a key as down. Duplicates are ignored.
    pub fn press(&mut self, key: Key) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    /// Mark `key` released.
    pub fn release(&mut self, key: Key) {
        self.keys.retain(|k| *k != key);
    }

    /// Whether `key` is held.
    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Whether `key` is not held.
    pub fn is_up(&self, key: Key) -> bool {
        !self.is_down(key)
    }

    /// Either shift key is held.
    pub fn shift(&self) -> bool {
        self.keys.iter().any(|k| k.is_shift())
    }

    /// Held keys, in press order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// True when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dedups_and_keeps_order() {
        let state = KeyboardState::new([Key::B, Key::A, Key::B]);
        assert_eq!(state.keys(), &[Key::B, Key::A]);
    }

    #[test]
    fn press_and_release() {
        let mut state = KeyboardState::empty();
        state.press(Key::Enter);
        assert!(state.is_down(Key::Enter));
        state.release(Key::Enter);
        assert!(state.is_up(Key::Enter));
        assert!(state.is_empty());
    }

    #[test]
    fn shift_from_either_side() {
        assert!(KeyboardState::new([Key::LeftShift]).shift());
        assert!(KeyboardState::new([Key::A, Key::RightShift]).shift());
        assert!(!KeyboardState::new([Key::A]).shift());
    }

    #[test]
    fn modifiers_classified() {
        assert!(Key::LeftControl.is_modifier());
        assert!(Key::RightShift.is_modifier());
        assert!(!Key::Tab.is_modifier());
        assert!(!Key::A.is_shift());
    }

    #[test]
    fn key_parses_from_toml_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            key: Key,
        }
        let w: Wrapper = toml::from_str("key = \"PageUp\"").unwrap();
        assert_eq!(w.key, Key::PageUp);
    }

    #[test]
    fn letter_and_digit_tables() {
        assert_eq!(Key::LETTERS[0], Key::A);
        assert_eq!(Key::LETTERS[25], Key::Z);
        assert_eq!(Key::DIGITS[7], Key::D7);
    }
}
