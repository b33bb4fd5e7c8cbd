//! US keyboard layout: key codes to typed characters and back.

use crate::backend::KeyMapper;
use crate::input::Key;

/// Punctuation keys with their unshifted and shifted characters.
const PUNCTUATION: &[(Key, char, char)] = &[
    (Key::Minus, '-', '_'),
    (Key::Equals, '=', '+'),
    (Key::LeftBracket, '[', '{'),
    (Key::RightBracket, ']', '}'),
    (Key::Backslash, '\\', '|'),
    (Key::Semicolon, ';', ':'),
    (Key::Apostrophe, '\'', '"'),
    (Key::Comma, ',', '<'),
    (Key::Period, '.', '>'),
    (Key::Slash, '/', '?'),
    (Key::Grave, '`', '~'),
];

/// Shifted characters on the digit row, indexed by digit.
const SHIFTED_DIGITS: [char; 10] = [')', '!', '@', '#', '$', '%', '^', '&', '*', '('];

/// Standard US QWERTY layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsKeyboardLayout;

impl UsKeyboardLayout {
    /// Find the key (and whether shift is needed) that types `ch`.
    ///
    /// Used by hosts that feed scripted text through the key pipeline.
    pub fn char_to_key(ch: char) -> Option<(Key, bool)> {
        if ch == ' ' {
            return Some((Key::Space, false));
        }
        if ch.is_ascii_lowercase() {
            return Some((Key::LETTERS[(ch as u8 - b'a') as usize], false));
        }
        if ch.is_ascii_uppercase() {
            return Some((Key::LETTERS[(ch as u8 - b'A') as usize], true));
        }
        if ch.is_ascii_digit() {
            return Some((Key::DIGITS[(ch as u8 - b'0') as usize], false));
        }
        if let Some(i) = SHIFTED_DIGITS.iter().position(|c| *c == ch) {
            return Some((Key::DIGITS[i], true));
        }
        PUNCTUATION.iter().find_map(|&(key, plain, shifted)| {
            if ch == plain {
                Some((key, false))
            } else if ch == shifted {
                Some((key, true))
            } else {
                None
            }
        })
    }
}

impl KeyMapper for UsKeyboardLayout {
    fn key_to_char(&self, key: Key, shift: bool) -> Option<char> {
        if key == Key::Space {
            return Some(' ');
        }
        if let Some(i) = Key::LETTERS.iter().position(|k| *k == key) {
            let base = (b'a' + i as u8) as char;
            return Some(if shift {
                base.to_ascii_uppercase()
            } else {
                base
            });
        }
        if let Some(i) = Key::DIGITS.iter().position(|k| *k == key) {
            return Some(if shift {
                SHIFTED_DIGITS[i]
            } else {
                (b'0' + i as u8) as char
            });
        }
        PUNCTUATION
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|&(_, plain, shifted)| if shift { shifted } else { plain })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_follow_shift() {
        let l = UsKeyboardLayout;
        assert_eq!(l.key_to_char(Key::A, false), Some('a'));
        assert_eq!(l.key_to_char(Key::Z, true), Some('Z'));
    }

    #[test]
    fn digit_row_symbols() {
        let l = UsKeyboardLayout;
        assert_eq!(l.key_to_char(Key::D1, false), Some('1'));
        assert_eq!(l.key_to_char(Key::D1, true), Some('!'));
        assert_eq!(l.key_to_char(Key::D0, true), Some(')'));
    }

    #[test]
    fn punctuation_and_space() {
        let l = UsKeyboardLayout;
        assert_eq!(l.key_to_char(Key::Space, true), Some(' '));
        assert_eq!(l.key_to_char(Key::Apostrophe, true), Some('"'));
        assert_eq!(l.key_to_char(Key::Period, false), Some('.'));
    }

    #[test]
    fn control_keys_are_not_printable() {
        let l = UsKeyboardLayout;
        for key in [Key::Enter, Key::Tab, Key::Backspace, Key::Up, Key::LeftShift] {
            assert_eq!(l.key_to_char(key, false), None);
        }
    }

    #[test]
    fn char_to_key_inverts_key_to_char() {
        let l = UsKeyboardLayout;
        for ch in "Hello, World! (x_y) ~`\"|?".chars() {
            let (key, shift) = UsKeyboardLayout::char_to_key(ch).unwrap();
            assert_eq!(l.key_to_char(key, shift), Some(ch), "char {ch:?}");
        }
    }

    #[test]
    fn char_to_key_rejects_non_ascii() {
        assert_eq!(UsKeyboardLayout::char_to_key('\u{00E9}'), None);
        assert_eq!(UsKeyboardLayout::char_to_key('\n'), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn printable_ascii_round_trips(ch in proptest::char::range(' ', '~')) {
                let (key, shift) = UsKeyboardLayout::char_to_key(ch)
                    .ok_or_else(|| TestCaseError::fail(format!("no key for {ch:?}")))?;
                prop_assert_eq!(UsKeyboardLayout.key_to_char(key, shift), Some(ch));
            }

            #[test]
            fn everything_else_has_no_key(ch in any::<char>().prop_filter("printable ascii", |c| !(' '..='~').contains(c))) {
                prop_assert_eq!(UsKeyboardLayout::char_to_key(ch), None);
            }

            #[test]
            fn typed_chars_map_back_to_their_key(
                i in 0usize..(Key::LETTERS.len() + Key::DIGITS.len() + PUNCTUATION.len()),
                shift in any::<bool>(),
            ) {
                let key = Key::LETTERS
                    .iter()
                    .chain(Key::DIGITS.iter())
                    .chain(PUNCTUATION.iter().map(|(k, _, _)| k))
                    .nth(i)
                    .copied()
                    .ok_or_else(|| TestCaseError::fail("index out of range"))?;
                let ch = UsKeyboardLayout.key_to_char(key, shift)
                    .ok_or_else(|| TestCaseError::fail(format!("{key:?} types nothing")))?;
                prop_assert_eq!(UsKeyboardLayout::char_to_key(ch), Some((key, shift)));
            }
        }
    }
}
