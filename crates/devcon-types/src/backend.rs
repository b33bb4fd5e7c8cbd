//! Backend trait definitions.
//!
//! The console core dispatches text measurement and key translation
//! through these traits. Hosts implement them on top of whatever font
//! renderer and keyboard layout they use.

use crate::input::Key;

/// Measures rendered text for line wrapping and cursor placement.
///
/// Must return the same width for the same string as long as the font
/// configuration does not change.
pub trait TextMeasure {
    fn measure_width(&self, text: &str) -> f32;
}

/// Resolves a key press to the character it types.
pub trait KeyMapper {
    /// `None` for keys that do not produce a printable character.
    fn key_to_char(&self, key: Key, shift: bool) -> Option<char>;
}

/// Fixed-advance measurement: every character is `advance` units wide.
///
/// Suits bitmap debug fonts and headless hosts that lay text out in
/// character cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl MonospaceMeasure {
    /// Every character advances by `advance` units.
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}
