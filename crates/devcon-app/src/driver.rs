//! Feeds plain text through the console's real key pipeline.
//!
//! Each character becomes a press frame followed by a release frame, so
//! the console sees exactly what a keyboard would produce.

use devcon_console::Console;
use devcon_console::keymap::UsKeyboardLayout;
use devcon_console::lifecycle::LifecycleState;
use devcon_types::input::{Key, KeyboardState};

/// Simulated frame time.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Upper bound on frames spent waiting for the open animation.
const MAX_OPEN_FRAMES: usize = 600;

/// Keyboard frames that type `text` and press Enter.
///
/// Characters with no key on the US layout are skipped.
pub fn frames_for_line(text: &str) -> Vec<KeyboardState> {
    let mut frames = Vec::with_capacity(text.len() * 2 + 2);
    for ch in text.chars() {
        let Some((key, shift)) = UsKeyboardLayout::char_to_key(ch) else {
            log::warn!("No key types {ch:?}; skipped");
            continue;
        };
        let mut down = KeyboardState::empty();
        if shift {
            down.press(Key::LeftShift);
        }
        down.press(key);
        frames.push(down);
        frames.push(KeyboardState::empty());
    }
    frames.push(KeyboardState::new([Key::Enter]));
    frames.push(KeyboardState::empty());
    frames
}

/// Press the toggle key and run frames until the console is open.
pub fn open(console: &mut Console) -> anyhow::Result<()> {
    if console.state() == LifecycleState::Opened {
        return Ok(());
    }
    let toggle = console.config().toggle_key;
    console.update(FRAME_DT, &KeyboardState::new([toggle]));
    let idle = KeyboardState::empty();
    for _ in 0..MAX_OPEN_FRAMES {
        console.update(FRAME_DT, &idle);
        if console.state() == LifecycleState::Opened {
            return Ok(());
        }
    }
    anyhow::bail!("console did not open (state {})", console.state())
}

/// Type `text` into the console and submit it.
pub fn submit(console: &mut Console, text: &str) {
    for frame in frames_for_line(text) {
        console.update(FRAME_DT, &frame);
    }
}
