//! Line editor driven by per-frame keyboard snapshots.
//!
//! The editor owns the in-progress command line, its cursor, command
//! history and key-repeat timing. It never touches the console directly;
//! submissions and other requests come back as [`EditorEvent`]s.

use std::collections::VecDeque;

use devcon_types::backend::KeyMapper;
use devcon_types::config::ConsoleConfig;
use devcon_types::input::{Key, KeyboardState};

/// A request the editor hands back to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Enter was pressed with this line.
    Submit(String),
    /// Tab or Escape: close the console.
    HideRequested,
    /// PageUp (+1) or PageDown (-1), in screenfuls.
    ScrollPages(i32),
}

/// Outcome of one frame of key processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyActivity {
    /// Any key fired this frame.
    pub fired: bool,
    pub events: Vec<EditorEvent>,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Bounded list of submitted lines with an Up/Down recall cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    /// Index of the recalled entry; `entries.len()` means "past the end".
    cursor: usize,
}

impl History {
    /// Empty history keeping at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            cursor: 0,
        }
    }

    /// Record a submitted line, dropping the oldest beyond capacity, and
    /// reset recall to past the end.
    pub fn push(&mut self, line: &str) {
        self.entries.push_back(line.to_string());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len();
    }

    /// Step back one entry, stopping at the oldest.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step forward one entry, stopping at the newest.
    pub fn newer(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1).min(self.entries.len() - 1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before anything is submitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry limit; the oldest entry is dropped past it.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Key repeat
// ---------------------------------------------------------------------------

/// Decides which held keys fire on a given frame.
///
/// A newly pressed key fires at once and becomes the tracked key. Only the
/// tracked key repeats: first after `start_delay`, then every `interval`.
#[derive(Debug, Clone)]
pub struct KeyRepeat {
    start_delay: f32,
    interval: f32,
    tracked: Option<Key>,
    timer: f32,
    previous: KeyboardState,
}

impl KeyRepeat {
    /// Repeat timing in seconds.
    pub fn new(start_delay: f32, interval: f32) -> Self {
        Self {
            start_delay,
            interval,
            tracked: None,
            timer: 0.0,
            previous: KeyboardState::empty(),
        }
    }

    /// Whether `key`, down this frame, should act.
    pub fn fires(&mut self, key: Key, dt: f32) -> bool {
        if self.previous.is_up(key) {
            self.timer = self.start_delay;
            self.tracked = Some(key);
            return true;
        }
        if self.tracked == Some(key) {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.timer += self.interval;
                return true;
            }
        }
        false
    }

    /// Down now but not last frame.
    pub fn newly_pressed(&self, key: Key, keys: &KeyboardState) -> bool {
        keys.is_down(key) && self.previous.is_up(key)
    }

    /// Forget the repeating key and its timer.
    pub fn stop_tracking(&mut self) {
        self.tracked = None;
        self.timer = 0.0;
    }

    /// Remember this frame's keys for edge detection next frame.
    pub fn end_frame(&mut self, keys: &KeyboardState) {
        self.previous = keys.clone();
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// The command line being typed.
#[derive(Debug, Clone)]
pub struct InputEditor {
    text: String,
    /// Cursor position in characters, `0..=char_count`.
    cursor: usize,
    history: History,
    repeat: KeyRepeat,
}

impl InputEditor {
    /// An empty line with history sized from `config`.
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: History::new(config.history_capacity),
            repeat: KeyRepeat::new(config.repeat_start_delay, config.repeat_interval),
        }
    }

    /// Current input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Lines submitted so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_pos(self.cursor)]
    }

    /// Replace the line and put the cursor at its end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_count();
    }

    /// Insert `ch` at the cursor and step past it.
    pub fn insert(&mut self, ch: char) {
        let byte_pos = self.byte_pos(self.cursor);
        self.text.insert(byte_pos, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.remove_at_cursor();
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            self.remove_at_cursor();
        }
    }

    /// Move one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move one character right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// Jump to the start of the line.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Jump to the end of the line.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Replace the input with the next older history entry.
    pub fn recall_previous(&mut self) {
        if let Some(line) = self.history.older().map(str::to_string) {
            self.set_text(&line);
        }
    }

    /// Replace the input with the next newer history entry, stopping at the newest.
    pub fn recall_next(&mut self) {
        if let Some(line) = self.history.newer().map(str::to_string) {
            self.set_text(&line);
        }
    }

    /// Take the current line, clear the editor and record it in history.
    ///
    /// Blank lines are recorded too and count toward capacity.
    pub fn submit(&mut self) -> String {
        let line = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history.push(&line);
        line
    }

    /// Whether `key` went down this frame. Valid until the frame ends.
    pub fn newly_pressed(&self, key: Key, keys: &KeyboardState) -> bool {
        self.repeat.newly_pressed(key, keys)
    }

    /// Track key state on a frame where the editor is not receiving input.
    ///
    /// Keys held while closed never repeat once input resumes; they must be
    /// released and pressed again.
    pub fn observe(&mut self, keys: &KeyboardState) {
        self.repeat.stop_tracking();
        self.repeat.end_frame(keys);
    }

    /// Apply one frame of keyboard state.
    pub fn process(&mut self, keys: &KeyboardState, dt: f32, mapper: &dyn KeyMapper) -> KeyActivity {
        let shift = keys.shift();
        let mut activity = KeyActivity::default();

        for &key in keys.keys() {
            if key.is_modifier() || !self.repeat.fires(key, dt) {
                continue;
            }
            activity.fired = true;

            if let Some(ch) = mapper.key_to_char(key, shift) {
                self.insert(ch);
                continue;
            }
            match key {
                Key::Backspace => self.backspace(),
                Key::Delete => self.delete(),
                Key::Left => self.move_left(),
                Key::Right => self.move_right(),
                Key::Home => self.move_home(),
                Key::End => self.move_end(),
                Key::Up => self.recall_previous(),
                Key::Down => self.recall_next(),
                Key::Enter => {
                    let line = self.submit();
                    activity.events.push(EditorEvent::Submit(line));
                },
                Key::Tab | Key::Escape => activity.events.push(EditorEvent::HideRequested),
                Key::PageUp => activity.events.push(EditorEvent::ScrollPages(1)),
                Key::PageDown => activity.events.push(EditorEvent::ScrollPages(-1)),
                _ => {},
            }
        }

        self.repeat.end_frame(keys);
        activity
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_pos(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn remove_at_cursor(&mut self) {
        let byte_pos = self.byte_pos(self.cursor);
        if byte_pos < self.text.len() {
            self.text.remove(byte_pos);
        }
    }
}
