//! Open/close animation state of the console panel.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Closed,
    Opening,
    Opened,
    Closing,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "Closed",
            Self::Opening => "Opening",
            Self::Opened => "Opened",
            Self::Closing => "Closing",
        };
        f.write_str(name)
    }
}

/// Slide state machine: `Closed -> Opening -> Opened -> Closing -> Closed`.
///
/// `transition` is 0 when fully closed and 1 when fully open.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: LifecycleState,
    transition: f32,
    open_speed: f32,
    close_speed: f32,
}

impl Lifecycle {
    /// Starts `Closed`. Speeds are transition units per second.
    pub fn new(open_speed: f32, close_speed: f32) -> Self {
        Self {
            state: LifecycleState::Closed,
            transition: 0.0,
            open_speed,
            close_speed,
        }
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Open fraction in `0.0..=1.0`.
    pub fn transition(&self) -> f32 {
        self.transition
    }

    /// Start opening. Only valid from `Closed`.
    pub fn show(&mut self) -> bool {
        if self.state != LifecycleState::Closed {
            return false;
        }
        self.set_state(LifecycleState::Opening);
        true
    }

    /// Start closing. Only valid from `Opened`.
    pub fn hide(&mut self) -> bool {
        if self.state != LifecycleState::Opened {
            return false;
        }
        self.set_state(LifecycleState::Closing);
        true
    }

    /// Move the animation forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        match self.state {
            LifecycleState::Opening => {
                self.transition = (self.transition + self.open_speed * dt).min(1.0);
                if self.transition >= 1.0 {
                    self.set_state(LifecycleState::Opened);
                }
            },
            LifecycleState::Closing => {
                self.transition = (self.transition - self.close_speed * dt).max(0.0);
                if self.transition <= 0.0 {
                    self.set_state(LifecycleState::Closed);
                }
            },
            LifecycleState::Closed | LifecycleState::Opened => {},
        }
    }

    /// Whether the console is on screen at all.
    pub fn is_focused(&self) -> bool {
        self.state != LifecycleState::Closed
    }

    /// Whether typed input should reach the editor.
    pub fn accepts_input(&self) -> bool {
        self.state == LifecycleState::Opened
    }

    fn set_state(&mut self, state: LifecycleState) {
        log::debug!("Console {} -> {state}", self.state);
        self.state = state;
    }
}
