//! devcon console core.
//!
//! A frame-driven developer console: a scrollback ring, case-insensitive
//! command registry with built-ins, modal executioners, a line editor with
//! history and key repeat, an open/close slide animation, and an optional
//! scripting fallback for lines that match no command.

// Re-exports from devcon-types (foundation types and traits).
pub use devcon_types::backend;
pub use devcon_types::config;
pub use devcon_types::error;
pub use devcon_types::input;
pub use devcon_types::keymap;
pub use devcon_types::severity;

pub mod commands;
pub mod console;
pub mod echo;
pub mod editor;
pub mod executioner;
pub mod host;
pub mod lifecycle;
pub mod line_buffer;
#[cfg(feature = "lua")]
pub mod lua;
pub mod registry;
pub mod script;

#[cfg(test)]
pub(crate) mod test_utils;

pub use console::{Console, ConsoleFrame, Dispatch};
pub use echo::{EchoListener, FileEchoListener, LogEchoListener};
pub use executioner::CommandExecutioner;
pub use host::ConsoleHost;
pub use registry::{CommandAction, CommandInfo, action};
pub use script::{ScriptError, ScriptHost, ScriptOutput, ScriptValue};
