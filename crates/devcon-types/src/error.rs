//! Error types for devcon.

use std::io;

/// Errors surfaced to code that drives the console directly.
///
/// Failures reachable from typed input (a failing command, a failing
/// script) never show up here; the console reports those as text.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("command \"{0}\" is already registered")]
    DuplicateCommand(String),

    #[error("command \"{0}\" is not registered")]
    UnknownCommand(String),

    #[error("executioner stack is empty")]
    EmptyExecutionerStack,

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_command_display() {
        let e = ConsoleError::DuplicateCommand("help".into());
        assert_eq!(format!("{e}"), "command \"help\" is already registered");
    }

    #[test]
    fn unknown_command_display() {
        let e = ConsoleError::UnknownCommand("spawn".into());
        assert_eq!(format!("{e}"), "command \"spawn\" is not registered");
    }

    #[test]
    fn empty_stack_display() {
        let e = ConsoleError::EmptyExecutionerStack;
        assert_eq!(format!("{e}"), "executioner stack is empty");
    }

    #[test]
    fn config_error_display() {
        let e = ConsoleError::Config("line_capacity must be positive".into());
        assert_eq!(
            format!("{e}"),
            "config error: line_capacity must be positive"
        );
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: ConsoleError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: ConsoleError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(ConsoleError::UnknownCommand("x".into()));
        assert!(r.is_err());
    }
}
