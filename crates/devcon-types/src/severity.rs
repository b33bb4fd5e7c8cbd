//! Message severities carried by every echoed line.

use std::fmt;

/// How an emitted console line should be treated by listeners.
///
/// The scrollback does not retain this; it only travels with the
/// emission to registered echo listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Standard,
    Warning,
    Error,
}

impl Severity {
    /// Name used in log prefixes and display.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    /// Matching level on the `log` facade.
    pub fn log_level(self) -> log::Level {
        match self {
            Self::Standard => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard() {
        assert_eq!(Severity::default(), Severity::Standard);
    }

    #[test]
    fn display_names() {
        assert_eq!(Severity::Standard.to_string(), "Standard");
        assert_eq!(Severity::Warning.to_string(), "Warning");
        assert_eq!(Severity::Error.to_string(), "Error");
    }

    #[test]
    fn log_levels() {
        assert_eq!(Severity::Standard.log_level(), log::Level::Info);
        assert_eq!(Severity::Warning.log_level(), log::Level::Warn);
        assert_eq!(Severity::Error.log_level(), log::Level::Error);
    }
}
