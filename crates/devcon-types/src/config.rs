//! Console configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConsoleError, Result};
use crate::input::Key;

/// Tunables for a console instance.
///
/// Every field is optional in TOML; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Scrollback ring capacity in wrapped lines.
    pub line_capacity: usize,
    /// Number of submitted commands kept for Up/Down recall.
    pub history_capacity: usize,
    /// Lines drawn at once; also the PageUp/PageDown step.
    pub max_lines_on_screen: usize,
    /// Prefix shown before the input line and echoed before commands.
    pub prompt: String,
    /// Seconds a key must be held before it starts repeating.
    pub repeat_start_delay: f32,
    /// Seconds between repeats while a key stays held.
    pub repeat_interval: f32,
    /// Seconds the cursor stays visible per blink.
    pub cursor_blink_duration: f32,
    /// Slide-in rate, in panel heights per second.
    pub open_speed: f32,
    /// Slide-out rate, in panel heights per second.
    pub close_speed: f32,
    /// Width available for text; longer lines are word-wrapped.
    pub draw_width: f32,
    /// Vertical advance per line, used for the slide offset.
    pub line_height: f32,
    /// Key that opens the console while it is closed.
    pub toggle_key: Key,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            line_capacity: 20_000,
            history_capacity: 32,
            max_lines_on_screen: 20,
            prompt: "> ".to_string(),
            repeat_start_delay: 0.5,
            repeat_interval: 0.05,
            cursor_blink_duration: 0.25,
            open_speed: 5.0,
            close_speed: 5.0,
            draw_width: 640.0,
            line_height: 16.0,
            toggle_key: Key::Tab,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConsoleError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded console config from {}", path.display());
        Ok(config)
    }

    /// Reject values the console cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.line_capacity == 0 {
            return Err(ConsoleError::Config(
                "line_capacity must be positive".into(),
            ));
        }
        if self.history_capacity == 0 {
            return Err(ConsoleError::Config(
                "history_capacity must be positive".into(),
            ));
        }
        if self.max_lines_on_screen == 0 {
            return Err(ConsoleError::Config(
                "max_lines_on_screen must be positive".into(),
            ));
        }
        for (name, value) in [
            ("repeat_interval", self.repeat_interval),
            ("open_speed", self.open_speed),
            ("close_speed", self.close_speed),
            ("draw_width", self.draw_width),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConsoleError::Config(format!("{name} must be positive")));
            }
        }
        if self.repeat_start_delay < 0.0 || self.cursor_blink_duration < 0.0 {
            return Err(ConsoleError::Config(
                "timer durations must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Height of the console panel when fully open.
    pub fn panel_height(&self) -> f32 {
        self.max_lines_on_screen as f32 * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let c = ConsoleConfig::default();
        assert_eq!(c.line_capacity, 20_000);
        assert_eq!(c.history_capacity, 32);
        assert_eq!(c.max_lines_on_screen, 20);
        assert_eq!(c.prompt, "> ");
        assert_eq!(c.repeat_start_delay, 0.5);
        assert_eq!(c.repeat_interval, 0.05);
        assert_eq!(c.toggle_key, Key::Tab);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(c, ConsoleConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let c = ConsoleConfig::from_toml(
            r#"
line_capacity = 500
prompt = "$ "
toggle_key = "Grave"
"#,
        )
        .unwrap();
        assert_eq!(c.line_capacity, 500);
        assert_eq!(c.prompt, "$ ");
        assert_eq!(c.toggle_key, Key::Grave);
        assert_eq!(c.history_capacity, 32);
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = ConsoleConfig::from_toml("line_capacity = 0").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn non_positive_speed_rejected() {
        let err = ConsoleConfig::from_toml("open_speed = 0.0").unwrap_err();
        assert!(format!("{err}").contains("open_speed"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ConsoleConfig::from_toml("line_capacity = [").unwrap_err();
        assert!(matches!(err, ConsoleError::TomlParse(_)));
    }

    #[test]
    fn unknown_key_name_is_parse_error() {
        let err = ConsoleConfig::from_toml("toggle_key = \"Banana\"").unwrap_err();
        assert!(matches!(err, ConsoleError::TomlParse(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history_capacity = 8").unwrap();
        let c = ConsoleConfig::from_file(file.path()).unwrap();
        assert_eq!(c.history_capacity, 8);
    }

    #[test]
    fn from_file_missing_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConsoleConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn panel_height_from_lines() {
        let c = ConsoleConfig {
            max_lines_on_screen: 10,
            line_height: 12.0,
            ..ConsoleConfig::default()
        };
        assert_eq!(c.panel_height(), 120.0);
    }
}
