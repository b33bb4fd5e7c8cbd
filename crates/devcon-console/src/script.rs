//! Scripting fallback for lines that name no registered command.
//!
//! The console only talks to [`ScriptHost`]; interpreter adapters live
//! behind cargo features (see `lua`).

use std::fmt;

/// A host value exposed to scripts under a global name.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Nil,
    Bool(bool),
    Int(i64),
    Number(f64),
    Str(String),
}

impl From<bool> for ScriptValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ScriptValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ScriptValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ScriptValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// What a successful script run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Formatted result of the chunk, if it evaluated to something.
    pub value: Option<String>,
    /// Text the script printed while running.
    pub printed: String,
}

impl ScriptOutput {
    /// Output holding only a value.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            printed: String::new(),
        }
    }

    /// True with no value and no printed text.
    pub fn is_empty(&self) -> bool {
        self.value.as_deref().is_none_or(str::is_empty) && self.printed.is_empty()
    }
}

/// Errors raised by a script host.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("{0}")]
    Syntax(String),

    #[error("{0}")]
    Runtime(String),

    #[error("cannot bind \"{name}\": {reason}")]
    Bind { name: String, reason: String },

    #[error("no script host installed")]
    NoHost,
}

/// An embedded interpreter the console can fall back to.
pub trait ScriptHost {
    /// Interpreter name shown when the host is installed.
    fn name(&self) -> &str;

    /// Run one line of script text.
    fn execute(&mut self, code: &str) -> Result<ScriptOutput, ScriptError>;

    /// Expose `value` to scripts as the global `name`.
    fn bind(&mut self, name: &str, value: ScriptValue) -> Result<(), ScriptError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_convert_from_rust() {
        assert_eq!(ScriptValue::from(true), ScriptValue::Bool(true));
        assert_eq!(ScriptValue::from(7_i64), ScriptValue::Int(7));
        assert_eq!(ScriptValue::from(0.5_f64), ScriptValue::Number(0.5));
        assert_eq!(ScriptValue::from("hp"), ScriptValue::Str("hp".into()));
    }

    #[test]
    fn value_display() {
        assert_eq!(ScriptValue::Nil.to_string(), "nil");
        assert_eq!(ScriptValue::Int(-3).to_string(), "-3");
        assert_eq!(ScriptValue::Str("x".into()).to_string(), "x");
    }

    #[test]
    fn output_emptiness() {
        assert!(ScriptOutput::default().is_empty());
        assert!(ScriptOutput::value("").is_empty());
        assert!(!ScriptOutput::value("3").is_empty());
        let printed = ScriptOutput {
            value: None,
            printed: "hi\n".into(),
        };
        assert!(!printed.is_empty());
    }

    #[test]
    fn error_messages_pass_through() {
        let e = ScriptError::Runtime("attempt to call a nil value".into());
        assert_eq!(e.to_string(), "attempt to call a nil value");
        let e = ScriptError::Bind {
            name: "player".into(),
            reason: "locked".into(),
        };
        assert_eq!(e.to_string(), "cannot bind \"player\": locked");
    }
}
