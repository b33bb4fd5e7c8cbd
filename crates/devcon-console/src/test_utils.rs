//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use devcon_types::severity::Severity;

use crate::echo::EchoListener;
use crate::executioner::CommandExecutioner;
use crate::host::ConsoleHost;
use crate::script::{ScriptError, ScriptHost, ScriptOutput, ScriptValue};

/// Keeps every echoed line.
#[derive(Default)]
pub struct RecordingListener {
    lines: RefCell<Vec<(Severity, String)>>,
}

impl RecordingListener {
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.borrow().clone()
    }
}

impl EchoListener for RecordingListener {
    fn echo(&self, severity: Severity, text: &str) {
        self.lines.borrow_mut().push((severity, text.to_string()));
    }
}

/// Executioner that records the lines it receives.
pub struct RecordingExecutioner {
    received: Rc<RefCell<Vec<String>>>,
}

impl RecordingExecutioner {
    pub fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
        let received = Rc::new(RefCell::new(Vec::new()));
        let exec = Self {
            received: Rc::clone(&received),
        };
        (exec, received)
    }
}

impl CommandExecutioner for RecordingExecutioner {
    fn execute_command(&mut self, _host: &mut dyn ConsoleHost, line: &str) {
        self.received.borrow_mut().push(line.to_string());
    }
}

/// Scripted interpreter:
///
/// - `fail <msg>` errors with `script failed: <msg>`
/// - `print <text>` prints `<text>` and returns `ran: print <text>`
/// - `get <name>` returns the bound value
/// - anything else returns `ran: <code>`
#[derive(Default)]
pub struct MockScriptHost {
    bound: HashMap<String, ScriptValue>,
}

impl MockScriptHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptHost for MockScriptHost {
    fn name(&self) -> &str {
        "Mock"
    }

    fn execute(&mut self, code: &str) -> Result<ScriptOutput, ScriptError> {
        if let Some(msg) = code.strip_prefix("fail ") {
            return Err(ScriptError::Runtime(format!("script failed: {msg}")));
        }
        if let Some(name) = code.strip_prefix("get ") {
            return self
                .bound
                .get(name)
                .map(|v| ScriptOutput::value(v.to_string()))
                .ok_or_else(|| ScriptError::Runtime(format!("{name} is nil")));
        }
        let printed = code
            .strip_prefix("print ")
            .map(|text| format!("{text}\n"))
            .unwrap_or_default();
        Ok(ScriptOutput {
            value: Some(format!("ran: {code}")),
            printed,
        })
    }

    fn bind(&mut self, name: &str, value: ScriptValue) -> Result<(), ScriptError> {
        self.bound.insert(name.to_string(), value);
        Ok(())
    }
}
