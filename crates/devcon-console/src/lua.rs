//! Lua 5.4 script host backed by `mlua`.
//!
//! `print` is redirected into the captured output of each run. A line is
//! first tried as an expression (`return <line>`) so `1 + 2` shows `3` the
//! way an interactive prompt would; statements fall back to a plain chunk.

use std::cell::RefCell;
use std::rc::Rc;

use mlua::{Lua, MultiValue, Value, Variadic};

use crate::script::{ScriptError, ScriptHost, ScriptOutput, ScriptValue};

const CHUNK_NAME: &str = "console";

/// Lua 5.4 script host.
pub struct LuaScriptHost {
    lua: Lua,
    printed: Rc<RefCell<String>>,
}

impl LuaScriptHost {
    /// Start a fresh Lua state with `print` captured.
    pub fn new() -> Result<Self, ScriptError> {
        let lua = Lua::new();
        let printed = Rc::new(RefCell::new(String::new()));

        let sink = Rc::clone(&printed);
        let print = lua
            .create_function(move |_, args: Variadic<Value>| {
                let mut out = sink.borrow_mut();
                for (i, value) in args.iter().enumerate() {
                    if i > 0 {
                        out.push('\t');
                    }
                    out.push_str(&format_value(value));
                }
                out.push('\n');
                Ok(())
            })
            .map_err(to_script_error)?;
        lua.globals()
            .set("print", print)
            .map_err(to_script_error)?;

        Ok(Self { lua, printed })
    }

    fn eval(&self, code: &str) -> mlua::Result<MultiValue> {
        let as_expression = self
            .lua
            .load(format!("return {code}"))
            .set_name(CHUNK_NAME)
            .eval::<MultiValue>();
        match as_expression {
            Err(mlua::Error::SyntaxError { .. }) => {
                self.lua.load(code).set_name(CHUNK_NAME).eval::<MultiValue>()
            },
            other => other,
        }
    }
}

impl ScriptHost for LuaScriptHost {
    fn name(&self) -> &str {
        "Lua 5.4"
    }

    fn execute(&mut self, code: &str) -> Result<ScriptOutput, ScriptError> {
        self.printed.borrow_mut().clear();
        let result = self.eval(code);
        let printed = std::mem::take(&mut *self.printed.borrow_mut());
        let values = result.map_err(to_script_error)?;

        let value = if values.is_empty() {
            None
        } else {
            let parts: Vec<String> = values.iter().map(format_value).collect();
            Some(parts.join("\t"))
        };
        Ok(ScriptOutput { value, printed })
    }

    fn bind(&mut self, name: &str, value: ScriptValue) -> Result<(), ScriptError> {
        let globals = self.lua.globals();
        let result = match value {
            ScriptValue::Nil => globals.set(name, Value::Nil),
            ScriptValue::Bool(b) => globals.set(name, b),
            ScriptValue::Int(i) => globals.set(name, i),
            ScriptValue::Number(n) => globals.set(name, n),
            ScriptValue::Str(s) => globals.set(name, s),
        };
        result.map_err(|e| ScriptError::Bind {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.to_string_lossy().to_string(),
        other => format!("<{}>", other.type_name()),
    }
}

fn to_script_error(e: mlua::Error) -> ScriptError {
    match e {
        mlua::Error::SyntaxError { message, .. } => ScriptError::Syntax(message),
        mlua::Error::RuntimeError(message) => ScriptError::Runtime(message),
        other => ScriptError::Runtime(other.to_string()),
    }
}
