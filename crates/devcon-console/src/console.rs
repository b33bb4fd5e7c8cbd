//! The console host object: ties scrollback, commands, executioners,
//! scripting, the line editor and the open/close animation together.

use std::rc::Rc;

use devcon_types::backend::{KeyMapper, MonospaceMeasure, TextMeasure};
use devcon_types::config::ConsoleConfig;
use devcon_types::error::Result;
use devcon_types::input::KeyboardState;
use devcon_types::keymap::UsKeyboardLayout;
use devcon_types::severity::Severity;

use crate::commands;
use crate::echo::{EchoFanout, EchoListener};
use crate::editor::{EditorEvent, History, InputEditor};
use crate::executioner::{CommandExecutioner, ExecutionerStack, SharedExecutioner};
use crate::host::ConsoleHost;
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::line_buffer::{LineBuffer, View};
use crate::registry::{CommandAction, CommandInfo, CommandRegistry};
use crate::script::{ScriptError, ScriptHost, ScriptValue};

/// Route a submitted line took through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Handed verbatim to the top executioner.
    Executioner,
    /// The top executioner was already running this line's caller.
    ExecutionerBusy,
    /// A registered command ran and succeeded.
    Command,
    /// A registered command returned an error.
    CommandFailed,
    /// No command matched; the script host ran it.
    Script,
    /// No command matched; the script host reported an error.
    ScriptFailed,
    /// No command matched and no script host is installed.
    Unknown,
}

/// Everything a renderer needs to draw the console for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleFrame {
    pub state: LifecycleState,
    pub transition: f32,
    /// Vertical offset of the panel; `-panel_height` when fully closed.
    pub slide_offset: f32,
    /// Visible scrollback, oldest first. Empty while closed.
    pub lines: Vec<String>,
    /// Prompt followed by the line being typed.
    pub prompt_line: String,
    /// Pixel x of the cursor within `prompt_line`.
    pub cursor_x: f32,
    pub cursor_visible: bool,
}

/// An in-process developer console.
///
/// Drive it with [`Console::update`] once per frame and read
/// [`Console::frame`] to draw it.
pub struct Console {
    config: ConsoleConfig,
    prompt: String,
    draw_width: f32,
    lines: LineBuffer,
    registry: CommandRegistry,
    executioners: ExecutionerStack,
    script_host: Option<Box<dyn ScriptHost>>,
    listeners: EchoFanout,
    editor: InputEditor,
    lifecycle: Lifecycle,
    measure: Box<dyn TextMeasure>,
    key_mapper: Box<dyn KeyMapper>,
    scroll_offset: usize,
    blink_timer: f32,
}

impl Console {
    /// Build a console, register the built-in commands and print the banner.
    pub fn new(
        config: ConsoleConfig,
        measure: Box<dyn TextMeasure>,
        key_mapper: Box<dyn KeyMapper>,
    ) -> Result<Self> {
        config.validate()?;

        let mut registry = CommandRegistry::new();
        commands::register_builtins(&mut registry)?;

        let mut console = Self {
            prompt: config.prompt.clone(),
            draw_width: config.draw_width,
            lines: LineBuffer::new(config.line_capacity),
            registry,
            executioners: ExecutionerStack::new(),
            script_host: None,
            listeners: EchoFanout::new(),
            editor: InputEditor::new(&config),
            lifecycle: Lifecycle::new(config.open_speed, config.close_speed),
            measure,
            key_mapper,
            scroll_offset: 0,
            blink_timer: 0.0,
            config,
        };

        console.echo(&format!(">>> devcon v{} <<<", env!("CARGO_PKG_VERSION")));
        console.echo("");
        log::info!(
            "Console ready ({} line scrollback, {} commands)",
            console.lines.capacity(),
            console.registry.len()
        );
        Ok(console)
    }

    /// Console with monospace measurement and a US keyboard layout.
    pub fn headless(config: ConsoleConfig) -> Result<Self> {
        Self::new(
            config,
            Box::new(MonospaceMeasure::default()),
            Box::new(UsKeyboardLayout),
        )
    }

    /// A console with the default config and no renderer.
    pub fn with_defaults() -> Result<Self> {
        Self::headless(ConsoleConfig::default())
    }

    /// Register a closure as a command.
    pub fn register_fn<F>(&mut self, tag: &str, description: &str, f: F) -> Result<()>
    where
        F: Fn(&mut dyn ConsoleHost, &str, &[&str]) -> anyhow::Result<()> + 'static,
    {
        self.registry.register(tag, description, Box::new(f))
    }

    /// Install the interpreter used for lines that match no command.
    pub fn set_script_host(&mut self, host: Box<dyn ScriptHost>) {
        let name = host.name().to_string();
        self.script_host = Some(host);
        self.echo(&format!("[HOST] Using {name}"));
    }

    /// Whether unknown commands fall through to a script host.
    pub fn has_script_host(&self) -> bool {
        self.script_host.is_some()
    }

    /// Expose a value to scripts as a global.
    pub fn bind_script_value(&mut self, name: &str, value: ScriptValue) -> std::result::Result<(), ScriptError> {
        match self.script_host.as_mut() {
            Some(host) => host.bind(name, value),
            None => Err(ScriptError::NoHost),
        }
    }

    // -- per-frame --

    /// Advance the console by `dt` seconds with this frame's keyboard state.
    pub fn update(&mut self, dt: f32, keys: &KeyboardState) {
        self.lifecycle.advance(dt);

        if !self.lifecycle.accepts_input() {
            let toggle = self.editor.newly_pressed(self.config.toggle_key, keys);
            self.editor.observe(keys);
            if toggle && self.lifecycle.state() == LifecycleState::Closed {
                self.lifecycle.show();
            }
            return;
        }

        let activity = self
            .editor
            .process(keys, dt, self.key_mapper.as_ref());
        if activity.fired || self.blink_timer > 2.0 * self.config.cursor_blink_duration {
            self.blink_timer = 0.0;
        } else {
            self.blink_timer += dt;
        }

        for event in activity.events {
            match event {
                EditorEvent::Submit(line) => {
                    self.scroll_offset = 0;
                    self.execute_command(&line);
                },
                EditorEvent::HideRequested => {
                    self.lifecycle.hide();
                },
                EditorEvent::ScrollPages(pages) => self.scroll_pages(pages),
            }
        }
    }

    /// Snapshot of what to draw this frame.
    pub fn frame(&self) -> ConsoleFrame {
        let state = self.lifecycle.state();
        let transition = self.lifecycle.transition();
        let open = state != LifecycleState::Closed;

        let lines = if open {
            self.visible_lines().map(str::to_string).collect()
        } else {
            Vec::new()
        };
        let prompt_line = format!("{}{}", self.prompt, self.editor.text());
        let before_cursor = format!("{}{}", self.prompt, self.editor.before_cursor());

        ConsoleFrame {
            state,
            transition,
            slide_offset: -(1.0 - transition) * self.config.panel_height(),
            lines,
            prompt_line,
            cursor_x: self.measure.measure_width(&before_cursor),
            cursor_visible: open && self.blink_timer < self.config.cursor_blink_duration,
        }
    }

    // -- accessors --

    /// The config this console was built from.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Current open/close state.
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Whether the console is on screen and owns keyboard focus.
    ///
    /// Hosts check this to stop routing keys to gameplay while the console
    /// is opening, open or closing.
    pub fn is_focused(&self) -> bool {
        self.lifecycle.is_focused()
    }

    /// Open fraction, 0.0 hidden to 1.0 fully shown.
    pub fn transition(&self) -> f32 {
        self.lifecycle.transition()
    }

    /// Prompt drawn before the input line.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    /// Width that new lines are wrapped to.
    pub fn draw_width(&self) -> f32 {
        self.draw_width
    }

    /// Width used to wrap lines echoed from now on.
    pub fn set_draw_width(&mut self, width: f32) {
        self.draw_width = width;
    }

    /// Pages scrolled back from the newest line.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// All stored scrollback lines, oldest first.
    pub fn lines(&self) -> View<'_> {
        self.lines.view(self.lines.capacity(), 0)
    }

    /// The window of lines currently on screen.
    pub fn visible_lines(&self) -> View<'_> {
        self.lines
            .view(self.config.max_lines_on_screen, self.scroll_offset)
    }

    /// The line being typed.
    pub fn input(&self) -> &str {
        self.editor.text()
    }

    /// Cursor position in the input line, in characters.
    pub fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    /// Submitted lines, oldest first.
    pub fn history(&self) -> &History {
        self.editor.history()
    }

    /// Executioners currently stacked.
    pub fn executioner_depth(&self) -> usize {
        self.executioners.len()
    }

    // -- dispatch helpers --

    fn scroll_pages(&mut self, pages: i32) {
        let page = self.config.max_lines_on_screen;
        let max = self.lines.max_scroll(page);
        let step = page.saturating_mul(pages.unsigned_abs() as usize);
        self.scroll_offset = if pages > 0 {
            self.scroll_offset.saturating_add(step).min(max)
        } else {
            self.scroll_offset.saturating_sub(step)
        };
    }

    fn run_executioner(&mut self, top: &SharedExecutioner, line: &str) -> Dispatch {
        match top.try_borrow_mut() {
            Ok(mut executioner) => {
                executioner.execute_command(self, line);
                Dispatch::Executioner
            },
            Err(_) => {
                log::warn!("Executioner re-entered with {line:?}");
                self.echo_error("Executioner is already handling a line");
                Dispatch::ExecutionerBusy
            },
        }
    }

    fn run_command(&mut self, action: &dyn CommandAction, tag: &str, line: &str, args: &[&str]) -> Dispatch {
        match action.execute(self, line, args) {
            Ok(()) => Dispatch::Command,
            Err(e) => {
                log::warn!("Command {tag:?} failed: {e:#}");
                self.echo_error("Unhandled Exception occurred");
                let message = format!("{e:#}");
                for part in message.lines() {
                    self.echo_error(part);
                }
                Dispatch::CommandFailed
            },
        }
    }

    fn run_script(&mut self, code: &str) -> Dispatch {
        let Some(host) = self.script_host.as_mut() else {
            self.echo("Unknown Command");
            return Dispatch::Unknown;
        };
        match host.execute(code) {
            Ok(output) => {
                if let Some(value) = output.value.as_deref().filter(|v| !v.is_empty()) {
                    self.echo(value);
                }
                let printed = output.printed.trim_end_matches('\n');
                if !printed.is_empty() {
                    self.echo(printed);
                }
                Dispatch::Script
            },
            Err(e) => {
                log::warn!("Script failed: {e}");
                self.echo_error(&e.to_string());
                Dispatch::ScriptFailed
            },
        }
    }
}

impl ConsoleHost for Console {
    fn register_command(
        &mut self,
        tag: &str,
        description: &str,
        action: Box<dyn CommandAction>,
    ) -> Result<()> {
        self.registry.register(tag, description, action)
    }

    fn unregister_command(&mut self, tag: &str) -> Result<()> {
        self.registry.unregister(tag)
    }

    fn commands(&self) -> Vec<CommandInfo> {
        self.registry.infos()
    }

    fn echo_with(&mut self, severity: Severity, text: &str) {
        self.lines
            .append(text, self.draw_width, self.measure.as_ref());
        self.listeners.emit(severity, text);
    }

    fn register_echo_listener(&mut self, listener: Rc<dyn EchoListener>) {
        self.listeners.register(listener);
    }

    fn unregister_echo_listener(&mut self, listener: &Rc<dyn EchoListener>) {
        self.listeners.unregister(listener);
    }

    fn push_executioner(&mut self, executioner: Box<dyn CommandExecutioner>) {
        self.executioners.push(executioner);
        log::debug!("Executioner pushed (depth {})", self.executioners.len());
    }

    fn pop_executioner(&mut self) -> Result<()> {
        self.executioners.pop()?;
        log::debug!("Executioner popped (depth {})", self.executioners.len());
        Ok(())
    }

    fn execute_command(&mut self, line: &str) -> Dispatch {
        if let Some(top) = self.executioners.top() {
            return self.run_executioner(&top, line);
        }

        let echoed = format!("{}{line}", self.prompt);
        self.echo(&echoed);

        let trimmed = line.trim_start_matches(' ');
        let parts: Vec<&str> = trimmed.split(' ').collect();
        let (tag, args) = parts.split_first().map_or(("", &[][..]), |(t, a)| (*t, a));

        match self.registry.lookup(tag) {
            Some(action) => {
                log::debug!("Dispatch {tag:?} to command");
                self.run_command(&*action, tag, trimmed, args)
            },
            None => {
                log::debug!("No command {tag:?}; falling back");
                self.run_script(trimmed)
            },
        }
    }

    fn show(&mut self) {
        self.lifecycle.show();
    }

    fn hide(&mut self) {
        self.lifecycle.hide();
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.scroll_offset = 0;
    }
}
