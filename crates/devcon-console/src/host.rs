//! The console surface handed to commands and executioners.

use std::rc::Rc;

use devcon_types::error::Result;
use devcon_types::severity::Severity;

use crate::console::Dispatch;
use crate::echo::EchoListener;
use crate::executioner::CommandExecutioner;
use crate::registry::{CommandAction, CommandInfo};

/// Operations a running command may perform on the console it runs in.
pub trait ConsoleHost {
    /// Add a command. Fails with `DuplicateCommand` if the tag is taken,
    /// ignoring case.
    fn register_command(
        &mut self,
        tag: &str,
        description: &str,
        action: Box<dyn CommandAction>,
    ) -> Result<()>;

    /// Remove a command. Fails with `UnknownCommand` if it is absent.
    fn unregister_command(&mut self, tag: &str) -> Result<()>;

    /// Registered commands in registration order.
    fn commands(&self) -> Vec<CommandInfo>;

    /// Emit a line to the scrollback and every echo listener.
    fn echo_with(&mut self, severity: Severity, text: &str);

    fn echo(&mut self, text: &str) {
        self.echo_with(Severity::Standard, text);
    }

    fn echo_warning(&mut self, text: &str) {
        self.echo_with(Severity::Warning, text);
    }

    fn echo_error(&mut self, text: &str) {
        self.echo_with(Severity::Error, text);
    }

    fn register_echo_listener(&mut self, listener: Rc<dyn EchoListener>);

    /// Remove one registration of `listener`. Absent listeners are ignored.
    fn unregister_echo_listener(&mut self, listener: &Rc<dyn EchoListener>);

    /// Route every submitted line to `executioner` until it is popped.
    fn push_executioner(&mut self, executioner: Box<dyn CommandExecutioner>);

    fn pop_executioner(&mut self) -> Result<()>;

    /// Run a line as if it had been typed and submitted.
    fn execute_command(&mut self, line: &str) -> Dispatch;

    fn show(&mut self);

    fn hide(&mut self);

    /// Empty the scrollback.
    fn clear(&mut self);
}
