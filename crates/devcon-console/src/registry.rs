//! Command action trait and the name-keyed command table.

use std::collections::HashMap;
use std::rc::Rc;

use devcon_types::error::{ConsoleError, Result};

use crate::host::ConsoleHost;

/// Something a console command runs.
///
/// Receives the console, the command line with leading spaces trimmed, and
/// the space-separated arguments after the command word. Closures with the
/// matching signature implement this directly.
pub trait CommandAction {
    fn execute(&self, host: &mut dyn ConsoleHost, line: &str, args: &[&str]) -> anyhow::Result<()>;
}

impl<F> CommandAction for F
where
    F: Fn(&mut dyn ConsoleHost, &str, &[&str]) -> anyhow::Result<()>,
{
    fn execute(&self, host: &mut dyn ConsoleHost, line: &str, args: &[&str]) -> anyhow::Result<()> {
        self(host, line, args)
    }
}

/// Box a closure as a [`CommandAction`].
///
/// Spelling the bound out here lets closure arguments infer their types.
pub fn action<F>(f: F) -> Box<dyn CommandAction>
where
    F: Fn(&mut dyn ConsoleHost, &str, &[&str]) -> anyhow::Result<()> + 'static,
{
    Box::new(f)
}

/// Tag and description of a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub tag: String,
    pub description: String,
}

struct CommandEntry {
    info: CommandInfo,
    action: Rc<dyn CommandAction>,
}

/// Registered commands, looked up case-insensitively.
///
/// Iteration follows registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandEntry>,
    order: Vec<String>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. Fails if the tag is taken, ignoring case.
    pub fn register(
        &mut self,
        tag: &str,
        description: &str,
        action: Box<dyn CommandAction>,
    ) -> Result<()> {
        let key = tag.to_lowercase();
        if self.commands.contains_key(&key) {
            return Err(ConsoleError::DuplicateCommand(tag.to_string()));
        }
        self.commands.insert(
            key.clone(),
            CommandEntry {
                info: CommandInfo {
                    tag: tag.to_string(),
                    description: description.to_string(),
                },
                action: Rc::from(action),
            },
        );
        self.order.push(key);
        Ok(())
    }

    /// Remove a command. Fails if no command has this tag, ignoring case.
    pub fn unregister(&mut self, tag: &str) -> Result<()> {
        let key = tag.to_lowercase();
        if self.commands.remove(&key).is_none() {
            return Err(ConsoleError::UnknownCommand(tag.to_string()));
        }
        self.order.retain(|k| *k != key);
        Ok(())
    }

    /// The action for `tag`, shared so it can run while the registry is
    /// being modified.
    pub fn lookup(&self, tag: &str) -> Option<Rc<dyn CommandAction>> {
        self.commands
            .get(&tag.to_lowercase())
            .map(|entry| Rc::clone(&entry.action))
    }

    /// Whether `tag` is registered, ignoring case.
    pub fn contains(&self, tag: &str) -> bool {
        self.commands.contains_key(&tag.to_lowercase())
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True before any command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.order
            .iter()
            .filter_map(|key| self.commands.get(key).map(|entry| &entry.info))
    }

    /// Tag and help text of every command, in registration order.
    pub fn infos(&self) -> Vec<CommandInfo> {
        self.iter().cloned().collect()
    }
}
