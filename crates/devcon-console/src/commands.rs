//! Built-in console commands.

use devcon_types::error::Result;

use crate::host::ConsoleHost;
use crate::registry::{CommandAction, CommandInfo, CommandRegistry};

/// Register `help`, `cls`, `clear` and `echo`.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    reg.register("help", "Show command descriptions.", Box::new(HelpCmd))?;
    reg.register("cls", "Clear console.", Box::new(ClearCmd))?;
    reg.register("clear", "Clear console.", Box::new(ClearCmd))?;
    reg.register("echo", "Display messages.", Box::new(EchoCmd))?;
    Ok(())
}

/// One aligned `tag    description` row per command.
///
/// Tags are padded to the longest tag so descriptions line up.
pub fn help_lines(commands: &[CommandInfo]) -> Vec<String> {
    let width = commands
        .iter()
        .map(|c| c.tag.chars().count())
        .max()
        .unwrap_or(0);
    commands
        .iter()
        .map(|c| format!("{:<width$}    {}", c.tag, c.description))
        .collect()
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl CommandAction for HelpCmd {
    fn execute(&self, host: &mut dyn ConsoleHost, _line: &str, _args: &[&str]) -> anyhow::Result<()> {
        for line in help_lines(&host.commands()) {
            host.echo(&line);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// cls / clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl CommandAction for ClearCmd {
    fn execute(&self, host: &mut dyn ConsoleHost, _line: &str, _args: &[&str]) -> anyhow::Result<()> {
        host.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl CommandAction for EchoCmd {
    fn execute(&self, host: &mut dyn ConsoleHost, line: &str, _args: &[&str]) -> anyhow::Result<()> {
        // Everything after the command word and one space, spacing intact.
        let text = line.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
        host.echo(text);
        Ok(())
    }
}
