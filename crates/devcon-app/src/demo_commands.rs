//! Commands the demo host registers on top of the built-ins.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context;
use devcon_console::{CommandExecutioner, Console, ConsoleHost};

/// Register the demo commands. `quit` sets `quit_flag`.
pub fn register(console: &mut Console, quit_flag: Rc<Cell<bool>>) -> devcon_console::error::Result<()> {
    let flag = Rc::clone(&quit_flag);
    console.register_fn("quit", "Exit the demo.", move |host, _, _| {
        host.echo("Bye.");
        flag.set(true);
        Ok(())
    })?;

    console.register_fn("add", "Sum numbers: add 1 2.5 3", |host, _, args| {
        let mut total = 0.0_f64;
        for arg in args.iter().filter(|a| !a.is_empty()) {
            let n: f64 = arg
                .parse()
                .with_context(|| format!("\"{arg}\" is not a number"))?;
            total += n;
        }
        host.echo(&total.to_string());
        Ok(())
    })?;

    console.register_fn("warn", "Echo a warning line.", |host, line, _| {
        let text = line.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
        host.echo_warning(text);
        Ok(())
    })?;

    console.register_fn("ask", "Ask for a name, then greet.", |host, _, _| {
        host.echo("What is your name?");
        host.push_executioner(Box::new(NamePrompt));
        Ok(())
    })?;

    Ok(())
}

/// One-shot prompt: the next submitted line is taken as a name.
struct NamePrompt;

impl CommandExecutioner for NamePrompt {
    fn execute_command(&mut self, host: &mut dyn ConsoleHost, line: &str) {
        let name = line.trim();
        if name.is_empty() {
            host.echo_warning("Name cannot be empty. Try again.");
            return;
        }
        host.echo(&format!("Hello, {name}!"));
        if let Err(e) = host.pop_executioner() {
            log::warn!("Name prompt could not pop itself: {e}");
        }
    }
}
