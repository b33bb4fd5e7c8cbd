//! devcon headless demo.
//!
//! Reads lines from stdin and types each one into the console through the
//! same key pipeline a game would drive, one simulated frame at a time.
//! Console output is mirrored to stdout. Type `help` for commands and
//! `quit` to exit.

mod demo_commands;
mod driver;

use std::cell::Cell;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};

use devcon_console::config::ConsoleConfig;
use devcon_console::severity::Severity;
use devcon_console::{Console, ConsoleHost, EchoListener, FileEchoListener};

/// Mirrors console lines to stdout.
struct StdoutEcho;

impl EchoListener for StdoutEcho {
    fn echo(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Standard => println!("{text}"),
            _ => println!("[{severity}] {text}"),
        }
    }
}

fn load_config() -> Result<ConsoleConfig> {
    // Config path from CLI arg or DEVCON_CONFIG env var.
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DEVCON_CONFIG").ok())
        .map(PathBuf::from);
    match path {
        Some(path) => {
            let config = ConsoleConfig::from_file(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        },
        None => Ok(ConsoleConfig::default()),
    }
}

/// Append every console line to the file at `path`.
///
/// The returned handle unregisters the listener; the file is flushed once
/// the last handle is dropped.
fn attach_echo_log(console: &mut Console, path: &Path) -> Result<Rc<dyn EchoListener>> {
    let listener: Rc<dyn EchoListener> = Rc::new(
        FileEchoListener::append(path)
            .with_context(|| format!("opening echo log {}", path.display()))?,
    );
    console.register_echo_listener(Rc::clone(&listener));
    log::info!("Echoing console lines to {}", path.display());
    Ok(listener)
}

#[cfg(feature = "lua")]
fn install_script_host(console: &mut Console) {
    match devcon_console::lua::LuaScriptHost::new() {
        Ok(host) => {
            console.set_script_host(Box::new(host));
            if let Err(e) = console.bind_script_value("app_name", "devcon-app".into()) {
                log::warn!("Could not bind app_name: {e}");
            }
        },
        Err(e) => log::warn!("Lua host unavailable: {e}"),
    }
}

#[cfg(not(feature = "lua"))]
fn install_script_host(_console: &mut Console) {
    log::debug!("Built without the lua feature; no script fallback");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!(
        "Starting devcon ({} lines on screen, {} line scrollback)",
        config.max_lines_on_screen,
        config.line_capacity,
    );

    let mut console = Console::headless(config)?;
    let stdout_echo: Rc<dyn EchoListener> = Rc::new(StdoutEcho);
    console.register_echo_listener(Rc::clone(&stdout_echo));

    // Optional transcript file from DEVCON_ECHO_LOG.
    let file_echo = match std::env::var_os("DEVCON_ECHO_LOG") {
        Some(path) => Some(attach_echo_log(&mut console, Path::new(&path))?),
        None => None,
    };

    let quit = Rc::new(Cell::new(false));
    demo_commands::register(&mut console, Rc::clone(&quit))?;
    install_script_host(&mut console);

    driver::open(&mut console)?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        driver::submit(&mut console, &line);
        if quit.get() {
            break;
        }
    }

    console.unregister_echo_listener(&stdout_echo);
    if let Some(listener) = file_echo {
        console.unregister_echo_listener(&listener);
    }
    log::info!(
        "devcon shut down cleanly ({} commands in history)",
        console.history().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_log_appends_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("echo.log");
        std::fs::write(&path, "earlier session\n").unwrap();

        let mut console = Console::with_defaults().unwrap();
        let listener = attach_echo_log(&mut console, &path).unwrap();
        console.execute_command("echo hello log");
        console.execute_command("nosuchcommand");
        console.unregister_echo_listener(&listener);
        console.execute_command("echo not logged");
        drop(listener);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "earlier session");
        assert!(lines.contains(&"Standard >> hello log"));
        assert!(lines.contains(&"Standard >> Unknown Command"));
        assert!(!text.contains("not logged"));
    }

    #[test]
    fn echo_log_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/echo.log");
        let mut console = Console::with_defaults().unwrap();
        let err = attach_echo_log(&mut console, &path)
            .err()
            .expect("attach_echo_log should fail");
        assert!(format!("{err}").contains("opening echo log"));
    }
}
