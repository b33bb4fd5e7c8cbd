//! Echo fan-out: every emitted console line also goes to listeners.
//!
//! Listeners see the text exactly as emitted, before it is split and
//! wrapped for the scrollback.

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use devcon_types::error::Result;
use devcon_types::severity::Severity;

/// Observer of every line the console emits.
pub trait EchoListener {
    /// Called once per emission, with the unwrapped text.
    fn echo(&self, severity: Severity, text: &str);
}

/// Registered echo listeners, notified in registration order.
#[derive(Default)]
pub struct EchoFanout {
    listeners: Vec<Rc<dyn EchoListener>>,
}

impl EchoFanout {
    /// An empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. Registering the same listener twice notifies it twice.
    pub fn register(&mut self, listener: Rc<dyn EchoListener>) {
        self.listeners.push(listener);
    }

    /// Remove the first registration of `listener`, compared by identity.
    ///
    /// Returns `false` if it was not registered.
    pub fn unregister(&mut self, listener: &Rc<dyn EchoListener>) -> bool {
        let position = self
            .listeners
            .iter()
            .position(|l| std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(listener)));
        match position {
            Some(i) => {
                self.listeners.remove(i);
                true
            },
            None => false,
        }
    }

    /// Send one line to every listener.
    pub fn emit(&self, severity: Severity, text: &str) {
        for listener in &self.listeners {
            listener.echo(severity, text);
        }
    }

    /// Number of registrations, duplicates included.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True with no listeners registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Forwards console lines to the `log` facade under `devcon::echo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEchoListener;

impl EchoListener for LogEchoListener {
    fn echo(&self, severity: Severity, text: &str) {
        log::log!(target: "devcon::echo", severity.log_level(), "{text}");
    }
}

/// Appends console lines to a text file as `<Severity> >> <text>`.
///
/// Write failures are logged and dropped so a full disk never takes the
/// console down with it.
pub struct FileEchoListener {
    path: PathBuf,
    writer: RefCell<BufWriter<File>>,
}

impl FileEchoListener {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_file(path, file))
    }

    /// Open `path` for appending, creating it if needed.
    pub fn append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_file(path, file))
    }

    fn from_file(path: &Path, file: File) -> Self {
        log::debug!("Echo log file: {}", path.display());
        Self {
            path: path.to_path_buf(),
            writer: RefCell::new(BufWriter::new(file)),
        }
    }

    /// Where the transcript is written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Push buffered lines to disk. Dropping the listener also flushes.
    pub fn flush(&self) -> Result<()> {
        self.writer.borrow_mut().flush()?;
        Ok(())
    }
}

impl EchoListener for FileEchoListener {
    fn echo(&self, severity: Severity, text: &str) {
        let mut writer = self.writer.borrow_mut();
        if let Err(e) = writeln!(writer, "{severity} >> {text}") {
            log::warn!("Failed to write to {}: {e}", self.path.display());
        }
    }
}

impl Drop for FileEchoListener {
    fn drop(&mut self) {
        if let Err(e) = self.writer.get_mut().flush() {
            log::warn!("Failed to flush {}: {e}", self.path.display());
        }
    }
}
