/*!
 * Advisory status channel.
 *
 * Every significant action in the translation pipeline (provider switch,
 * instance failover, chunk progress, parse failure) emits a human-readable
 * line to a status sink. The host application displays these lines; they
 * are never used for control flow.
 */

use std::sync::Arc;

use log::info;
use parking_lot::Mutex;

/// Append-only sink for human-readable status lines
pub trait StatusSink: Send + Sync + std::fmt::Debug {
    /// Record one status line
    fn emit(&self, line: &str);
}

/// Shared handle to a status sink
pub type StatusHandle = Arc<dyn StatusSink>;

/// Default sink that forwards status lines to the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn emit(&self, line: &str) {
        info!("{}", line);
    }
}

/// Sink that captures status lines in memory, for tests and embedding hosts
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty capture sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// True if any captured line contains the given fragment
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines.lock().iter().any(|l| l.contains(fragment))
    }
}

impl StatusSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Convenience constructor for the default log-backed handle
pub fn log_status() -> StatusHandle {
    Arc::new(LogSink)
}
