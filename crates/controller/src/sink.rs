//! Diagnostic sinks
//!
//! The controller reports every failed wrap or unwrap to exactly one
//! [`LogSink`]. Any `Fn(&str) + Send + Sync` closure is a sink.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Arc;

/// Receiver for diagnostic messages
pub trait LogSink: Send + Sync {
    /// Handle one message
    fn log(&self, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Writes each message as one line to process standard error (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn log(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if stderr is gone.
        let _ = writeln!(stderr, "{}", message);
    }
}

/// Forwards each message as a `tracing` warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::warn!(target: "patchie", "{}", message);
    }
}

/// Drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl LogSink for SilentSink {
    fn log(&self, _message: &str) {}
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages received so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Remove and return the messages received so far
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Number of messages received so far
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Whether no message has been received
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Built-in sink selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// [`StderrSink`]
    #[default]
    Stderr,
    /// [`TracingSink`]
    Tracing,
    /// [`SilentSink`]
    Silent,
}

impl SinkKind {
    /// Instantiate the sink
    pub fn build(self) -> Arc<dyn LogSink> {
        match self {
            SinkKind::Stderr => Arc::new(StderrSink),
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::Silent => Arc::new(SilentSink),
        }
    }
}
