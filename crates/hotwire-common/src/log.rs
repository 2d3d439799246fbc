//! Structured logger capability.
//!
//! The watch engine never talks to a logging backend directly. It hands
//! key/value pairs to a [`Logger`], which callers satisfy with
//! [`TracingLogger`], [`NopLogger`], or their own adapter.

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};
use tracing::Level;

/// One structured field. By convention the `"msg"` key carries the message.
pub type KeyValue<'a> = (&'a str, &'a dyn fmt::Display);

/// A logger with a single structured-logging method.
pub trait Logger: Send + Sync {
    fn log(&self, keyvals: &[KeyValue<'_>]);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, keyvals: &[KeyValue<'_>]) {
        (**self).log(keyvals);
    }
}

/// Forwards every entry to `tracing` at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    level: Level,
}

impl TracingLogger {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    pub fn error() -> Self {
        Self::new(Level::ERROR)
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Logger for TracingLogger {
    fn log(&self, keyvals: &[KeyValue<'_>]) {
        let (msg, fields) = split_message(keyvals);
        match self.level {
            Level::ERROR => tracing::error!(fields = %fields, "{msg}"),
            Level::WARN => tracing::warn!(fields = %fields, "{msg}"),
            Level::INFO => tracing::info!(fields = %fields, "{msg}"),
            Level::DEBUG => tracing::debug!(fields = %fields, "{msg}"),
            Level::TRACE => tracing::trace!(fields = %fields, "{msg}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn log(&self, _keyvals: &[KeyValue<'_>]) {}
}

/// Keeps every entry in memory, rendered to strings. Handy in tests.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<Vec<(String, String)>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Vec<(String, String)>> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Values of the `"msg"` key, in logging order.
    pub fn messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| {
                entry
                    .into_iter()
                    .find(|(k, _)| k == "msg")
                    .map(|(_, v)| v)
            })
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, keyvals: &[KeyValue<'_>]) {
        let entry = keyvals
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.to_string()))
            .collect();
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

fn split_message(keyvals: &[KeyValue<'_>]) -> (String, String) {
    let mut msg = String::new();
    let mut fields = String::new();
    for (key, value) in keyvals {
        if *key == "msg" {
            msg = value.to_string();
            continue;
        }
        if !fields.is_empty() {
            fields.push(' ');
        }
        let _ = write!(fields, "{key}={value}");
    }
    (msg, fields)
}
