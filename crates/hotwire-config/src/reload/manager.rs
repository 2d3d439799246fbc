//! Core reload manager implementation.
//!
//! Contains the [`ReloadManager`] that resolves a content source once,
//! then re-resolves it on every debounced file change and publishes the
//! result as a [`ContentSnapshot`].

use chrono::{DateTime, Utc};
use hotwire_common::{HotwireError, TracingLogger};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::source::ContentSource;
use crate::watcher::{PathContentReloader, ReloadHandle, StartupReload, DEFAULT_DEBOUNCE};

/// One resolved version of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSnapshot {
    pub content: Arc<Vec<u8>>,
    /// 0 for the initial load, +1 per successful reload.
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
}

impl ContentSnapshot {
    fn new(content: Vec<u8>, generation: u64) -> Self {
        Self {
            content: Arc::new(content),
            generation,
            loaded_at: Utc::now(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReloadOptions {
    pub debounce: Duration,
    pub startup_reload: StartupReload,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            startup_reload: StartupReload::Skip,
        }
    }
}

/// Keeps the latest content of a source published on a watch channel.
pub struct ReloadManager;

impl ReloadManager {
    /// Resolve the initial content and start watching for changes.
    ///
    /// Returns the initial snapshot, a receiver that sees every later
    /// snapshot, and the handle of the underlying watch. A failed
    /// re-resolution is logged and the previous snapshot stays current.
    ///
    /// The initial load runs on the caller's thread. Reloads read the
    /// source on the blocking pool, one at a time.
    pub fn start<S>(
        source: Arc<S>,
        options: ReloadOptions,
        cancel: CancellationToken,
    ) -> Result<(ContentSnapshot, watch::Receiver<ContentSnapshot>, ReloadHandle), HotwireError>
    where
        S: ContentSource + ?Sized + 'static,
    {
        let initial = ContentSnapshot::new(source.content()?, 0);
        let (tx, rx) = watch::channel(initial.clone());

        let publisher = Arc::new(SnapshotPublisher {
            source: Arc::clone(&source),
            tx,
            serial: Mutex::new(()),
        });
        let handle = PathContentReloader::new()
            .debounce(options.debounce)
            .startup_reload(options.startup_reload)
            .debug_logger(Arc::new(TracingLogger::debug()))
            .error_logger(Arc::new(TracingLogger::error()))
            .start(cancel, &source, move || {
                let publisher = Arc::clone(&publisher);
                tokio::task::spawn_blocking(move || publisher.reload());
            })?;

        Ok((initial, rx, handle))
    }
}

struct SnapshotPublisher<S: ?Sized> {
    source: Arc<S>,
    tx: watch::Sender<ContentSnapshot>,
    serial: Mutex<()>,
}

impl<S: ContentSource + ?Sized> SnapshotPublisher<S> {
    fn reload(&self) {
        let _serial = self.serial.lock().unwrap_or_else(PoisonError::into_inner);
        match self.source.content() {
            Ok(content) => {
                let generation = self.tx.borrow().generation + 1;
                info!(generation, bytes = content.len(), "content reloaded");
                self.tx.send_replace(ContentSnapshot::new(content, generation));
            }
            Err(e) => {
                warn!("content reload failed, keeping previous version: {e}");
            }
        }
    }
}
