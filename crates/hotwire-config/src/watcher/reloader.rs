//! Debounced reload driven by directory-level file watching.
//!
//! The watch is placed on the target's parent directory rather than the
//! file itself. Most OS watch primitives drop a watch when the watched
//! file is removed or renamed away, which is exactly what editors do on
//! save (write a temp file, rename it over the target). The loop filters
//! directory events down to the target path.

use hotwire_common::{Logger, TracingLogger, WatchError, WatchId};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};

use super::event::WatchEvent;
use crate::debounce::DebounceScheduler;
use crate::source::ContentSource;

/// Debounce used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Whether the reload timer is armed before any file event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartupReload {
    /// Arm only on the first qualifying event.
    #[default]
    Skip,
    /// Arm once at startup, so one reload fires after the quiet period
    /// even if the file is never touched.
    AfterQuietPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Starting,
    Watching,
    Stopped,
}

/// Builder for a watch registration.
pub struct PathContentReloader {
    debounce: Duration,
    startup_reload: StartupReload,
    debug_logger: Arc<dyn Logger>,
    error_logger: Arc<dyn Logger>,
}

impl Default for PathContentReloader {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            startup_reload: StartupReload::default(),
            debug_logger: Arc::new(TracingLogger::debug()),
            error_logger: Arc::new(TracingLogger::error()),
        }
    }
}

impl PathContentReloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quiet period after the last change before the reload runs.
    /// Zero reloads on every change.
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn startup_reload(mut self, startup_reload: StartupReload) -> Self {
        self.startup_reload = startup_reload;
        self
    }

    pub fn debug_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.debug_logger = logger;
        self
    }

    pub fn error_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.error_logger = logger;
        self
    }

    /// Start watching the file behind `source`, calling `reload` once per
    /// burst of changes until `cancel` fires.
    ///
    /// Only setup problems are returned. Once the watch is attached, OS
    /// watch errors go to the error logger and the loop keeps running.
    /// `reload` runs on a timer task, not on the caller's task.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn start<F>(
        self,
        cancel: CancellationToken,
        source: &dyn ContentSource,
        reload: F,
    ) -> Result<ReloadHandle, WatchError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = WatchId::new();
        let (state_tx, state_rx) = watch::channel(WatchState::Starting);
        let state = StoppedOnDrop(state_tx);

        let Some(path) = source.path() else {
            self.debug_logger
                .log(&[("msg", &"no path detected for config reload")]);
            state.0.send_replace(WatchState::Watching);
            let span = tracing::debug_span!("content_watch", id = %id);
            let task = tokio::spawn(
                async move {
                    cancel.cancelled().await;
                    drop(state);
                }
                .instrument(span),
            );
            return Ok(ReloadHandle {
                id,
                target: None,
                state: state_rx,
                task,
            });
        };

        let (target, dir) = resolve_target(path)?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let handler = move |res: notify::Result<notify::Event>| {
            let _ = events_tx.send(res);
        };
        let mut watcher =
            notify::recommended_watcher(handler).map_err(|source| WatchError::Setup {
                path: dir.clone(),
                source,
            })?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Setup {
                path: dir.clone(),
                source,
            })?;

        let scheduler = {
            let debug_logger = Arc::clone(&self.debug_logger);
            DebounceScheduler::new(self.debounce, move || {
                reload();
                debug_logger.log(&[("msg", &"configuration reloaded after debouncing")]);
            })
        };
        if self.startup_reload == StartupReload::AfterQuietPeriod {
            scheduler.reset();
        }

        state.0.send_replace(WatchState::Watching);
        info!(id = %id, path = %target.display(), dir = %dir.display(), "watching content file");

        let span = tracing::debug_span!("content_watch", id = %id);
        let watch_loop = WatchLoop {
            target: target.clone(),
            debug_logger: self.debug_logger,
            error_logger: self.error_logger,
            scheduler,
            _watcher: Some(watcher),
            _state: state,
        };
        let task = tokio::spawn(watch_loop.run(cancel, events_rx).instrument(span));

        Ok(ReloadHandle {
            id,
            target: Some(target),
            state: state_rx,
            task,
        })
    }
}

/// Register `reload` to run whenever the file behind `source` changes.
///
/// Shorthand for [`PathContentReloader`] with explicit loggers and the
/// default startup behaviour.
pub fn path_content_reloader<F>(
    cancel: CancellationToken,
    source: &dyn ContentSource,
    debug_logger: Arc<dyn Logger>,
    error_logger: Arc<dyn Logger>,
    reload: F,
    debounce: Duration,
) -> Result<ReloadHandle, WatchError>
where
    F: Fn() + Send + Sync + 'static,
{
    PathContentReloader::new()
        .debug_logger(debug_logger)
        .error_logger(error_logger)
        .debounce(debounce)
        .start(cancel, source, reload)
}

/// A running registration.
pub struct ReloadHandle {
    id: WatchId,
    target: Option<PathBuf>,
    state: watch::Receiver<WatchState>,
    task: JoinHandle<()>,
}

impl ReloadHandle {
    pub fn id(&self) -> &WatchId {
        &self.id
    }

    /// Absolute path being filtered for, if the source has a file.
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    pub fn state(&self) -> WatchState {
        *self.state.borrow()
    }

    /// Wait for the loop to exit after cancellation.
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}

/// Owns everything the loop must release on exit. Field drop order
/// releases the timer, then the OS watch, then publishes `Stopped`.
struct WatchLoop {
    target: PathBuf,
    debug_logger: Arc<dyn Logger>,
    error_logger: Arc<dyn Logger>,
    scheduler: DebounceScheduler,
    _watcher: Option<RecommendedWatcher>,
    _state: StoppedOnDrop,
}

impl WatchLoop {
    async fn run(
        self,
        cancel: CancellationToken,
        mut events: mpsc::UnboundedReceiver<notify::Result<notify::Event>>,
    ) {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    self.scheduler.stop();
                    break;
                }
                res = events.recv() => match res {
                    Some(Ok(event)) => self.handle(&event),
                    Some(Err(err)) => {
                        self.error_logger.log(&[("msg", &"watcher error"), ("error", &err)]);
                    }
                    None => break,
                },
            }
        }
        debug!(path = %self.target.display(), "content watch stopped");
    }

    fn handle(&self, event: &notify::Event) {
        for change in WatchEvent::from_notify(event) {
            if !change.is_qualifying(&self.target) {
                continue;
            }
            self.debug_logger.log(&[
                ("msg", &format!("change detected for {}", self.target.display())),
                ("eventName", &change.name.display()),
                ("eventOp", &change.ops),
            ]);
            self.scheduler.reset();
        }
    }
}

/// Run the loop over an event stream supplied by the caller instead of
/// an OS watch.
#[cfg(test)]
pub(super) fn spawn_watch_loop(
    target: PathBuf,
    debug_logger: Arc<dyn Logger>,
    error_logger: Arc<dyn Logger>,
    scheduler: DebounceScheduler,
    cancel: CancellationToken,
    events: mpsc::UnboundedReceiver<notify::Result<notify::Event>>,
) -> JoinHandle<()> {
    let (state_tx, _) = watch::channel(WatchState::Watching);
    let watch_loop = WatchLoop {
        target,
        debug_logger,
        error_logger,
        scheduler,
        _watcher: None,
        _state: StoppedOnDrop(state_tx),
    };
    tokio::spawn(watch_loop.run(cancel, events))
}

struct StoppedOnDrop(watch::Sender<WatchState>);

impl Drop for StoppedOnDrop {
    fn drop(&mut self) {
        self.0.send_replace(WatchState::Stopped);
    }
}

/// Absolute target path and the canonical directory to watch.
///
/// The directory is canonicalized so the target matches the paths the
/// backend reports, including on platforms that resolve symlinks.
pub(crate) fn resolve_target(path: &Path) -> Result<(PathBuf, PathBuf), WatchError> {
    let absolute = std::path::absolute(path).map_err(|source| WatchError::Path {
        path: path.to_path_buf(),
        source,
    })?;
    let (Some(file_name), Some(parent)) = (absolute.file_name(), absolute.parent()) else {
        return Err(WatchError::Path {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };
    let dir = parent.canonicalize().map_err(|e| WatchError::Setup {
        path: parent.to_path_buf(),
        source: notify::Error::io(e).add_path(parent.to_path_buf()),
    })?;
    Ok((dir.join(file_name), dir))
}
