//! The scheduler task and its handle.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::trace;

enum Command {
    Reset(Instant),
    Stop,
}

#[derive(Default)]
struct Shared {
    armed: AtomicBool,
    stopped: AtomicBool,
    fires: AtomicU64,
}

/// Handle to a debounce timer running on its own Tokio task.
///
/// The fire callback runs on that task, never on the caller's, and never
/// concurrently with itself. Dropping the handle stops the timer.
pub struct DebounceScheduler {
    quiet: Duration,
    tx: mpsc::UnboundedSender<Command>,
    shared: Arc<Shared>,
}

impl DebounceScheduler {
    /// Spawn the timer task. A zero `quiet` period disables coalescing:
    /// every reset fires right away.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn new<F>(quiet: Duration, fire: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared::default());
        tokio::spawn(run(quiet, rx, Arc::clone(&shared), fire));
        Self { quiet, tx, shared }
    }

    /// Arm the timer, or move an armed deadline to `now + quiet`.
    pub fn reset(&self) {
        if self.shared.stopped.load(Ordering::SeqCst) {
            return;
        }
        if !self.quiet.is_zero() {
            self.shared.armed.store(true, Ordering::SeqCst);
        }
        let _ = self.tx.send(Command::Reset(Instant::now()));
    }

    /// Disarm for good. A fire already in progress is allowed to finish.
    pub fn stop(&self) {
        if self.shared.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shared.armed.store(false, Ordering::SeqCst);
        let _ = self.tx.send(Command::Stop);
    }

    pub fn is_armed(&self) -> bool {
        self.shared.armed.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }

    /// Number of times the fire callback has completed.
    pub fn fire_count(&self) -> u64 {
        self.shared.fires.load(Ordering::SeqCst)
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run<F>(
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<Command>,
    shared: Arc<Shared>,
    fire: F,
) where
    F: Fn(),
{
    let mut deadline: Option<Instant> = None;

    loop {
        let command = match deadline {
            Some(at) => {
                // A command queued at the deadline wins, so a reset that
                // lands on the deadline still gets a full quiet period.
                tokio::select! {
                    biased;

                    command = rx.recv() => command,
                    () = tokio::time::sleep_until(at) => {
                        deadline = None;
                        shared.armed.store(false, Ordering::SeqCst);
                        if shared.stopped.load(Ordering::SeqCst) {
                            break;
                        }
                        trace!("debounce deadline reached");
                        fire_once(&shared, &fire);
                        continue;
                    }
                }
            }
            None => rx.recv().await,
        };

        match command {
            Some(Command::Reset(_)) if quiet.is_zero() => {
                if shared.stopped.load(Ordering::SeqCst) {
                    break;
                }
                fire_once(&shared, &fire);
            }
            Some(Command::Reset(at)) => {
                deadline = Some(at + quiet);
                shared.armed.store(true, Ordering::SeqCst);
            }
            Some(Command::Stop) | None => break,
        }
    }

    shared.armed.store(false, Ordering::SeqCst);
}

fn fire_once<F: Fn()>(shared: &Shared, fire: &F) {
    fire();
    shared.fires.fetch_add(1, Ordering::SeqCst);
}
