//! Tests for the debounce scheduler, on a paused clock.

use super::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const QUIET: Duration = Duration::from_millis(100);

fn counting(quiet: Duration) -> (DebounceScheduler, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let scheduler = DebounceScheduler::new(quiet, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (scheduler, count)
}

#[tokio::test(start_paused = true)]
async fn new_scheduler_is_idle_and_never_fires() {
    let (scheduler, count) = counting(QUIET);
    assert!(!scheduler.is_armed());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(scheduler.quiet_period(), QUIET);
}

#[tokio::test(start_paused = true)]
async fn single_reset_fires_once_after_quiet_period() {
    let (scheduler, count) = counting(QUIET);
    scheduler.reset();
    assert!(scheduler.is_armed());

    sleep(Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!scheduler.is_armed());
    assert_eq!(scheduler.fire_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn burst_of_resets_fires_once() {
    let (scheduler, count) = counting(QUIET);
    for _ in 0..5 {
        scheduler.reset();
        sleep(Duration::from_millis(20)).await;
    }
    // Last reset at t=80ms, so the deadline is t=180ms.
    assert_eq!(count.load(Ordering::SeqCst), 0);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn reset_extends_the_deadline() {
    let (scheduler, count) = counting(QUIET);
    scheduler.reset();
    sleep(Duration::from_millis(90)).await;
    scheduler.reset();
    sleep(Duration::from_millis(90)).await;
    // 180ms since the first reset, but only 90ms since the last one.
    assert_eq!(count.load(Ordering::SeqCst), 0);

    sleep(Duration::from_millis(20)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn resets_spaced_beyond_quiet_fire_each_time() {
    let (scheduler, count) = counting(QUIET);
    scheduler.reset();
    sleep(Duration::from_millis(300)).await;
    scheduler.reset();
    sleep(Duration::from_millis(300)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn zero_quiet_fires_on_every_reset() {
    let (scheduler, count) = counting(Duration::ZERO);
    scheduler.reset();
    scheduler.reset();
    scheduler.reset();
    assert!(!scheduler.is_armed());

    sleep(Duration::from_millis(1)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_pending_fire() {
    let (scheduler, count) = counting(QUIET);
    scheduler.reset();
    scheduler.stop();
    assert!(scheduler.is_stopped());
    assert!(!scheduler.is_armed());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn reset_after_stop_is_ignored() {
    let (scheduler, count) = counting(QUIET);
    scheduler.stop();
    scheduler.reset();
    assert!(!scheduler.is_armed());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_pending_fire() {
    let (scheduler, count) = counting(QUIET);
    scheduler.reset();
    drop(scheduler);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn fire_never_runs_inside_reset() {
    let (scheduler, count) = counting(Duration::ZERO);
    scheduler.reset();
    // The callback belongs to the scheduler task, which has not run yet.
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::task::yield_now().await;
    sleep(Duration::from_millis(1)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn reset_on_the_deadline_pushes_the_fire_back() {
    for _ in 0..200 {
        let late_reset = Arc::new(AtomicBool::new(false));
        let early_fires = Arc::new(AtomicUsize::new(0));
        let scheduler = {
            let late_reset = Arc::clone(&late_reset);
            let early_fires = Arc::clone(&early_fires);
            DebounceScheduler::new(QUIET, move || {
                if late_reset.load(Ordering::SeqCst) {
                    early_fires.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        scheduler.reset();
        sleep(QUIET).await;
        late_reset.store(true, Ordering::SeqCst);
        scheduler.reset();
        sleep(Duration::from_millis(1)).await;

        // The second reset was 1ms ago, so nothing may fire yet.
        assert_eq!(early_fires.load(Ordering::SeqCst), 0);
        assert!(scheduler.is_armed());
    }
}
