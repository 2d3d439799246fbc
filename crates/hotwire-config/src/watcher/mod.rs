//! File watcher for live content reload.
//!
//! Watches the parent directory of a content file with `notify`, keeps
//! only create/write events for the file itself, and coalesces bursts
//! through a [`DebounceScheduler`](crate::debounce::DebounceScheduler).

mod event;
mod reloader;


pub use event::{Ops, WatchEvent};
pub use reloader::{
    path_content_reloader, PathContentReloader, ReloadHandle, StartupReload, WatchState,
    DEFAULT_DEBOUNCE,
};
