//! Live content reload manager.
//!
//! Combines the file watcher with content resolution so callers get a
//! fresh [`ContentSnapshot`] whenever the backing file changes on disk.

mod manager;


pub use manager::{ContentSnapshot, ReloadManager, ReloadOptions};
