//! Hot-reloadable configuration content.
//!
//! A piece of configuration comes either from an inline value or from a
//! file ([`PathOrContent`]). When it comes from a file, the reloader
//! watches that file and calls back once per burst of changes, so a
//! long-running process can pick up new content without restarting.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hotwire_config::{PathContentReloader, PathOrContent};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> hotwire_common::Result<()> {
//! let source = PathOrContent::new("config").with_path("/etc/app/config.yaml");
//! let cancel = CancellationToken::new();
//! let _handle = PathContentReloader::new()
//!     .debounce(Duration::from_millis(500))
//!     .start(cancel.clone(), &source, || println!("config changed"))?;
//! # Ok(())
//! # }
//! ```

pub mod debounce;
pub mod flag;
pub mod reload;
pub mod source;
pub mod watcher;

// Re-export core types for convenience
pub use debounce::DebounceScheduler;
pub use flag::FlagClause;
pub use reload::{ContentSnapshot, ReloadManager, ReloadOptions};
pub use source::{expand_env, ContentSource, PathOrContent, StaticPathContent};
pub use watcher::{
    path_content_reloader, PathContentReloader, ReloadHandle, StartupReload, WatchState,
    DEFAULT_DEBOUNCE,
};
