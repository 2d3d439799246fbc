//! Content resolution from an inline value or a file.
//!
//! [`PathOrContent`] is what flag parsing produces; [`StaticPathContent`]
//! is a fixed, file-backed double used to drive watcher tests.

mod envsubst;
mod path_or_content;
mod static_content;


pub use envsubst::expand_env;
pub use path_or_content::PathOrContent;
pub use static_content::StaticPathContent;

use hotwire_common::ContentError;
use std::path::Path;

/// Resolves a logical configuration value to bytes.
///
/// `path` reports the backing file, if any. The reloader watches that
/// file; sources without one can still be registered but never fire.
pub trait ContentSource: Send + Sync {
    fn content(&self) -> Result<Vec<u8>, ContentError>;

    fn path(&self) -> Option<&Path>;
}

impl<S: ContentSource + ?Sized> ContentSource for std::sync::Arc<S> {
    fn content(&self) -> Result<Vec<u8>, ContentError> {
        (**self).content()
    }

    fn path(&self) -> Option<&Path> {
        (**self).path()
    }
}
