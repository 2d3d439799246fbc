//! File-backed content double for watcher tests.

use hotwire_common::ContentError;
use std::path::{Path, PathBuf};

use super::ContentSource;

/// Serves the contents a file had when it was loaded.
///
/// [`rewrite`](Self::rewrite) swaps the cached bytes and writes them to
/// the backing file, which is what an active watcher picks up.
#[derive(Debug, Clone)]
pub struct StaticPathContent {
    content: Vec<u8>,
    path: PathBuf,
}

impl StaticPathContent {
    /// Load `from_path`, which is stored as an absolute path.
    pub fn new(from_path: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let given = from_path.into();
        let read_err = |path: &Path, source: std::io::Error| ContentError::FileRead {
            path: path.to_path_buf(),
            file_flag: "static content".into(),
            source,
        };
        let path = std::path::absolute(&given).map_err(|e| read_err(&given, e))?;
        let content = std::fs::read(&path).map_err(|e| read_err(&path, e))?;
        Ok(Self { content, path })
    }

    /// Cached bytes, no disk read.
    pub fn cached(&self) -> &[u8] {
        &self.content
    }

    pub fn rewrite(&mut self, new_content: impl Into<Vec<u8>>) -> Result<(), ContentError> {
        self.content = new_content.into();
        std::fs::write(&self.path, &self.content).map_err(|source| ContentError::FileWrite {
            path: self.path.clone(),
            source,
        })
    }
}

impl ContentSource for StaticPathContent {
    fn content(&self) -> Result<Vec<u8>, ContentError> {
        Ok(self.content.clone())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
