//! Two-origin content: a `<name>-file` path or an inline `<name>` value.

use hotwire_common::ContentError;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::envsubst::expand_env;
use super::ContentSource;

/// Content taken either from a file or from an inline value, never both.
///
/// Empty strings count as unset, so a flag given as `--config=""` behaves
/// like an absent flag.
#[derive(Debug, Clone, Default)]
pub struct PathOrContent {
    flag_name: String,
    required: bool,
    env_substitution: bool,
    path: Option<PathBuf>,
    content: Option<Vec<u8>>,
}

impl PathOrContent {
    pub fn new(flag_name: impl Into<String>) -> Self {
        Self {
            flag_name: flag_name.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Fail resolution when the resolved content is empty.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Expand `$(VAR)` references after resolution.
    pub fn with_env_substitution(mut self, enabled: bool) -> Self {
        self.env_substitution = enabled;
        self
    }

    pub fn flag_name(&self) -> &str {
        &self.flag_name
    }

    pub fn file_flag_name(&self) -> String {
        format!("{}-file", self.flag_name)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    fn inline(&self) -> Option<&[u8]> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

impl ContentSource for PathOrContent {
    fn content(&self) -> Result<Vec<u8>, ContentError> {
        let path = self.path();
        let inline = self.inline();

        if path.is_some() && inline.is_some() {
            return Err(ContentError::ConflictingSources {
                file_flag: self.file_flag_name(),
                content_flag: self.flag_name.clone(),
            });
        }

        let content = match path {
            Some(path) => {
                debug!(path = %path.display(), flag = %self.file_flag_name(), "reading content file");
                std::fs::read(path).map_err(|source| ContentError::FileRead {
                    path: path.to_path_buf(),
                    file_flag: self.file_flag_name(),
                    source,
                })?
            }
            None => inline.map(<[u8]>::to_vec).unwrap_or_default(),
        };

        if content.is_empty() && self.required {
            return Err(ContentError::MissingRequiredContent {
                file_flag: self.file_flag_name(),
                content_flag: self.flag_name.clone(),
            });
        }

        if self.env_substitution {
            return expand_env(&content);
        }
        Ok(content)
    }

    fn path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}
