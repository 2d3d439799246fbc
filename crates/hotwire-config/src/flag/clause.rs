//! Builder for the `<name>-file` / `<name>` flag pair.

use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;

use crate::source::PathOrContent;

/// Describes one logical content flag exposed as two command-line flags:
/// `--<name>-file` (path) and `--<name>` (inline content, lower priority).
#[derive(Debug, Clone, Default)]
pub struct FlagClause {
    name: String,
    help: String,
    required: bool,
    env_substitution: bool,
    hidden_path: bool,
    hidden_content: bool,
    default_path: Option<String>,
    default_content: Option<String>,
}

impl FlagClause {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            ..Self::default()
        }
    }

    /// Content must resolve to something non-empty. Checked when the
    /// content is resolved, not by the argument parser.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn env_substitution(mut self) -> Self {
        self.env_substitution = true;
        self
    }

    /// Hide `--<name>-file` from help; it is still accepted.
    pub fn hidden_path(mut self) -> Self {
        self.hidden_path = true;
        self
    }

    /// Hide `--<name>` from help; it is still accepted.
    pub fn hidden_content(mut self) -> Self {
        self.hidden_content = true;
        self
    }

    pub fn default_path(mut self, value: impl Into<String>) -> Self {
        self.default_path = Some(value.into());
        self
    }

    pub fn default_content(mut self, value: impl Into<String>) -> Self {
        self.default_content = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path_flag_name(&self) -> String {
        format!("{}-file", self.name)
    }

    /// Add both flags to `cmd`.
    pub fn register(&self, cmd: Command) -> Command {
        let path_flag = self.path_flag_name();

        let mut path_arg = Arg::new(path_flag.clone())
            .long(path_flag.clone())
            .help(format!("Path to {}", self.help))
            .value_name("file-path")
            .value_parser(value_parser!(PathBuf))
            .hide(self.hidden_path);
        if let Some(default) = &self.default_path {
            path_arg = path_arg.default_value(default.clone());
        }

        let mut content_arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(format!(
                "Alternative to '{path_flag}' flag (lower priority). Content of {}",
                self.help
            ))
            .value_name("content")
            .hide(self.hidden_content);
        if let Some(default) = &self.default_content {
            content_arg = content_arg.default_value(default.clone());
        }

        cmd.arg(path_arg).arg(content_arg)
    }

    /// Build the content source from parsed arguments.
    ///
    /// Flags that were never registered on the matched command read as
    /// unset.
    pub fn from_matches(&self, matches: &ArgMatches) -> PathOrContent {
        let mut source = PathOrContent::new(self.name.clone())
            .with_required(self.required)
            .with_env_substitution(self.env_substitution);

        if let Ok(Some(path)) = matches.try_get_one::<PathBuf>(&self.path_flag_name()) {
            source = source.with_path(path.clone());
        }
        if let Ok(Some(content)) = matches.try_get_one::<String>(&self.name) {
            source = source.with_content(content.clone());
        }
        source
    }
}
