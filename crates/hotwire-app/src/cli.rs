use clap::{CommandFactory, FromArgMatches, Parser};
use hotwire_config::{FlagClause, PathOrContent, StartupReload};
use std::time::Duration;

/// hotwire: keep a configuration file hot and print every new version.
#[derive(Parser, Debug)]
#[command(name = "hotwire", version, about)]
pub struct Args {
    /// Quiet period in milliseconds after the last change before reloading.
    #[arg(long, default_value_t = 1000)]
    pub debounce_ms: u64,

    /// Reload once after the quiet period even if the file never changes.
    #[arg(long)]
    pub startup_reload: bool,

    /// Expand $(VAR) references in the content with environment variables.
    #[arg(long)]
    pub expand_env: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn startup(&self) -> StartupReload {
        if self.startup_reload {
            StartupReload::AfterQuietPeriod
        } else {
            StartupReload::Skip
        }
    }
}

fn config_flag() -> FlagClause {
    FlagClause::new("config", "the configuration to watch").required()
}

/// Parse the command line into the options and the watched content source.
pub fn parse() -> (Args, PathOrContent) {
    let clause = config_flag();
    let matches = clause.register(Args::command()).get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let source = clause
        .from_matches(&matches)
        .with_env_substitution(args.expand_env);
    (args, source)
}
