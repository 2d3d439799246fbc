//! Tests for flag registration and parsing.

use super::*;
use crate::source::ContentSource;
use clap::Command;
use hotwire_common::ContentError;

fn command(clause: &FlagClause) -> Command {
    clause.register(Command::new("hotwire").no_binary_name(true))
}

#[test]
fn registers_both_flags() {
    let clause = FlagClause::new("config", "the reloadable configuration");
    let cmd = command(&clause);

    let path = cmd.get_arguments().find(|a| a.get_id() == "config-file").unwrap();
    assert_eq!(path.get_long(), Some("config-file"));
    let content = cmd.get_arguments().find(|a| a.get_id() == "config").unwrap();
    assert_eq!(content.get_long(), Some("config"));
}

#[test]
fn path_flag_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.yaml");
    std::fs::write(&path, "from file").unwrap();

    let clause = FlagClause::new("config", "config");
    let matches = command(&clause)
        .try_get_matches_from(["--config-file", path.to_str().unwrap()])
        .unwrap();
    let source = clause.from_matches(&matches);

    assert_eq!(source.path(), Some(path.as_path()));
    assert_eq!(source.content().unwrap(), b"from file");
}

#[test]
fn content_flag_is_parsed() {
    let clause = FlagClause::new("config", "config");
    let matches = command(&clause)
        .try_get_matches_from(["--config", "inline: true"])
        .unwrap();
    let source = clause.from_matches(&matches);

    assert!(source.path().is_none());
    assert_eq!(source.content().unwrap(), b"inline: true");
}

#[test]
fn both_flags_conflict_at_resolution() {
    let clause = FlagClause::new("config", "config");
    let matches = command(&clause)
        .try_get_matches_from(["--config-file", "/tmp/whatever.yaml", "--config", "inline"])
        .unwrap();
    let source = clause.from_matches(&matches);

    assert!(matches!(
        source.content(),
        Err(ContentError::ConflictingSources { .. })
    ));
}

#[test]
fn required_is_enforced_at_resolution() {
    let clause = FlagClause::new("config", "config").required();
    // The parser accepts the empty command line.
    let matches = command(&clause).try_get_matches_from(Vec::<String>::new()).unwrap();
    let source = clause.from_matches(&matches);

    assert!(source.is_required());
    assert!(matches!(
        source.content(),
        Err(ContentError::MissingRequiredContent { .. })
    ));
}

#[test]
fn default_content_applies_when_absent() {
    let clause = FlagClause::new("config", "config").default_content("fallback");
    let matches = command(&clause).try_get_matches_from(Vec::<String>::new()).unwrap();
    let source = clause.from_matches(&matches);

    assert_eq!(source.content().unwrap(), b"fallback");
}

#[test]
fn default_path_applies_when_absent() {
    let clause = FlagClause::new("config", "config").default_path("/etc/hotwire/config.yaml");
    let matches = command(&clause).try_get_matches_from(Vec::<String>::new()).unwrap();
    let source = clause.from_matches(&matches);

    assert_eq!(
        source.path(),
        Some(std::path::Path::new("/etc/hotwire/config.yaml"))
    );
}

#[test]
fn hidden_flags_are_hidden_but_accepted() {
    let clause = FlagClause::new("config", "the reloadable configuration")
        .hidden_path()
        .hidden_content();
    let mut cmd = command(&clause);
    let help = cmd.render_help().to_string();
    assert!(!help.contains("--config-file"));
    assert!(!help.contains("--config "));

    let matches = command(&clause)
        .try_get_matches_from(["--config", "still works"])
        .unwrap();
    assert_eq!(clause.from_matches(&matches).content().unwrap(), b"still works");
}

#[test]
fn help_describes_both_flags() {
    let clause = FlagClause::new("config", "the reloadable configuration");
    let mut cmd = command(&clause);
    let help = cmd.render_help().to_string();

    assert!(help.contains("Path to the reloadable configuration"));
    assert!(help.contains("Alternative to 'config-file' flag (lower priority)"));
    assert!(help.contains("<file-path>"));
}

#[test]
fn env_substitution_is_carried_over() {
    std::env::set_var("HOTWIRE_FLAG_TEST_TOKEN", "abc123");
    let clause = FlagClause::new("config", "config").env_substitution();
    let matches = command(&clause)
        .try_get_matches_from(["--config", "token: $(HOTWIRE_FLAG_TEST_TOKEN)"])
        .unwrap();

    assert_eq!(
        clause.from_matches(&matches).content().unwrap(),
        b"token: abc123"
    );
}

#[test]
fn unregistered_flags_read_as_unset() {
    let clause = FlagClause::new("config", "config");
    let matches = Command::new("bare")
        .no_binary_name(true)
        .try_get_matches_from(Vec::<String>::new())
        .unwrap();
    let source = clause.from_matches(&matches);

    assert!(source.path().is_none());
    assert!(source.content().unwrap().is_empty());
}
