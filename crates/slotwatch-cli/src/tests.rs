use clap::Parser;

use super::{Cli, Commands};

#[test]
fn parses_run_with_flags() {
    let cli = Cli::try_parse_from(["slotwatch", "run", "--headed", "--no-notify"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Run {
            headed: true,
            no_notify: true
        }
    ));
}

#[test]
fn run_defaults_to_headless_with_notification() {
    let cli = Cli::try_parse_from(["slotwatch", "run"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Run {
            headed: false,
            no_notify: false
        }
    ));
}

#[test]
fn parses_watch() {
    let cli = Cli::try_parse_from(["slotwatch", "watch"]).unwrap();
    assert!(matches!(cli.command, Commands::Watch { headed: false }));
}

#[test]
fn parses_test_notify() {
    let cli = Cli::try_parse_from(["slotwatch", "test-notify"]).unwrap();
    assert!(matches!(cli.command, Commands::TestNotify));
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["slotwatch", "book"]).is_err());
}

#[test]
fn requires_a_subcommand() {
    assert!(Cli::try_parse_from(["slotwatch"]).is_err());
}
