use std::path::Path;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use wfcheck_cli::cli::{Cli, log_config_from_cli};
use wfcheck_cli::logging::LogFormat;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("wfcheck").chain(args.iter().copied())).expect("parse")
}

#[test]
fn defaults_leave_rust_log_in_charge() {
    let config = log_config_from_cli(&parse(&["rules"]));

    assert_eq!(config.level_filter, LevelFilter::INFO);
    assert!(config.use_env_filter);
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(config.log_file.is_none());
}

#[test]
fn explicit_level_format_and_file_are_applied() {
    let cli = parse(&[
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-file",
        "wfcheck.log",
        "--color",
        "never",
        "rules",
    ]);
    let config = log_config_from_cli(&cli);

    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert!(!config.use_env_filter);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.log_file.as_deref(), Some(Path::new("wfcheck.log")));
    assert!(!config.with_ansi);
}

#[test]
fn quiet_flag_lowers_level_and_disables_rust_log() {
    let config = log_config_from_cli(&parse(&["-q", "rules"]));

    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert!(!config.use_env_filter);
}

#[test]
fn log_level_beats_verbosity_flags() {
    let config = log_config_from_cli(&parse(&["-vv", "--log-level", "error", "rules"]));

    assert_eq!(config.level_filter, LevelFilter::ERROR);
}
