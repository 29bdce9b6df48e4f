use clap::Parser;
use nzb_move::cli::Args;
use nzb_move::config::types::{Config, LogLevel};
use nzb_move::{FileAction, PasswordExtractionMode};
use std::path::PathBuf;

#[test]
fn positional_source_is_optional() {
    let args = Args::parse_from(["nzb_move"]);
    assert_eq!(args.resolved_source(), None);

    let args = Args::parse_from(["nzb_move", "/tmp/Release{{pw}}.nzb"]);
    assert_eq!(
        args.resolved_source(),
        Some(PathBuf::from("/tmp/Release{{pw}}.nzb"))
    );
}

#[test]
fn single_quoted_source_is_unwrapped() {
    let args = Args::parse_from(["nzb_move", "'C:\\Downloads\\a.nzb'"]);
    assert_eq!(
        args.resolved_source(),
        Some(PathBuf::from("C:\\Downloads\\a.nzb"))
    );
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["nzb_move", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));

    let args = Args::parse_from(["nzb_move", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["nzb_move"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_values() {
    let args = Args::parse_from([
        "nzb_move",
        "--target",
        "/watch",
        "--action",
        "COPY",
        "--allow-duplicates",
        "false",
        "--password-method",
        "OnlyName",
        "--max-length",
        "40",
        "--no-prompt",
        "--no-wait",
        "-d",
    ]);
    let mut cfg = Config::default();
    cfg.ask_for_password = true;
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.target, PathBuf::from("/watch"));
    assert_eq!(cfg.action, FileAction::Copy);
    assert!(!cfg.allow_duplicates);
    assert_eq!(
        cfg.password_extraction_method,
        PasswordExtractionMode::OnlyFilenamePattern
    );
    assert_eq!(cfg.file_name_max_length, Some(40));
    assert!(!cfg.ask_for_password);
    assert_eq!(cfg.close_success, 0);
    assert!(cfg.debug);
    assert_eq!(cfg.log_level, LogLevel::Debug);
}

#[test]
fn unset_flags_leave_config_alone() {
    let mut cfg = Config::new("/from/xml");
    cfg.file_name_max_length = Some(10);
    let before = cfg.clone();
    Args::parse_from(["nzb_move", "x.nzb"]).apply_overrides(&mut cfg);
    assert_eq!(cfg, before);
}

#[test]
fn zero_max_length_disables_limit() {
    let mut cfg = Config::default();
    cfg.file_name_max_length = Some(10);
    Args::parse_from(["nzb_move", "--max-length", "0"]).apply_overrides(&mut cfg);
    assert_eq!(cfg.file_name_max_length, None);
}

#[test]
fn invalid_action_is_rejected_by_clap() {
    assert!(Args::try_parse_from(["nzb_move", "--action", "teleport"]).is_err());
}
