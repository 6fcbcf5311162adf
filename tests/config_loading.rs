// tests/config_loading.rs

use std::ffi::OsStr;
use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use watchrun::cli::CliArgs;
use watchrun::config::load_settings;
use watchrun::errors::WatchrunError;
use watchrun::supervisor::StopMode;

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["watchrun"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).unwrap()
}

#[test]
fn settings_come_from_file_when_flags_are_absent() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[watch]
dir = "{}"
recursive = false
exclude = ["target", "node_modules"]

[command]
cmd = "cargo run"
wait = true
init = false
"#,
        dir.path().display()
    )
    .unwrap();

    let settings = load_settings(&args(&["--config", file.path().to_str().unwrap()])).unwrap();

    assert_eq!(settings.watch.root, dir.path());
    assert!(!settings.watch.recursive);
    assert!(settings.watch.excludes.contains(OsStr::new("node_modules")));
    assert!(!settings.watch.excludes.contains(OsStr::new(".git")));
    assert_eq!(settings.supervisor.command, "cargo run");
    assert_eq!(settings.supervisor.stop_mode, StopMode::WaitForExit);
    assert!(!settings.run_immediately);
}

#[test]
fn explicit_flags_beat_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[command]
cmd = "from file"
wait = true
"#
    )
    .unwrap();

    let settings = load_settings(&args(&[
        "--config",
        file.path().to_str().unwrap(),
        "--watch",
        dir.path().to_str().unwrap(),
        "--cmd",
        "from flag",
        "--wait=false",
    ]))
    .unwrap();

    assert_eq!(settings.supervisor.command, "from flag");
    assert_eq!(settings.supervisor.stop_mode, StopMode::Graceful);
}

#[test]
fn missing_command_returns_structured_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_settings(&args(&["--watch", dir.path().to_str().unwrap()]));
    assert!(matches!(result, Err(WatchrunError::MissingCommand)));

    let result = load_settings(&args(&["--watch", dir.path().to_str().unwrap(), "--cmd", "  "]));
    assert!(matches!(result, Err(WatchrunError::MissingCommand)));
}

#[test]
fn watch_path_must_be_an_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let result = load_settings(&args(&["--watch", missing.to_str().unwrap(), "--cmd", "true"]));
    match result {
        Err(WatchrunError::InvalidWatchDir { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected InvalidWatchDir, got {other:?}"),
    }

    let file = NamedTempFile::new().unwrap();
    let result = load_settings(&args(&[
        "--watch",
        file.path().to_str().unwrap(),
        "--cmd",
        "true",
    ]));
    match result {
        Err(WatchrunError::InvalidWatchDir { reason, .. }) => assert_eq!(reason, "not a directory"),
        other => panic!("expected InvalidWatchDir, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_a_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[command]\nwait = \"yes please\"\n").unwrap();

    let result = load_settings(&args(&["--config", file.path().to_str().unwrap(), "--cmd", "x"]));
    assert!(matches!(result, Err(WatchrunError::Toml(_))));
}

#[test]
fn unreadable_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Watchrun.toml");
    let result = load_settings(&args(&["--config", missing.to_str().unwrap(), "--cmd", "x"]));
    assert!(matches!(result, Err(WatchrunError::Config(_))));
}
