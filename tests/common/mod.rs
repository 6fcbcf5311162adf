// tests/common/mod.rs

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub use watchrun_test_utils::{RecordingReporter, init_tracing, wait_for_file, with_timeout};

/// Lay out a small project:
///
/// ```text
/// proj/
///   main.go
///   .git/HEAD
///   .git/refs/heads/main
///   src/app.go
///   src/internal/.git/config
///   src/internal/util.go
///   docs/
/// ```
pub fn project_tree(base: &Path) -> PathBuf {
    let proj = base.join("proj");
    for dir in [".git/refs/heads", "src/internal/.git", "docs"] {
        fs::create_dir_all(proj.join(dir)).unwrap();
    }
    for (file, body) in [
        ("main.go", "package main\n"),
        (".git/HEAD", "ref: refs/heads/main\n"),
        (".git/refs/heads/main", "0000\n"),
        ("src/app.go", "package src\n"),
        ("src/internal/.git/config", "[core]\n"),
        ("src/internal/util.go", "package internal\n"),
    ] {
        fs::write(proj.join(file), body).unwrap();
    }
    proj
}

/// Paths relative to `root`, sorted, with `/` separators. The root itself is `.`.
pub fn relative(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    let mut rels: Vec<String> = paths
        .iter()
        .map(|p| {
            let rel = p.strip_prefix(root).unwrap();
            if rel.as_os_str().is_empty() {
                ".".to_string()
            } else {
                rel.to_string_lossy().replace('\\', "/")
            }
        })
        .collect();
    rels.sort();
    rels
}

/// Is `pid` a live (non-zombie) process? Zombies count as dead, since an
/// orphan is only reaped if PID 1 bothers to.
pub fn process_running(pid: u32) -> bool {
    let Ok(stat) = fs::read_to_string(format!("/proc/{pid}/stat")) else {
        return false;
    };
    // The state letter follows the parenthesised command name.
    match stat.rfind(')').and_then(|i| stat[i + 1..].trim_start().chars().next()) {
        Some('Z') | Some('X') | None => false,
        Some(_) => true,
    }
}

/// Poll `process_running` until it turns false, for up to 5 seconds.
pub async fn wait_until_dead(pid: u32) -> bool {
    for _ in 0..100 {
        if !process_running(pid) {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    false
}
