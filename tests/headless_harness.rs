#![allow(unused)]
//! Headless mode process-level integration harness.
//!
//! # What this covers
//!
//! This harness exercises `pokesrc` as a compiled binary via
//! [`std::process::Command`]. It validates the `search` and `today`
//! subcommands from the outside, as a shell script piping the output would
//! see them.
//!
//! - **Output formats**: plain tab-separated lines and pretty JSON.
//! - **Exit codes**: no results = 0; unconfigured `today` = non-zero; bad
//!   flags = non-zero.
//! - **Config layering**: `--config` selects the dictionary and the daily
//!   source.
//!
//! Every child gets its own `XDG_CONFIG_HOME` so the user's config is never
//! read or written.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (that requires a real terminal)
//! - `serve` (see `server_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pokesrc(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pokesrc"));
    cmd.env("XDG_CONFIG_HOME", home.path().join("xdg"))
        .env_remove("RUST_LOG");
    cmd
}

fn run(home: &TempDir, args: &[&str]) -> Output {
    pokesrc(home).args(args).output().expect("failed to spawn pokesrc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn with_config(home: &TempDir, toml: &str) -> String {
    write_fixture(home, "config.toml", toml).display().to_string()
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_prints_tab_separated_hits() {
    let home = tempfile::tempdir().unwrap();
    let out = run(&home, &["search", "ㅍㅋㅊ"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "피카츄\tpikachu\n");
}

#[test]
fn search_with_no_hits_exits_zero_silently() {
    let home = tempfile::tempdir().unwrap();
    let out = run(&home, &["search", "xyz"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "");
}

#[test]
fn search_limit_truncates() {
    let home = tempfile::tempdir().unwrap();
    let out = run(&home, &["search", "ㅇㅅㅎ", "--limit", "1"]);
    assert_eq!(stdout(&out), "이상해씨\tbulbasaur\n");
}

#[test]
fn search_json_output() {
    let home = tempfile::tempdir().unwrap();
    let out = run(&home, &["search", "--format", "json", "ㅍㅋㅊ"]);
    assert!(out.status.success());
    insta::assert_snapshot!(stdout(&out).trim_end(), @r###"
    [
      {
        "koreanName": "피카츄",
        "name": "pikachu",
        "match": "choseong"
      }
    ]
    "###);
}

#[test]
fn search_uses_configured_dictionary() {
    let home = tempfile::tempdir().unwrap();
    let dex = write_fixture(&home, "names.json", SMALL_DEX_JSON);
    let config = with_config(&home, &format!("[dex]\npath = {:?}\n", dex.display().to_string()));

    let out = run(&home, &["--config", &config, "search", "ㅁ"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "마임맨\tmr-mime\n뮤츠\tmewtwo\n뮤\tmew\n");
}

#[test]
fn unknown_format_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let out = run(&home, &["search", "--format", "csv", "pika"]);
    assert!(!out.status.success());
}

// ---------------------------------------------------------------------------
// today
// ---------------------------------------------------------------------------

#[test]
fn today_without_source_fails() {
    let home = tempfile::tempdir().unwrap();
    let out = run(&home, &["today"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no daily source configured"), "{}", stderr(&out));
}

#[test]
fn today_reads_file_source() {
    let home = tempfile::tempdir().unwrap();
    let daily = write_fixture(&home, "today.json", DAILY_DATED);
    let config = with_config(
        &home,
        &format!(
            "[daily]\nsource = \"file\"\npath = {:?}\n",
            daily.display().to_string()
        ),
    );

    let out = run(&home, &["--config", &config, "today"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "# 2026-10-19\n25\t피카츄\tpikachu\n133\t이브이\teevee\n151\t뮤\tmew\n"
    );
}

#[test]
fn today_reports_malformed_file() {
    let home = tempfile::tempdir().unwrap();
    let daily = write_fixture(&home, "today.json", DAILY_MALFORMED);
    let config = with_config(
        &home,
        &format!(
            "[daily]\nsource = \"file\"\npath = {:?}\n",
            daily.display().to_string()
        ),
    );

    let out = run(&home, &["--config", &config, "today", "--format", "json"]);
    assert!(!out.status.success());
    assert_eq!(stdout(&out), "");
}
