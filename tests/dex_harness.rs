#![allow(unused)]
//! Dictionary and configuration integration harness.
//!
//! # What this covers
//!
//! - Loading a dictionary file named by `dex.path` instead of the embedded one
//! - File order becoming result order
//! - Malformed and missing dictionary files surfacing as `DexError`
//! - Config layering: defaults, then an explicit `--config` file
//!
//! # Running
//!
//! ```sh
//! cargo test --test dex_harness
//! ```

mod common;
use common::*;
use pokesrc_core::{config::Config, search, Dex, DexError};
use pretty_assertions::assert_eq;

#[test]
fn loads_dictionary_file_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "names.json", SMALL_DEX_JSON);
    let dex = Dex::load(&path).unwrap();

    assert_eq!(dex.len(), 10);
    let order: Vec<&str> = dex.iter().map(|e| e.korean.as_str()).collect();
    assert_eq!(order[..3], ["이상해씨", "파이리", "꼬부기"]);
    assert_search!(dex, "ㅁ", ["마임맨", "뮤츠", "뮤"]);
}

#[test]
fn reverse_lookup_is_case_insensitive() {
    let dex = Dex::from_json_str(SMALL_DEX_JSON).unwrap();
    assert_eq!(dex.korean_of("Pikachu"), Some("피카츄"));
    assert_eq!(dex.english_of("피카츄"), Some("pikachu"));
    assert_eq!(dex.korean_of("eevee"), None);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dex::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, DexError::Io { .. }), "{err}");
}

#[test]
fn malformed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "names.json", r#"["피카츄", "pikachu"]"#);
    assert!(matches!(Dex::load(&path), Err(DexError::Malformed(_))));
}

#[test]
fn duplicate_key_keeps_first_position_last_value() {
    let dex = Dex::from_json_str(r#"{"피카츄": "pika", "라이츄": "raichu", "피카츄": "pikachu"}"#).unwrap();
    assert_eq!(dex.len(), 2);
    assert_eq!(dex.iter().next().map(|e| e.english.as_str()), Some("pikachu"));
    assert_eq!(search("pika", &dex), ["피카츄"]);
}

#[test]
fn explicit_config_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    // Keep the user config file out of the picture.
    std::env::set_var("XDG_CONFIG_HOME", dir.path().join("xdg"));
    let path = write_fixture(
        &dir,
        "config.toml",
        "[search]\ndebounce_ms = 0\n\n[ui]\ntheme = \"gruvbox\"\n",
    );
    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.search.debounce_ms, 0);
    assert_eq!(config.ui.theme, "gruvbox");
    // untouched sections keep their defaults
    assert_eq!(config.server.bind, Config::defaults().server.bind);
    assert!(dir.path().join("xdg/pokesrc/config.toml").exists());
}
