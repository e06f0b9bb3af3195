//! Configuration types for pokesrc.
//!
//! [`Config::load`] reads `~/.config/pokesrc/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then layers an optional
//! explicit file on top. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
theme            = "default"
wide_breakpoint  = 100
max_suggestions  = 8

[search]
debounce_ms = 150

[dex]
path = ""

[daily]
source     = "none"
path       = ""
url        = "http://127.0.0.1:3000"
timeout_ms = 3000
watch      = true

[server]
bind = "127.0.0.1:8080"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub dex: DexConfig,
    #[serde(default)]
    pub daily: DailyConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Terminal width (columns) from which the showcase grid uses three
    /// columns instead of two.
    #[serde(default = "default_wide_breakpoint")]
    pub wide_breakpoint: u16,
    /// Rows visible in the suggestion dropdown.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: u16,
}

fn default_theme() -> String { "default".to_string() }
fn default_wide_breakpoint() -> u16 { 100 }
fn default_max_suggestions() -> u16 { 8 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            wide_breakpoint: default_wide_breakpoint(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Idle time after the last keystroke before results refresh.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 { 150 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms() }
    }
}

/// `[dex]` section of `config.toml`. An empty path means the embedded
/// dictionary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexConfig {
    #[serde(default)]
    pub path: String,
}

impl DexConfig {
    pub fn path(&self) -> Option<&Path> {
        non_empty_path(&self.path)
    }
}

/// Where the daily dataset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DailySourceKind {
    #[default]
    None,
    File,
    Http,
}

/// `[daily]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyConfig {
    #[serde(default)]
    pub source: DailySourceKind,
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_daily_url")]
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Re-read a file source whenever it changes on disk.
    #[serde(default = "default_watch")]
    pub watch: bool,
}

fn default_daily_url() -> String { "http://127.0.0.1:3000".to_string() }
fn default_timeout_ms() -> u64 { 3000 }
fn default_watch() -> bool { true }

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            source: DailySourceKind::None,
            path: String::new(),
            url: default_daily_url(),
            timeout_ms: default_timeout_ms(),
            watch: default_watch(),
        }
    }
}

impl DailyConfig {
    pub fn path(&self) -> Option<&Path> {
        non_empty_path(&self.path)
    }
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8080".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/pokesrc/config.toml`, layered on top of the
    /// built-in defaults, with `explicit` (if any) layered last. Creates the
    /// user file with defaults if it does not exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false));
        if let Some(explicit) = explicit {
            builder = builder.add_source(config::File::from(explicit).required(true));
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Layer a single TOML string over the defaults, without touching the
    /// filesystem.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn non_empty_path(s: &str) -> Option<&Path> {
    if s.trim().is_empty() {
        None
    } else {
        Some(Path::new(s))
    }
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("pokesrc")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
