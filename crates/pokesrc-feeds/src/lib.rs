//! pokesrc-feeds — daily dataset sources for pokesrc.
//!
//! Each source knows how to fetch one [`DailyPicks`] value. Selecting the
//! picks is someone else's job; sources only move bytes and decode them.

use std::future::Future;
use std::time::Duration;

use pokesrc_core::config::{DailyConfig, DailySourceKind};
use pokesrc_core::DailyPicks;

pub mod error;
pub mod file;
pub mod http;

pub use error::FeedError;
pub use file::FileSource;
pub use http::HttpSource;

/// Result of one (re)load, as sent over update channels.
pub type DailyUpdate = Result<DailyPicks, FeedError>;

/// Trait implemented by each daily dataset source.
pub trait DailySource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<DailyPicks, FeedError>> + Send;
}

/// A configured source, chosen from the `[daily]` config section.
#[derive(Debug, Clone)]
pub enum Source {
    File(FileSource),
    Http(HttpSource),
}

impl Source {
    /// Build the source named by `cfg.source`. `Ok(None)` means the daily
    /// showcase is switched off.
    pub fn from_config(cfg: &DailyConfig) -> Result<Option<Self>, FeedError> {
        match cfg.source {
            DailySourceKind::None => Ok(None),
            DailySourceKind::File => {
                let path = cfg.path().ok_or_else(|| {
                    FeedError::Misconfigured("daily.source = \"file\" needs daily.path".to_string())
                })?;
                Ok(Some(Source::File(FileSource::new(path))))
            }
            DailySourceKind::Http => {
                let source = HttpSource::new(cfg.url.clone(), Duration::from_millis(cfg.timeout_ms));
                // Validate eagerly so a typo surfaces at startup.
                source.today_uri()?;
                Ok(Some(Source::Http(source)))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Source::File(f) => format!("file {}", f.path().display()),
            Source::Http(h) => match h.today_uri() {
                Ok(uri) => format!("http {uri}"),
                Err(_) => "http (invalid url)".to_string(),
            },
        }
    }
}

impl DailySource for Source {
    async fn fetch(&self) -> Result<DailyPicks, FeedError> {
        match self {
            Source::File(f) => f.fetch().await,
            Source::Http(h) => h.fetch().await,
        }
    }
}
