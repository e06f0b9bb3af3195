use std::path::PathBuf;
use std::time::Duration;

use pokesrc_core::DailyError;
use thiserror::Error;

/// Failure to obtain a daily dataset from a source.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("daily source misconfigured: {0}")]
    Misconfigured(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DailyError),

    #[error("invalid daily API url {0:?}")]
    InvalidUrl(String),

    #[error("daily API request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("reading daily API response failed: {0}")]
    Body(#[from] hyper::Error),

    #[error("daily API returned {0}")]
    Status(hyper::StatusCode),

    #[error("daily API timed out after {0:?}")]
    Timeout(Duration),

    #[error("watching daily file failed: {0}")]
    Watch(#[from] notify::Error),
}
