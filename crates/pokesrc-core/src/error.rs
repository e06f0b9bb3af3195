use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a name dictionary.
#[derive(Error, Debug)]
pub enum DexError {
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not a JSON object of `"korean": "english"` strings.
    #[error("malformed dictionary: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure to decode a daily dataset.
#[derive(Error, Debug)]
pub enum DailyError {
    #[error("malformed daily dataset: {0}")]
    Malformed(#[from] serde_json::Error),
}
