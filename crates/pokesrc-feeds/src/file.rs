//! File source — reads the daily dataset from a JSON file on disk.
//!
//! Whatever produces the daily picks (a cron job, a script) drops a JSON file
//! somewhere; [`FileSource::watch`] re-reads it every time it changes so a
//! running UI or server picks up the new day without a restart.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use pokesrc_core::DailyPicks;
use tokio::sync::mpsc::UnboundedSender;

use crate::{DailySource, DailyUpdate, FeedError};

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Watch the file and push a freshly parsed dataset down `tx` on every
    /// create/modify event. The returned watcher stops when dropped.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// atomic replace-by-rename still triggers a reload.
    pub fn watch(&self, tx: UnboundedSender<DailyUpdate>) -> Result<RecommendedWatcher, FeedError> {
        let path = self.path.clone();
        let file_name = path.file_name().map(|n| n.to_os_string());
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "daily file watch error");
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            let touches_ours = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if !touches_ours {
                return;
            }
            tracing::debug!(path = %path.display(), kind = ?event.kind, "daily file changed");
            // Receiver gone means the app is shutting down.
            let _ = tx.send(read_file(&path));
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %self.path.display(), "watching daily file");
        Ok(watcher)
    }
}

impl DailySource for FileSource {
    async fn fetch(&self) -> Result<DailyPicks, FeedError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(DailyPicks::from_slice(&bytes)?)
    }
}

fn read_file(path: &Path) -> DailyUpdate {
    let bytes = std::fs::read(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DailyPicks::from_slice(&bytes)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
