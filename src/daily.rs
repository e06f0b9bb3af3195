//! Daily driver — owns the configured daily source for the lifetime of the
//! process and forwards every (re)load to a sink.
//!
//! A load happens once at startup, again on every [`DailyHandle::reload`], and,
//! for watched file sources, whenever the file changes. Each dataset has its
//! missing Korean names filled in from the dictionary before it reaches the
//! sink; a dataset dated for another day is passed on with a warning.

use notify::RecommendedWatcher;
use pokesrc_core::{DailyPicks, Dex};
use pokesrc_feeds::{DailySource, DailyUpdate, FeedError, Source};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Keeps the driver alive. Dropping it stops the watcher and the task.
pub struct DailyHandle {
    reload: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
    _watcher: Option<RecommendedWatcher>,
}

impl DailyHandle {
    /// Ask for a fresh fetch from the source.
    pub fn reload(&self) {
        let _ = self.reload.send(());
    }

    /// A detached reload trigger, for callers that cannot hold the handle.
    pub fn reloader(&self) -> impl FnMut() + Send + 'static {
        let tx = self.reload.clone();
        move || {
            let _ = tx.send(());
        }
    }
}

impl Drop for DailyHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetch once, post-processed the same way the driver does.
pub async fn load_once(source: &Source, dex: &Dex) -> DailyUpdate {
    source.fetch().await.map(|picks| prepare(picks, dex))
}

/// Start the driver on the current tokio runtime.
pub fn spawn_daily<F>(source: Source, dex: Dex, watch: bool, sink: F) -> Result<DailyHandle, FeedError>
where
    F: Fn(DailyUpdate) + Send + Sync + 'static,
{
    let (reload_tx, mut reload_rx) = mpsc::unbounded_channel::<()>();
    let (file_tx, mut file_rx) = mpsc::unbounded_channel::<DailyUpdate>();

    let watcher = match (&source, watch) {
        (Source::File(file), true) => Some(file.watch(file_tx)?),
        _ => {
            drop(file_tx);
            None
        }
    };

    let mut watching = watcher.is_some();
    tracing::info!(source = %source.describe(), watch = watching, "daily driver started");

    let task = tokio::spawn(async move {
        sink(load_once(&source, &dex).await);
        loop {
            tokio::select! {
                msg = reload_rx.recv() => {
                    if msg.is_none() {
                        break;
                    }
                    tracing::info!(source = %source.describe(), "daily reload");
                    sink(load_once(&source, &dex).await);
                }
                update = file_rx.recv(), if watching => match update {
                    Some(update) => sink(update.map(|picks| prepare(picks, &dex))),
                    None => watching = false,
                },
            }
        }
        tracing::debug!("daily driver stopped");
    });

    Ok(DailyHandle {
        reload: reload_tx,
        task,
        _watcher: watcher,
    })
}

fn prepare(mut picks: DailyPicks, dex: &Dex) -> DailyPicks {
    picks.fill_korean_names(dex);
    let today = chrono::Local::now().date_naive();
    if picks.is_stale(today) {
        if let Some(date) = picks.date {
            tracing::warn!(%date, %today, "daily dataset is stale");
        }
    }
    tracing::info!(count = picks.pokemon.len(), "daily dataset loaded");
    picks
}
