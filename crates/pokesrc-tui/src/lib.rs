//! pokesrc TUI — ratatui application shell.
//!
//! The landing screen: a search box with a suggestion dropdown over a grid of
//! today's Pokémon. The TUI knows nothing about where the daily dataset comes
//! from; the caller hands it a [`DailyFeed`].

use std::sync::mpsc::Receiver;

use pokesrc_core::{config::Config, DailyPicks, Dex};

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Daily dataset plumbing supplied by the binary.
pub struct DailyFeed {
    /// Each load or reload result, errors already rendered to text.
    pub updates: Receiver<Result<DailyPicks, String>>,
    /// Ask the source to fetch again (`:reload`).
    pub reload: Box<dyn FnMut() + Send>,
}

/// Start the TUI. Blocks until the user quits.
pub fn run(dex: Dex, config: Config, daily: Option<DailyFeed>) -> anyhow::Result<()> {
    tracing::info!(
        entries = dex.len(),
        daily = daily.is_some(),
        "starting tui"
    );
    App::new(dex, config, daily).run()
}
