use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pokesrc::{
    daily::{load_once, spawn_daily},
    headless::{write_hits, write_today, OutputFormat},
    server::{serve, ApiState},
};
use pokesrc_core::{config::Config, search_hits, Dex};
use pokesrc_feeds::Source;
use pokesrc_tui::DailyFeed;
use tracing_subscriber::EnvFilter;

const DEBUG_LOG: &str = "/tmp/pokesrc-debug.log";

#[derive(Parser)]
#[command(
    name = "pokesrc",
    about = "PokéSrc — Pokémon name search with Korean initial-consonant matching"
)]
struct Cli {
    /// Verbose logging. In the TUI, logs go to /tmp/pokesrc-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file layered over the defaults and the user config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the names matching QUERY.
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Fetch and print today's Pokémon from the configured source.
    Today {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Serve the JSON API.
    Serve {
        /// Listen address, overriding `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },
}

fn init_tui_logging(debug: bool) -> anyhow::Result<()> {
    if !debug {
        return Ok(());
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(DEBUG_LOG)
        .with_context(|| format!("opening {DEBUG_LOG}"))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();
    tracing::info!("pokesrc debug log started — tail -f {DEBUG_LOG}");
    Ok(())
}

fn init_stderr_logging(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn load_dex(config: &Config) -> anyhow::Result<Dex> {
    Ok(match config.dex.path() {
        Some(path) => Dex::load(path)?,
        None => Dex::embedded(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => init_tui_logging(cli.debug)?,
        Some(_) => init_stderr_logging(cli.debug),
    }

    let config = Config::load(cli.config.as_deref())?;
    let dex = load_dex(&config)?;

    match cli.command {
        Some(Cmd::Search {
            query,
            limit,
            format,
        }) => {
            let hits = search_hits(&query, &dex, limit);
            write_hits(&mut std::io::stdout().lock(), &hits, format)?;
        }

        Some(Cmd::Today { format }) => {
            let source = Source::from_config(&config.daily)?
                .context("no daily source configured (set daily.source to \"file\" or \"http\")")?;
            let picks = load_once(&source, &dex).await?;
            write_today(&mut std::io::stdout().lock(), &picks, format)?;
        }

        Some(Cmd::Serve { bind }) => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let source = Source::from_config(&config.daily)?;
            let state = ApiState::new(dex.clone(), source.is_some());
            let _daily = source
                .map(|s| spawn_daily(s, dex, config.daily.watch, state.daily_sink()))
                .transpose()?;
            serve(&bind, state).await?;
        }

        None => {
            let source = Source::from_config(&config.daily)?;
            let mut handle = None;
            let feed = match source {
                Some(source) => {
                    let (tx, rx) = std::sync::mpsc::channel();
                    let driver = spawn_daily(source, dex.clone(), config.daily.watch, move |update| {
                        let _ = tx.send(update.map_err(|e| e.to_string()));
                    })?;
                    let reload = Box::new(driver.reloader());
                    handle = Some(driver);
                    Some(DailyFeed {
                        updates: rx,
                        reload,
                    })
                }
                None => None,
            };

            // The UI loop blocks; keep it off the runtime's worker threads.
            tokio::task::spawn_blocking(move || pokesrc_tui::run(dex, config, feed)).await??;
            drop(handle);
        }
    }

    Ok(())
}
