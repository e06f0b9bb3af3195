//! Headless output for the `search` and `today` subcommands.

use std::io::{self, Write};

use clap::ValueEnum;
use pokesrc_core::{DailyPicks, SearchHit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated `korean<TAB>english`, one per line.
    #[default]
    Plain,
    Json,
}

/// Print search hits. An empty result prints nothing in plain mode and `[]`
/// in JSON mode.
pub fn write_hits<W: Write>(out: &mut W, hits: &[SearchHit<'_>], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            for hit in hits {
                writeln!(out, "{}\t{}", hit.korean, hit.english)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, hits)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print the daily dataset. Plain mode prints an optional `# date` header,
/// then `id<TAB>korean<TAB>english` per card.
pub fn write_today<W: Write>(out: &mut W, picks: &DailyPicks, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            if let Some(date) = picks.date {
                writeln!(out, "# {date}")?;
            }
            for pokemon in &picks.pokemon {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    pokemon.id,
                    DailyPicks::display_name(pokemon),
                    pokemon.name
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, picks)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
