//! pokesrc-core — name dictionary, matcher and shared types.
//!
//! # Architecture
//!
//! ```text
//! Dex ──► search ──► UI / CLI / HTTP
//!                       ▲
//! daily feeds ──► DailyPicks
//! ```
//!
//! The matcher is a pure function of (query, dictionary); everything else in
//! the workspace is glue around it.

pub mod config;
pub mod daily;
pub mod dex;
pub mod error;
pub mod hangul;
pub mod search;
pub mod types;

pub use daily::{DailyPicks, DailyPokemon};
pub use dex::Dex;
pub use error::{DailyError, DexError};
pub use search::{match_kind, search, search_hits, Matcher};
pub use types::{MatchKind, NameEntry, SearchHit};
