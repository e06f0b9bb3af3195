//! PokéSrc — Pokémon name search with Korean initial-consonant matching.
//!
//! The binary has three faces over the same library crates: the TUI landing
//! screen, a headless CLI, and a JSON API. This crate holds the glue that is
//! shared between them so integration tests can import it directly.
//!
//! # Architecture
//!
//! ```text
//! pokesrc-core ──► search / dex / daily types
//!      │
//! pokesrc-feeds ──► daily driver ──┬──► TUI (pokesrc-tui)
//!                                  └──► server (axum)
//! ```

pub mod daily;
pub mod headless;
pub mod server;
