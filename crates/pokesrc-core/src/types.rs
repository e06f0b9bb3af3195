//! Core types shared across pokesrc crates.
//!
//! [`NameEntry`] is one record of the name dictionary; [`MatchKind`] says
//! which of the three match strategies found it; [`SearchHit`] is what the
//! matcher hands to the UI, the CLI and the HTTP API.

use serde::Serialize;

use crate::hangul::get_choseong;

/// One dictionary record: the canonical Korean name and its English name.
///
/// The lowercase English key and the choseong skeleton of the Korean name
/// are derived once at construction so that a search is a plain scan of
/// `contains` checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    /// Canonical (Korean) name. Unique within a dictionary.
    pub korean: String,
    /// English name as given by the dictionary source.
    pub english: String,
    english_key: String,
    choseong: String,
}

impl NameEntry {
    pub fn new(korean: impl Into<String>, english: impl Into<String>) -> Self {
        let korean = korean.into();
        let english = english.into();
        Self {
            english_key: english.to_lowercase(),
            choseong: get_choseong(&korean),
            korean,
            english,
        }
    }

    /// Lowercased English name, the key for case-insensitive English matches.
    pub fn english_key(&self) -> &str {
        &self.english_key
    }

    /// Initial-consonant skeleton of the Korean name.
    pub fn choseong(&self) -> &str {
        &self.choseong
    }
}

/// Which match strategy accepted a record. Strategies are tried in
/// declaration order and the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    English,
    Korean,
    Choseong,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::English => write!(f, "english"),
            MatchKind::Korean => write!(f, "korean"),
            MatchKind::Choseong => write!(f, "choseong"),
        }
    }
}

/// A single search result borrowed from the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    #[serde(rename = "koreanName")]
    pub korean: &'a str,
    #[serde(rename = "name")]
    pub english: &'a str,
    #[serde(rename = "match")]
    pub kind: MatchKind,
}
