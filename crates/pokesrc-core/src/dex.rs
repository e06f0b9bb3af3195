//! Dex — the static Korean → English name dictionary.
//!
//! The on-disk format is the `pokemon-name-map.json` shape: a single JSON
//! object whose keys are canonical Korean names and whose values are English
//! names. Key order is preserved and becomes the order of search results.
//! A repeated key keeps its first position and its last value, the same as
//! assigning into a JS object.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::DexError;
use crate::types::NameEntry;

const EMBEDDED_DEX: &str = include_str!("../data/pokemon-name-map.json");

#[derive(Debug, Clone, Default)]
pub struct Dex {
    entries: Vec<NameEntry>,
    by_korean: HashMap<String, usize>,
    by_english: HashMap<String, usize>,
}

impl Dex {
    /// The dictionary compiled into the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded JSON is malformed, which the unit tests rule out.
    pub fn embedded() -> Self {
        Self::from_json_str(EMBEDDED_DEX).expect("embedded dictionary must be valid JSON")
    }

    /// Parse a dictionary from a JSON object string.
    pub fn from_json_str(src: &str) -> Result<Self, DexError> {
        let raw: IndexMap<String, String> = serde_json::from_str(src)?;
        Ok(Self::from_pairs(raw))
    }

    /// Read and parse a dictionary file.
    pub fn load(path: &Path) -> Result<Self, DexError> {
        let src = std::fs::read_to_string(path).map_err(|source| DexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dex = Self::from_json_str(&src)?;
        tracing::info!(path = %path.display(), entries = dex.len(), "dictionary loaded");
        Ok(dex)
    }

    /// Build from `(korean, english)` pairs in order. Later duplicates
    /// overwrite the English name of the earlier record in place.
    pub fn from_pairs<I, K, E>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, E)>,
        K: Into<String>,
        E: Into<String>,
    {
        let mut dex = Self::default();
        for (korean, english) in pairs {
            dex.insert(NameEntry::new(korean, english));
        }
        dex
    }

    fn insert(&mut self, entry: NameEntry) {
        if let Some(&idx) = self.by_korean.get(&entry.korean) {
            let old_key = self.entries[idx].english_key();
            if self.by_english.get(old_key) == Some(&idx) {
                self.by_english.remove(old_key);
            }
            self.by_english
                .entry(entry.english_key().to_string())
                .or_insert(idx);
            self.entries[idx] = entry;
            return;
        }
        let idx = self.entries.len();
        self.by_korean.insert(entry.korean.clone(), idx);
        self.by_english
            .entry(entry.english_key().to_string())
            .or_insert(idx);
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameEntry> {
        self.entries.iter()
    }

    /// Look up a record by its canonical Korean name.
    pub fn get(&self, korean: &str) -> Option<&NameEntry> {
        self.by_korean.get(korean).map(|&idx| &self.entries[idx])
    }

    pub fn english_of(&self, korean: &str) -> Option<&str> {
        self.get(korean).map(|e| e.english.as_str())
    }

    /// Reverse lookup, case-insensitive on the English name.
    pub fn korean_of(&self, english: &str) -> Option<&str> {
        self.by_english
            .get(&english.to_lowercase())
            .map(|&idx| self.entries[idx].korean.as_str())
    }
}

impl<'a> IntoIterator for &'a Dex {
    type Item = &'a NameEntry;
    type IntoIter = std::slice::Iter<'a, NameEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
