//! Daily dataset — the "today's Pokémon" showcase records.
//!
//! How the picks are chosen is up to whoever produces the dataset; this
//! module only defines the records and their wire format. Two shapes are
//! accepted on the wire:
//!
//! ```json
//! { "date": "2026-10-19", "pokemon": [ { "id": 25, "name": "pikachu", "koreanName": "피카츄", "sprite": "…" } ] }
//! [ { "id": 25, "name": "pikachu", "koreanName": "피카츄", "sprite": "…" } ]
//! ```
//!
//! `koreanName` may be omitted; [`DailyPicks::fill_korean_names`] fills it in
//! from the dictionary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dex::Dex;
use crate::error::DailyError;

/// One featured Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPokemon {
    pub id: u32,
    /// English name.
    pub name: String,
    #[serde(default)]
    pub korean_name: String,
    /// Sprite image URL.
    #[serde(default)]
    pub sprite: String,
}

/// The featured list for one day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "DailyWire")]
pub struct DailyPicks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub pokemon: Vec<DailyPokemon>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DailyWire {
    Dated {
        #[serde(default)]
        date: Option<NaiveDate>,
        pokemon: Vec<DailyPokemon>,
    },
    Bare(Vec<DailyPokemon>),
}

impl From<DailyWire> for DailyPicks {
    fn from(wire: DailyWire) -> Self {
        match wire {
            DailyWire::Dated { date, pokemon } => Self { date, pokemon },
            DailyWire::Bare(pokemon) => Self { date: None, pokemon },
        }
    }
}

impl DailyPicks {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DailyError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    /// True when the dataset is dated and the date is not `today`.
    /// Undated datasets are never stale.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.date.is_some_and(|d| d != today)
    }

    /// Fill empty `korean_name` fields from the dictionary's reverse index.
    /// Records whose English name is unknown are left as they are.
    pub fn fill_korean_names(&mut self, dex: &Dex) {
        for pokemon in self.pokemon.iter_mut().filter(|p| p.korean_name.is_empty()) {
            if let Some(korean) = dex.korean_of(&pokemon.name) {
                pokemon.korean_name = korean.to_string();
            } else {
                tracing::debug!(name = %pokemon.name, "no korean name for daily pick");
            }
        }
    }

    /// Name shown on a showcase card: the Korean name, or the English name
    /// when no Korean name is known.
    pub fn display_name(pokemon: &DailyPokemon) -> &str {
        if pokemon.korean_name.is_empty() {
            &pokemon.name
        } else {
            &pokemon.korean_name
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
