//! Test builders — ergonomic constructors for dictionaries and daily picks.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use pokesrc_core::{DailyPicks, DailyPokemon, Dex};

/// Dictionary from `(korean, english)` pairs in order.
pub fn dex_of(pairs: &[(&str, &str)]) -> Dex {
    Dex::from_pairs(pairs.iter().copied())
}

/// Fluent builder for [`DailyPicks`] fixtures.
///
/// # Example
///
/// ```rust
/// let picks = DailyPicksBuilder::new()
///     .date("2026-10-19")
///     .pokemon(25, "pikachu", "피카츄")
///     .build();
/// ```
#[derive(Default)]
pub struct DailyPicksBuilder {
    picks: DailyPicks,
}

impl DailyPicksBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: &str) -> Self {
        self.picks.date = Some(date.parse().unwrap());
        self
    }

    pub fn pokemon(mut self, id: u32, name: &str, korean: &str) -> Self {
        self.picks.pokemon.push(DailyPokemon {
            id,
            name: name.to_string(),
            korean_name: korean.to_string(),
            sprite: format!("https://img.example/{id}.png"),
        });
        self
    }

    pub fn build(self) -> DailyPicks {
        self.picks
    }

    /// Serialise to the dated wire shape.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.picks).unwrap()
    }
}
