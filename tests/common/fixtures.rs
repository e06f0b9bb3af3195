//! Static dictionaries and daily datasets used across harnesses.

use std::path::PathBuf;

/// A small dictionary in `pokemon-name-map.json` shape, in dex order.
pub const SMALL_DEX_JSON: &str = r#"{
  "이상해씨": "bulbasaur",
  "파이리": "charmander",
  "꼬부기": "squirtle",
  "피카츄": "pikachu",
  "라이츄": "raichu",
  "니드런♀": "nidoran-f",
  "니드런♂": "nidoran-m",
  "마임맨": "mr-mime",
  "뮤츠": "mewtwo",
  "뮤": "mew"
}"#;

/// A dated daily dataset; `koreanName` omitted on purpose for one record.
pub const DAILY_DATED: &str = r#"{
  "date": "2026-10-19",
  "pokemon": [
    { "id": 25, "name": "pikachu", "koreanName": "피카츄", "sprite": "https://img.example/25.png" },
    { "id": 133, "name": "eevee", "sprite": "https://img.example/133.png" },
    { "id": 151, "name": "mew", "koreanName": "뮤", "sprite": "https://img.example/151.png" }
  ]
}"#;

/// The bare-array shape.
pub const DAILY_BARE: &str = r#"[
  { "id": 4, "name": "charmander", "koreanName": "파이리", "sprite": "" },
  { "id": 7, "name": "squirtle", "koreanName": "꼬부기", "sprite": "" }
]"#;

pub const DAILY_MALFORMED: &str = r#"{ "date": "2026-10-19", "pokemon": [ { "id": "#;

/// Date the dated fixture is valid for.
pub fn fixture_day() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
