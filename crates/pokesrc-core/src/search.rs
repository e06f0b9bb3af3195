//! Search layer — substring and initial-consonant matching over a [`Dex`].
//!
//! For every record, in dictionary order, three predicates are tried and the
//! first one that holds accepts the record:
//!
//! 1. the lowercased query is a substring of the lowercased English name
//! 2. the raw query is a substring of the Korean name
//! 3. the raw query is a substring of the Korean name's choseong skeleton
//!
//! Accepted names go into an insertion-ordered set, so results come back in
//! dictionary order with no duplicates. An empty query matches nothing.

use indexmap::IndexSet;

use crate::dex::Dex;
use crate::types::{MatchKind, NameEntry, SearchHit};

/// Return the canonical names matching `query`, in dictionary order.
pub fn search(query: &str, dex: &Dex) -> Vec<String> {
    search_hits(query, dex, None)
        .into_iter()
        .map(|hit| hit.korean.to_string())
        .collect()
}

/// Like [`search`], but reports which strategy matched each record and
/// optionally stops after `limit` hits.
pub fn search_hits<'a>(query: &str, dex: &'a Dex, limit: Option<usize>) -> Vec<SearchHit<'a>> {
    if query.is_empty() || limit == Some(0) {
        return Vec::new();
    }

    let lower = query.to_lowercase();
    let mut seen: IndexSet<&'a str> = IndexSet::new();
    let mut hits = Vec::new();

    for entry in dex {
        let Some(kind) = match_entry(entry, query, &lower) else {
            continue;
        };
        if !seen.insert(entry.korean.as_str()) {
            continue;
        }
        hits.push(SearchHit {
            korean: &entry.korean,
            english: &entry.english,
            kind,
        });
        if limit.is_some_and(|n| hits.len() >= n) {
            break;
        }
    }

    tracing::trace!(query, hits = hits.len(), "search");
    hits
}

/// Which strategy, if any, makes `entry` a hit for `query`.
pub fn match_kind(entry: &NameEntry, query: &str) -> Option<MatchKind> {
    if query.is_empty() {
        return None;
    }
    match_entry(entry, query, &query.to_lowercase())
}

/// Test one record against the three strategies, first hit wins.
fn match_entry(entry: &NameEntry, query: &str, lower: &str) -> Option<MatchKind> {
    if entry.english_key().contains(lower) {
        Some(MatchKind::English)
    } else if entry.korean.contains(query) {
        Some(MatchKind::Korean)
    } else if entry.choseong().contains(query) {
        Some(MatchKind::Choseong)
    } else {
        None
    }
}

/// Memoising wrapper around [`search`]: re-running with the query it saw
/// last returns the cached results without rescanning the dictionary.
#[derive(Debug)]
pub struct Matcher {
    dex: Dex,
    last: Option<Memo>,
    scans: u64,
}

#[derive(Debug)]
struct Memo {
    query: String,
    names: Vec<String>,
    kinds: Vec<MatchKind>,
}

impl Matcher {
    pub fn new(dex: Dex) -> Self {
        Self {
            dex,
            last: None,
            scans: 0,
        }
    }

    pub fn dex(&self) -> &Dex {
        &self.dex
    }

    fn refresh(&mut self, query: &str) {
        if self.last.as_ref().is_some_and(|m| m.query == query) {
            return;
        }
        self.scans += 1;
        let (names, kinds) = search_hits(query, &self.dex, None)
            .into_iter()
            .map(|hit| (hit.korean.to_string(), hit.kind))
            .unzip();
        self.last = Some(Memo {
            query: query.to_string(),
            names,
            kinds,
        });
    }

    /// Results for `query`, recomputed only when the query changed.
    pub fn run(&mut self, query: &str) -> &[String] {
        self.refresh(query);
        self.last.as_ref().map(|m| m.names.as_slice()).unwrap_or(&[])
    }

    /// Like [`Matcher::run`], with the strategy that matched each name.
    pub fn hits(&mut self, query: &str) -> Vec<SearchHit<'_>> {
        self.refresh(query);
        let Some(memo) = &self.last else {
            return Vec::new();
        };
        memo.names
            .iter()
            .zip(&memo.kinds)
            .filter_map(|(name, &kind)| {
                let entry = self.dex.get(name)?;
                Some(SearchHit {
                    korean: &entry.korean,
                    english: &entry.english,
                    kind,
                })
            })
            .collect()
    }

    /// Number of full dictionary scans performed so far.
    pub fn scans(&self) -> u64 {
        self.scans
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn small_dex() -> Dex {
        Dex::from_pairs([
            ("이상해씨", "bulbasaur"),
            ("피카츄", "pikachu"),
            ("라이츄", "raichu"),
            ("니드런♀", "nidoran-f"),
            ("뮤츠", "mewtwo"),
            ("뮤", "mew"),
        ])
    }

    #[rstest]
    #[case("pika", &["피카츄"])]
    #[case("PIKA", &["피카츄"])]
    #[case("chu", &["피카츄", "라이츄"])]
    #[case("츄", &["피카츄", "라이츄"])]
    #[case("ㅍㅋㅊ", &["피카츄"])]
    #[case("ㅊ", &["피카츄", "라이츄", "뮤츠"])]
    #[case("mew", &["뮤츠", "뮤"])]
    #[case("ㄴㄷㄹ", &["니드런♀"])]
    #[case("xyz", &[])]
    #[case("", &[])]
    #[case(" ", &[])]
    fn finds(#[case] query: &str, #[case] expected: &[&str]) {
        assert_eq!(search(query, &small_dex()), expected);
    }

    #[test]
    fn first_strategy_wins() {
        let dex = small_dex();
        let hits = search_hits("츄", &dex, None);
        assert!(hits.iter().all(|h| h.kind == MatchKind::Korean));

        let hits = search_hits("ㅁㅊ", &dex, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, MatchKind::Choseong);

        let hits = search_hits("mew", &dex, None);
        assert!(hits.iter().all(|h| h.kind == MatchKind::English));
    }

    #[test]
    fn match_kind_agrees_with_search_hits() {
        let dex = small_dex();
        let pikachu = dex.get("피카츄").unwrap();
        assert_eq!(match_kind(pikachu, "PIKA"), Some(MatchKind::English));
        assert_eq!(match_kind(pikachu, "카츄"), Some(MatchKind::Korean));
        assert_eq!(match_kind(pikachu, "ㅋㅊ"), Some(MatchKind::Choseong));
        assert_eq!(match_kind(pikachu, ""), None);
        assert_eq!(match_kind(pikachu, "ㅁ"), None);
    }

    #[test]
    fn korean_match_is_case_sensitive_on_raw_query() {
        // Lowercasing only applies to the English side.
        let dex = Dex::from_pairs([("Mr.마임", "mr-mime")]);
        assert_eq!(search("MR.", &dex), Vec::<String>::new());
        assert_eq!(search("Mr.", &dex), vec!["Mr.마임"]);
        assert_eq!(search("MR-", &dex), vec!["Mr.마임"]);
    }

    #[test]
    fn limit_truncates() {
        let dex = small_dex();
        let hits = search_hits("ㅊ", &dex, Some(1));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].korean, "피카츄");
        assert!(search_hits("ㅊ", &dex, Some(0)).is_empty());
    }

    #[test]
    fn matcher_memoises_unchanged_query() {
        let mut matcher = Matcher::new(small_dex());
        assert_eq!(matcher.run("chu"), ["피카츄", "라이츄"]);
        assert_eq!(matcher.run("chu"), ["피카츄", "라이츄"]);
        assert_eq!(matcher.scans(), 1);
        assert_eq!(matcher.run("ㅍ"), ["피카츄"]);
        assert_eq!(matcher.scans(), 2);
    }

    #[test]
    fn matcher_hits_share_the_memo() {
        let mut matcher = Matcher::new(small_dex());
        let expected: Vec<(String, MatchKind)> = search_hits("츄", matcher.dex(), None)
            .into_iter()
            .map(|h| (h.korean.to_string(), h.kind))
            .collect();
        let hits: Vec<(String, MatchKind)> = matcher
            .hits("츄")
            .into_iter()
            .map(|h| (h.korean.to_string(), h.kind))
            .collect();
        assert_eq!(hits, expected);
        matcher.run("츄");
        assert_eq!(matcher.scans(), 1);
        assert!(matcher.hits("").is_empty());
    }

    proptest! {
        #[test]
        fn results_are_unique_dex_members(query in "\\PC{0,4}") {
            let dex = Dex::embedded();
            let results = search(&query, &dex);
            let unique: IndexSet<&String> = results.iter().collect();
            prop_assert_eq!(unique.len(), results.len());
            for name in &results {
                prop_assert!(dex.get(name).is_some());
            }
        }

        #[test]
        fn every_name_finds_itself(idx in 0usize..151) {
            let dex = Dex::embedded();
            let entry = dex.iter().nth(idx).unwrap();
            prop_assert!(search(&entry.korean, &dex).contains(&entry.korean));
            prop_assert!(search(&entry.english.to_uppercase(), &dex).contains(&entry.korean));
            if !entry.choseong().is_empty() {
                prop_assert!(search(entry.choseong(), &dex).contains(&entry.korean));
            }
        }
    }
}
