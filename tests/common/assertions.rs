//! Domain-specific assertion macros for pokesrc harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! query produced the unexpected result.

/// Assert that `search(query, dex)` returns exactly `expected`, in order.
///
/// ```rust
/// assert_search!(dex, "ㅍㅋㅊ", ["피카츄"]);
/// ```
#[macro_export]
macro_rules! assert_search {
    ($dex:expr, $query:expr, [$($name:expr),* $(,)?]) => {{
        let query: &str = $query;
        let actual = pokesrc_core::search(query, &$dex);
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(
            actual,
            expected,
            "search({:?}) returned the wrong names",
            query
        );
    }};
}

/// Assert that a result list has no duplicates.
#[macro_export]
macro_rules! assert_unique {
    ($names:expr) => {{
        let names: &[String] = &$names;
        let mut seen = std::collections::HashSet::new();
        for name in names {
            if !seen.insert(name) {
                panic!("assert_unique! failed: {:?} appears twice in {:?}", name, names);
            }
        }
    }};
}

/// Assert that `names` appear in `dex` order.
pub fn assert_dex_order(dex: &pokesrc_core::Dex, names: &[String]) {
    let positions: Vec<usize> = names
        .iter()
        .map(|n| {
            dex.iter()
                .position(|e| &e.korean == n)
                .unwrap_or_else(|| panic!("{n:?} is not in the dictionary"))
        })
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "results out of dictionary order: {names:?} at {positions:?}"
    );
}
