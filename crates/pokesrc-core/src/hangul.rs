//! Hangul helpers — initial-consonant (choseong) extraction.
//!
//! A precomposed syllable block (U+AC00..=U+D7A3) is laid out as
//! `0xAC00 + (initial * 21 + medial) * 28 + final`, so the initial consonant
//! falls out of a single division. Initials are always reported as
//! *compatibility* jamo (the U+3131 block), which is what users type on a
//! standard Korean keyboard.

use phf::phf_map;

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
/// Syllables per initial consonant: 21 medials × 28 finals.
const SYLLABLES_PER_INITIAL: u32 = 21 * 28;

const COMPAT_CONSONANT_FIRST: char = '\u{3131}'; // ㄱ
const COMPAT_CONSONANT_LAST: char = '\u{314E}'; // ㅎ

/// Initial consonants in syllable-index order.
const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Conjoining leading consonants (U+1100..=U+1112, as produced by NFD) to
/// their compatibility equivalents.
static CONJOINING_TO_COMPAT: phf::Map<char, char> = phf_map! {
    '\u{1100}' => 'ㄱ',
    '\u{1101}' => 'ㄲ',
    '\u{1102}' => 'ㄴ',
    '\u{1103}' => 'ㄷ',
    '\u{1104}' => 'ㄸ',
    '\u{1105}' => 'ㄹ',
    '\u{1106}' => 'ㅁ',
    '\u{1107}' => 'ㅂ',
    '\u{1108}' => 'ㅃ',
    '\u{1109}' => 'ㅅ',
    '\u{110A}' => 'ㅆ',
    '\u{110B}' => 'ㅇ',
    '\u{110C}' => 'ㅈ',
    '\u{110D}' => 'ㅉ',
    '\u{110E}' => 'ㅊ',
    '\u{110F}' => 'ㅋ',
    '\u{1110}' => 'ㅌ',
    '\u{1111}' => 'ㅍ',
    '\u{1112}' => 'ㅎ',
};

/// Returns true for a precomposed Hangul syllable block.
pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&(c as u32))
}

/// Returns true for a compatibility consonant jamo (ㄱ..=ㅎ).
pub fn is_compat_consonant(c: char) -> bool {
    (COMPAT_CONSONANT_FIRST..=COMPAT_CONSONANT_LAST).contains(&c)
}

/// The initial consonant of a precomposed syllable, as a compatibility jamo.
///
/// Returns `None` for anything that is not a syllable block.
pub fn choseong_of(c: char) -> Option<char> {
    if !is_syllable(c) {
        return None;
    }
    let index = (c as u32 - SYLLABLE_FIRST) / SYLLABLES_PER_INITIAL;
    CHOSEONG.get(index as usize).copied()
}

/// Reduce a word to its initial-consonant skeleton.
///
/// - syllable blocks become their initial consonant (`피카츄` → `ㅍㅋㅊ`)
/// - conjoining initials become compatibility jamo
/// - compatibility consonants and whitespace are kept as-is
/// - everything else (Latin, digits, vowels, symbols such as `♀`) is dropped
pub fn get_choseong(word: &str) -> String {
    word.chars()
        .filter_map(|c| {
            if let Some(initial) = choseong_of(c) {
                Some(initial)
            } else if let Some(&compat) = CONJOINING_TO_COMPAT.get(&c) {
                Some(compat)
            } else if is_compat_consonant(c) || c.is_whitespace() {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// True when the query is made up solely of initial consonants (and
/// whitespace), i.e. the user is typing a choseong abbreviation.
pub fn is_choseong_query(query: &str) -> bool {
    let mut saw_consonant = false;
    for c in query.chars() {
        if is_compat_consonant(c) || CONJOINING_TO_COMPAT.contains_key(&c) {
            saw_consonant = true;
        } else if !c.is_whitespace() {
            return false;
        }
    }
    saw_consonant
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("피카츄", "ㅍㅋㅊ")]
    #[case("이상해씨", "ㅇㅅㅎㅆ")]
    #[case("꼬부기", "ㄲㅂㄱ")]
    #[case("니드런♀", "ㄴㄷㄹ")]
    #[case("포리곤2", "ㅍㄹㄱ")]
    #[case("pikachu", "")]
    #[case("", "")]
    fn extracts_initials(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(get_choseong(word), expected);
    }

    #[test]
    fn keeps_whitespace_and_typed_consonants() {
        assert_eq!(get_choseong("마임 맨"), "ㅁㅇ ㅁ");
        assert_eq!(get_choseong("ㅍㅋ츄"), "ㅍㅋㅊ");
    }

    #[test]
    fn drops_standalone_vowels() {
        assert_eq!(get_choseong("ㅏㅍ"), "ㅍ");
    }

    #[test]
    fn conjoining_initials_map_to_compat() {
        // NFD form of 피카 is ᄑ ᅵ ᄏ ᅡ
        assert_eq!(get_choseong("\u{1111}\u{1175}\u{110F}\u{1161}"), "ㅍㅋ");
    }

    #[test]
    fn syllable_boundaries() {
        assert_eq!(choseong_of('가'), Some('ㄱ'));
        assert_eq!(choseong_of('힣'), Some('ㅎ'));
        assert_eq!(choseong_of('a'), None);
        assert_eq!(choseong_of('ㄱ'), None);
    }

    #[rstest]
    #[case("ㅍㅋㅊ", true)]
    #[case("ㅍ ㅋ", true)]
    #[case("피ㅋ", false)]
    #[case("pk", false)]
    #[case(" ", false)]
    #[case("", false)]
    fn detects_choseong_queries(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(is_choseong_query(query), expected);
    }
}
