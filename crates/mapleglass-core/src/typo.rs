//! Post-correction of systematic recognizer misreads of boss and monster
//! names. The recognizer reliably confuses a handful of look-alike Korean
//! syllables; a fixed substitution table is applied after every read.

/// Substitutions in application order. Compound names come before the bare
/// syllables they contain, so a hit on the longer key is never mangled by a
/// shorter one. Identity entries pin names that already read correctly.
const TYPO_TABLE: &[(&str, &str)] = &[
    ("자큼", "자쿰"),
    ("큼", "쿰"),
    ("핑크빈", "핑크빈"),
    ("혼테일", "혼테일"),
];

/// Corrects known misreads. An exact whole-string hit on the trimmed text
/// substitutes the entire string; otherwise every table entry is replaced
/// as a substring, in table order, on the running result.
pub fn correct(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }

    if let Some((_, replacement)) = TYPO_TABLE.iter().find(|(key, _)| *key == trimmed) {
        return (*replacement).to_string();
    }

    let mut result = trimmed.to_string();
    for (key, replacement) in TYPO_TABLE {
        if result.contains(key) {
            result = result.replace(key, replacement);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_string_match_substitutes_entirely() {
        assert_eq!(correct("자큼"), "자쿰");
        assert_eq!(correct("  큼  "), "쿰");
    }

    #[test]
    fn substring_replacement_in_longer_text() {
        assert_eq!(correct("자큼의 왕관"), "자쿰의 왕관");
    }

    #[test]
    fn compound_key_wins_over_contained_syllable() {
        // "자큼" must resolve to "자쿰", not via the bare "큼" entry alone.
        assert_eq!(correct("파풀라투스 자큼"), "파풀라투스 자쿰");
    }

    #[test]
    fn unknown_text_passes_through() {
        assert_eq!(correct("슬라임"), "슬라임");
        assert_eq!(correct(""), "");
        assert_eq!(correct("   "), "");
    }

    #[test]
    fn correction_is_idempotent() {
        for input in ["자큼", "큼", "자큼의 투구", "혼테일의 목걸이", "plain text", ""] {
            let once = correct(input);
            assert_eq!(correct(&once), once);
        }
    }
}
