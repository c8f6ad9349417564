//! Cleanup of raw recognizer output and search-term sanitization.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Everything outside alphanumerics, Hangul and whitespace is recognizer
/// noise as far as the item search is concerned.
static QUERY_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z가-힣\s]").unwrap());

/// Normalizes recognizer output: NFKC, newlines dropped, trimmed.
pub fn clean_recognized(text: &str) -> String {
    let text: String = text.trim().nfkc().collect();
    text.replace(['\n', '\r'], " ").trim().to_string()
}

/// Strips junk characters from a search term. `None` when nothing usable
/// remains.
pub fn sanitize_query(text: &str) -> Option<String> {
    let cleaned = QUERY_JUNK.replace_all(text, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
