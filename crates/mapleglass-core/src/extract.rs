//! Parses free recognizer output into typed experience readings.
//!
//! The in-game gauge renders as `12,345(67.89%)` or `12,345[67.89%]`, often
//! with stray leading digits from misread UI chrome. Anchoring on the
//! bracket that always follows the real counter keeps those out; the looser
//! patterns below it are fallbacks only.

use std::sync::LazyLock;

use regex::Regex;

static VALUE_BEFORE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d,]*)\s*[\(\[]").unwrap());

static VALUE_AFTER_EXP_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)exp\.?\s*:?\s*(\d[\d,]*)").unwrap());

static FIRST_DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").unwrap());

static BRACKETED_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\(\[]\s*(\d+(?:\.\d+)?)\s*%?\s*[\)\]]").unwrap());

/// Extracts the absolute experience counter. Patterns are tried in order of
/// trust; the first one that yields a parseable number wins. `None` means no
/// usable reading, never a zero.
pub fn exp_value(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let candidates = [
        VALUE_BEFORE_BRACKET
            .captures(text)
            .map(|c| c[1].to_string()),
        VALUE_AFTER_EXP_LABEL
            .captures(text)
            .map(|c| c[1].to_string()),
        FIRST_DIGIT_RUN.find(text).map(|m| m.as_str().to_string()),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|digits| digits.replace(',', "").parse::<u64>().ok())
}

/// Extracts the bracketed percentage, e.g. the `67.89` of `(67.89%)`.
/// Absent or unparsable yields 0.0; values are clamped into [0, 100].
pub fn exp_percent(text: &str) -> f64 {
    BRACKETED_PERCENT
        .captures(text.trim())
        .and_then(|c| c[1].parse::<f64>().ok())
        .map(|p| p.min(100.0))
        .unwrap_or(0.0)
}
