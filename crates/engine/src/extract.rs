//! Heuristic extraction of manufacturer model codes from free-text names.

use regex::Regex;
use std::sync::LazyLock;

/// Candidate patterns in priority order. Hyphenated codes ("AVR-X1800H",
/// "DJM-900NXS2") are the strongest signal, then compact letter-digit codes
/// ("SM58", "XM2000"), then digit-first codes ("900NXS2").
static MODEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b([A-Z]{2,}[A-Z0-9]*-[A-Z0-9]{2,}(?:-[A-Z0-9]+)*)\b",
        r"\b([A-Z]{2,}\d{2,}[A-Z0-9]*)\b",
        r"\b([A-Z]+\d+[A-Z]+\d*)\b",
        r"\b(\d{3,}[A-Z]{2,}[A-Z0-9]*)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid model pattern {p}: {e}")))
    .collect()
});

/// Measurement-style tokens that satisfy the letter/digit mix but identify a
/// rating, not a model ("240V", "100W", "50HZ", "8OHM").
static UNIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(?:V|W|A|HZ|KHZ|MM|CM|M|KG|G|OHM|OHMS|BIT|K)$")
        .unwrap_or_else(|e| panic!("invalid unit pattern: {e}"))
});

/// Attempt to locate an embedded manufacturer model code in a product name.
///
/// Returns the extracted token uppercased, or `None` when nothing in the text
/// looks like a model code. Never fails on unparseable input. Idempotent:
/// running the extractor on a token it produced returns that token unchanged.
pub fn extract_model_token(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let upper = text.to_uppercase();

    for pattern in MODEL_PATTERNS.iter() {
        for captures in pattern.captures_iter(&upper) {
            if let Some(token) = captures.get(1) {
                let token = token.as_str();
                if is_plausible_model(token) {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// A plausible model code is at least 4 characters and mixes letters with
/// digits; unit-style ratings are rejected.
fn is_plausible_model(token: &str) -> bool {
    token.len() >= 4
        && token.chars().any(|c| c.is_ascii_alphabetic())
        && token.chars().any(|c| c.is_ascii_digit())
        && !UNIT_TOKEN.is_match(token)
}
