//! String similarity scoring for fuzzy name matching.

use crate::normalize::normalize_key;
use strsim::normalized_levenshtein;

/// Score the similarity of two product names on a 0-100 scale.
///
/// Both inputs are normalized (case, whitespace, punctuation) before scoring,
/// so `"Denon AVR-X1800H"` and `"denon avr x1800h"` score 100. The score is
/// symmetric and degrades monotonically with edit distance. An empty string
/// against anything scores 0.
pub fn similarity_score(a: &str, b: &str) -> u8 {
    let a = normalize_key(a);
    let b = normalize_key(b);

    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }

    let ratio = normalized_levenshtein(&a, &b);
    // Clamp before rounding; strsim guarantees [0, 1] but the cast must not
    // be able to overflow u8.
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::similarity_score;

    #[test]
    fn reflexive() {
        assert_eq!(similarity_score("Denon AVR-X1800H", "Denon AVR-X1800H"), 100);
    }

    #[test]
    fn case_whitespace_punctuation_insensitive() {
        assert_eq!(similarity_score("Denon AVR-X1800H", "  denon avr_x1800h "), 100);
    }

    #[test]
    fn symmetric() {
        let a = "Denon AVR-X1800H 7.2 Channel AV Receiver";
        let b = "Denon AVR-X2800H AV Receiver";
        assert_eq!(similarity_score(a, b), similarity_score(b, a));
    }

    #[test]
    fn empty_vs_non_empty_scores_zero() {
        assert_eq!(similarity_score("", "Denon AVR-X1800H"), 0);
        assert_eq!(similarity_score("Denon AVR-X1800H", ""), 0);
        assert_eq!(similarity_score("", ""), 0);
    }

    #[test]
    fn degrades_with_edit_distance() {
        let base = "Denon AVR-X1800H AV Receiver";
        let close = similarity_score(base, "Denon AVR-X1800H Receiver");
        let far = similarity_score(base, "Shure SM58 Dynamic Microphone");
        assert!(close > far);
        assert!(close >= 80, "near-identical names should score high: {close}");
        assert!(far < 50, "unrelated names should score low: {far}");
    }

    #[test]
    fn bounded_range() {
        let s = similarity_score("a", "zzzzzzzzzzzz");
        assert!(s <= 100);
    }
}
