//! Text normalization for index keys and similarity scoring.

/// Normalize a string for keyed lookup or similarity comparison: lowercase,
/// punctuation replaced with spaces, whitespace collapsed.
///
/// Index keys and scorer inputs must go through the same normalization or
/// exact lookups and fuzzy scores drift apart.
pub fn normalize_key(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            // Whitespace and punctuation both act as token separators
            pending_space = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::normalize_key;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_key("  Denon   AVR-X1800H  "), "denon avr x1800h");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize_key("QSC K12.2 (Active!)"), "qsc k12 2 active");
    }

    #[test]
    fn case_and_spacing_variants_collapse_to_one_key() {
        assert_eq!(normalize_key("AVR-X1800H"), normalize_key("avr x1800h"));
        assert_eq!(normalize_key("AVR-X1800H"), normalize_key(" AVR_X1800H "));
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("---"), "");
    }
}
