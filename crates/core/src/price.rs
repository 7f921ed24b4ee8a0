//! Price-string parsing shared by the ingest mapping and the catalog client.

/// Parse a vendor or catalog price string into a decimal value.
///
/// Strips currency symbols and whitespace, then resolves the separator
/// ambiguity: when both `,` and `.` are present the comma is a thousands
/// separator ("1,234.56"); a lone comma is a decimal separator when it is
/// followed by at most two digits ("1234,56"), otherwise a thousands
/// separator ("1,234"). Returns `None` for unparsable input; callers at the
/// ingestion boundary map that to 0.0 so validation can flag it downstream.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace(',', "")
    } else if cleaned.contains(',') {
        let mut parts = cleaned.splitn(2, ',');
        let head = parts.next().unwrap_or_default();
        let tail = parts.next().unwrap_or_default();
        if !tail.contains(',') && tail.len() <= 2 && !tail.is_empty() {
            format!("{head}.{tail}")
        } else {
            cleaned.replace(',', "")
        }
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::parse_price;

    #[test]
    fn plain_decimal() {
        assert_eq!(parse_price("18999.00"), Some(18999.0));
        assert_eq!(parse_price("50"), Some(50.0));
    }

    #[test]
    fn currency_symbols_stripped() {
        assert_eq!(parse_price("R 18,999.00"), Some(18999.0));
        assert_eq!(parse_price("$1,234.56"), Some(1234.56));
        assert_eq!(parse_price("€ 99"), Some(99.0));
    }

    #[test]
    fn comma_as_decimal_separator() {
        assert_eq!(parse_price("1234,56"), Some(1234.56));
        assert_eq!(parse_price("99,5"), Some(99.5));
    }

    #[test]
    fn comma_as_thousands_separator() {
        assert_eq!(parse_price("1,234"), Some(1234.0));
        assert_eq!(parse_price("12,345,678"), Some(12345678.0));
    }

    #[test]
    fn unparsable_is_none() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("POA"), None);
        assert_eq!(parse_price("call for pricing"), None);
    }
}
