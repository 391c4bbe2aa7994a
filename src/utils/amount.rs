//! Minimum-amount extraction from the deposit forms. The sites render the
//! accepted range in three different shapes; each parser returns the value
//! ready to key into the amount field, grouping separators stripped.

use regex::Regex;
use std::sync::OnceLock;

fn baht_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"฿\s*([\d,]+)").expect("valid baht range regex"))
}

fn thb_placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"THB\s+(\d+)").expect("valid THB placeholder regex"))
}

fn decimal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\d,.]+").expect("valid decimal regex"))
}

/// "฿ 100 - ฿ 200,000" → "100". The first baht figure is the minimum.
pub fn parse_min_from_range(text: &str) -> Option<String> {
    baht_range_re()
        .captures(text)
        .map(|c| c[1].replace(',', ""))
}

/// "Min THB 100" placeholder text → "100".
pub fn parse_min_from_placeholder(text: &str) -> Option<String> {
    thb_placeholder_re().captures(text).map(|c| c[1].to_string())
}

/// "100.00 - 200,000.00 THB" → "100.00". First decimal figure is the
/// minimum.
pub fn parse_min_decimal(text: &str) -> Option<String> {
    decimal_re()
        .find(text)
        .map(|m| m.as_str().replace(',', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baht_range_takes_first_figure_without_commas() {
        assert_eq!(
            parse_min_from_range("฿ 1,000 - ฿ 200,000").as_deref(),
            Some("1000")
        );
        assert_eq!(parse_min_from_range("฿100 - ฿50,000").as_deref(), Some("100"));
        assert_eq!(parse_min_from_range("no amounts here"), None);
    }

    #[test]
    fn thb_placeholder_minimum() {
        assert_eq!(
            parse_min_from_placeholder("Min THB 100 - Max THB 200000").as_deref(),
            Some("100")
        );
        assert_eq!(parse_min_from_placeholder("0"), None);
    }

    #[test]
    fn decimal_range_takes_first_figure() {
        assert_eq!(
            parse_min_decimal("100.00 - 200,000.00 THB").as_deref(),
            Some("100.00")
        );
        assert_eq!(parse_min_decimal("THB only"), None);
    }
}
