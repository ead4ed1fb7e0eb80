//! Amount normalization for heterogeneous invoice fields.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::invoice::RawField;

lazy_static! {
    // First numeric run in a field: optional sign, digits with comma/space
    // thousands separators, optional decimal part. Currency prefixes such as
    // "Rs. " or "₹" fall away because matching starts at the number.
    static ref AMOUNT_VALUE: Regex = Regex::new(
        r"-?\d[\d,\s\u{00a0}]*(?:\.\d+)?"
    ).unwrap();
}

/// Parse an amount out of a string field (e.g. `"Rs. 5,000.00"`, `"₹80"`,
/// `"1 234.56"`, `"-50"`). Returns `None` when no numeric value is present.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let m = AMOUNT_VALUE.find(s)?;
    let cleaned: String = m
        .as_str()
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{00a0}'))
        .collect();
    Decimal::from_str(&cleaned).ok()
}

/// Normalize a raw numeric field to its canonical form.
///
/// `None` means missing or unparsable. Callers must treat it as an explicit
/// invalid marker, never as zero. Non-finite numbers (NaN, infinities) are
/// unparsable.
pub fn normalize_numeric(field: Option<&RawField>) -> Option<Decimal> {
    match field {
        None => None,
        Some(RawField::Number(n)) => Decimal::from_f64(*n),
        Some(RawField::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            parse_amount(s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_currency_prefixes() {
        assert_eq!(parse_amount("Rs. 5000.00"), Some(dec("5000.00")));
        assert_eq!(parse_amount("₹1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("$ 80"), Some(dec("80")));
        assert_eq!(parse_amount("INR 12 345.00"), Some(dec("12345.00")));
    }

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("5000"), Some(dec("5000")));
        assert_eq!(parse_amount("  4999.99 "), Some(dec("4999.99")));
        assert_eq!(parse_amount("0.00"), Some(dec("0.00")));
    }

    #[test]
    fn test_parse_amount_negative() {
        assert_eq!(parse_amount("-50"), Some(dec("-50")));
        assert_eq!(parse_amount("Rs. -800.25"), Some(dec("-800.25")));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount("free"), None);
    }

    #[test]
    fn test_normalize_numeric_markers() {
        assert_eq!(normalize_numeric(None), None);
        assert_eq!(
            normalize_numeric(Some(&RawField::Text("".to_string()))),
            None
        );
        assert_eq!(
            normalize_numeric(Some(&RawField::Number(f64::NAN))),
            None
        );
        // A real zero survives as a value, distinguishable from the markers.
        assert_eq!(
            normalize_numeric(Some(&RawField::Number(0.0))),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            normalize_numeric(Some(&RawField::Text("Rs. 0.00".to_string()))),
            Some(dec("0.00"))
        );
    }

    #[test]
    fn test_normalize_numeric_agrees_across_representations() {
        let from_number = normalize_numeric(Some(&RawField::Number(5000.0))).unwrap();
        let from_text =
            normalize_numeric(Some(&RawField::Text("Rs. 5,000.00".to_string()))).unwrap();
        assert_eq!(from_number, from_text);
    }
}
