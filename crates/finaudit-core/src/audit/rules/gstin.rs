//! GSTIN (Goods and Services Tax Identification Number) validation.

use lazy_static::lazy_static;
use regex::Regex;

/// Canonical 15-character GSTIN shape: two-digit state code, ten-character
/// PAN (5 letters, 4 digits, 1 letter), entity code, literal scheme letter
/// `Z`, checksum character.
pub const DEFAULT_GSTIN_PATTERN: &str = r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]Z[0-9A-Z]$";

lazy_static! {
    static ref GSTIN_PATTERN: Regex = Regex::new(DEFAULT_GSTIN_PATTERN).unwrap();
}

/// Compiled form of [`DEFAULT_GSTIN_PATTERN`].
pub fn default_pattern() -> Regex {
    GSTIN_PATTERN.clone()
}

/// Validate a GSTIN against the canonical format.
///
/// Input is trimmed and uppercased before matching, so `27aapfu0939f1zv`
/// passes. This checks the shape only, not the checksum arithmetic.
pub fn validate_gstin(gstin: &str) -> bool {
    validate_gstin_with(&GSTIN_PATTERN, gstin)
}

/// Validate a GSTIN against a caller-supplied pattern (configurable policy;
/// real-world invoice schemas vary by jurisdiction).
pub fn validate_gstin_with(pattern: &Regex, gstin: &str) -> bool {
    let canonical = gstin.trim().to_ascii_uppercase();
    pattern.is_match(&canonical)
}
