//! Date normalization for invoice date strings.

use chrono::NaiveDate;

// ISO first (the one format every upstream parser emits), then best-effort
// regional variants.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Parse an invoice date string against the recognized formats.
///
/// Returns `None` for anything unparsable; the compliance checker records
/// that as a missing date rather than letting it pass silently.
pub fn parse_invoice_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
