//! Field-level normalization and validation rules.

pub mod amounts;
pub mod dates;
pub mod gstin;

pub use amounts::{normalize_numeric, parse_amount};
pub use dates::parse_invoice_date;
pub use gstin::{validate_gstin, validate_gstin_with};
