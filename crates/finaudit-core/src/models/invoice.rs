//! Invoice data models: raw records as parsers deliver them, and the
//! canonical normalized form the audit rules operate on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, Result};

/// A field value as it arrives from upstream parsers: a bare number or a
/// string (possibly currency-prefixed, possibly non-numeric). Absence is
/// `None` at the field position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// Numeric value (JSON number).
    Number(f64),
    /// Textual value, e.g. `"Rs. 5000.00"` or `"10"`.
    Text(String),
}

/// A product line as received from parsing. Immutable once handed to the
/// audit engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    /// Product/service name.
    #[serde(default)]
    pub name: String,

    /// Quantity, as a number or numeric string.
    #[serde(default)]
    pub quantity: Option<RawField>,

    /// Unit price, possibly currency-prefixed.
    #[serde(default)]
    pub unit_price: Option<RawField>,

    /// Line total, possibly currency-prefixed.
    #[serde(default)]
    pub total: Option<RawField>,
}

/// An invoice record as received from parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInvoice {
    /// Invoice identifier.
    #[serde(default)]
    pub invoice_id: Option<String>,

    /// Vendor name.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Invoice date string, format unspecified.
    #[serde(default)]
    pub date: Option<String>,

    /// GSTIN tax registration identifier.
    #[serde(default)]
    pub gstin: Option<String>,

    /// Ordered product lines.
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

impl RawInvoice {
    /// Deserialize a JSON array into a collection of raw invoices.
    ///
    /// This is the structural gate of the audit boundary: anything that is
    /// not an array of invoice-shaped records fails fast with
    /// [`AuditError::Input`] before any report is built. Malformed *values*
    /// inside a record (bad amounts, bad dates) deserialize fine and are
    /// handled by normalization.
    pub fn collection_from_json(data: &str) -> Result<Vec<RawInvoice>> {
        serde_json::from_str(data).map_err(|e| {
            AuditError::Input(format!("expected a JSON array of invoice records: {e}"))
        })
    }
}

/// A product line in canonical form.
///
/// Numeric fields are `Some(value)` for a finite parsed number and `None`
/// when the raw field was missing or unparsable. `Some(Decimal::ZERO)` is a
/// legitimate billed zero; a parse failure never silently becomes zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// Product/service name, whitespace-trimmed.
    pub name: String,

    /// Quantity, or `None` when missing/unparsable.
    pub quantity: Option<Decimal>,

    /// Unit price, or `None` when missing/unparsable.
    pub unit_price: Option<Decimal>,

    /// Line total, or `None` when missing/unparsable.
    pub total: Option<Decimal>,
}

/// An invoice in canonical form. Never dropped for being malformed: empty
/// vendor and unparsable date are recorded as flags downstream, and the
/// invoice participates in every aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInvoice {
    /// Invoice identifier, trimmed; `None` when missing or empty.
    pub invoice_id: Option<String>,

    /// Vendor name, trimmed; empty string when missing.
    pub vendor: String,

    /// Invoice date; `None` when missing or unparsable.
    pub date: Option<NaiveDate>,

    /// GSTIN, trimmed; `None` when missing or empty.
    pub gstin: Option<String>,

    /// Ordered product lines.
    pub products: Vec<NormalizedProduct>,
}
