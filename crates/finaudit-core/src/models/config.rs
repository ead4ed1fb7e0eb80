//! Configuration for the audit engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::rules::gstin::DEFAULT_GSTIN_PATTERN;

/// Invoice-level fields the compliance checker can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceField {
    InvoiceId,
    Vendor,
    Date,
    Gstin,
}

impl InvoiceField {
    /// Field name as reported in `missing_fields` flags.
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceField::InvoiceId => "invoice_id",
            InvoiceField::Vendor => "vendor",
            InvoiceField::Date => "date",
            InvoiceField::Gstin => "GSTIN",
        }
    }
}

/// Audit policy configuration.
///
/// The as-of date for future-date checks is deliberately not part of this
/// struct: it is an explicit argument of [`crate::Auditor`], injected by the
/// caller rather than read from a clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Maximum absolute discrepancy between `quantity × unit_price` and the
    /// line total before a mismatch is flagged.
    pub tolerance: Decimal,

    /// Minimum occurrences for a product name to be reported as repeated.
    pub repeat_threshold: usize,

    /// Invoice-level fields whose absence raises a missing-field flag.
    pub required_fields: Vec<InvoiceField>,

    /// Regex a present GSTIN must match, applied to the trimmed, uppercased
    /// value. Invoice schemas vary across jurisdictions, so this is policy
    /// rather than a constant.
    pub gstin_pattern: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            // 0.01 currency units, absorbs rounding
            tolerance: Decimal::new(1, 2),
            repeat_threshold: 2,
            required_fields: vec![
                InvoiceField::InvoiceId,
                InvoiceField::Vendor,
                InvoiceField::Date,
                InvoiceField::Gstin,
            ],
            gstin_pattern: DEFAULT_GSTIN_PATTERN.to_string(),
        }
    }
}

impl AuditConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
