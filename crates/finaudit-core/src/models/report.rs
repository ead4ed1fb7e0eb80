//! Audit report models: the single structured artifact the engine produces.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Severity of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Kind of issue a line-item or invoice check can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// `quantity × unit_price` disagrees with the line total beyond tolerance.
    TotalMismatch,
    /// Quantity is missing, unparsable, negative, or zero (outside the
    /// free-item case).
    InvalidQuantity,
    /// Unit price is missing, unparsable, or negative.
    InvalidPrice,
    /// A field required for a check is missing or unreadable.
    MissingField,
}

/// A single detected defect, always invoice-scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Invoice the defect belongs to; `null` when the invoice itself has no
    /// identifier (which is separately flagged as a missing field).
    pub invoice_id: Option<String>,

    /// Kind of defect.
    pub issue_type: IssueType,

    /// Human-readable description naming the defect.
    pub description: String,

    /// Severity of the defect.
    pub severity: Severity,
}

/// Entry in [`ComplianceFlags::future_dates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureDateFlag {
    pub invoice_id: Option<String>,
    pub date: NaiveDate,
}

/// Entry in [`ComplianceFlags::missing_fields`]: one per missing field,
/// not per invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingFieldFlag {
    pub invoice_id: Option<String>,
    pub field: String,
}

/// Entry in [`ComplianceFlags::invalid_gstin`]: present but malformed,
/// distinct from missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidGstinFlag {
    pub invoice_id: Option<String>,
    pub gstin: String,
}

/// Aggregate legal/compliance flags across the invoice set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFlags {
    /// Invoices dated strictly after the as-of date.
    pub future_dates: Vec<FutureDateFlag>,

    /// Required fields that are missing or empty, field-granular.
    pub missing_fields: Vec<MissingFieldFlag>,

    /// GSTINs that are present but fail the format check.
    pub invalid_gstin: Vec<InvalidGstinFlag>,
}

/// Per-vendor aggregate. Reported for every distinct vendor, including
/// single-invoice vendors and the empty-string vendor group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSummary {
    pub vendor: String,
    pub invoice_count: usize,
    /// Sum of all parseable product totals across the vendor's invoices.
    pub total_billed: Decimal,
}

/// A group of invoices sharing an identical line-item total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateAmount {
    /// Shared amount, normalized to two decimal places.
    pub amount: Decimal,
    /// Distinct invoice IDs carrying a line with this amount, first-seen
    /// order. Always at least two.
    pub invoice_ids: Vec<String>,
}

/// A product name recurring across the invoice set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedItem {
    /// First-seen spelling of the item name.
    pub item: String,
    pub occurrences: usize,
}

/// Cross-invoice patterns detected over the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoicePatterns {
    pub duplicate_amounts: Vec<DuplicateAmount>,
    pub repeated_items: Vec<RepeatedItem>,
}

/// Date range covered by the invoice set; both ends `null` when no invoice
/// carries a parseable date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Headline counts for the audited set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Number of input invoices, malformed ones included.
    pub total_invoices: usize,
    /// Number of distinct non-empty vendor names.
    pub vendors: usize,
    pub date_range: DateRange,
}

/// The complete audit report. Immutable once returned; downstream consumers
/// may attach a sibling `fuzzy_insights` key to the serialized form without
/// this crate's involvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub summary: AuditSummary,
    pub issues: Vec<Issue>,
    pub compliance_flags: ComplianceFlags,
    pub vendor_summary: Vec<VendorSummary>,
    pub invoice_patterns: InvoicePatterns,
}
