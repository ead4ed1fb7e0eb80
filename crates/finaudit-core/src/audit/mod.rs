//! The audit engine: normalization, per-invoice checks, cross-invoice
//! detection, and report assembly.

pub mod compliance;
pub mod line_items;
pub mod normalize;
pub mod patterns;
pub mod rules;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{AuditError, Result};
use crate::models::config::AuditConfig;
use crate::models::invoice::{NormalizedInvoice, RawInvoice};
use crate::models::report::{AuditReport, ComplianceFlags};

pub use normalize::normalize_invoice;

/// Configured audit runner.
///
/// Holds the injected as-of date and the audit policy; [`Auditor::run`] is a
/// pure function over its input: no shared state survives between runs, and
/// concurrent runs over separate inputs are safe.
#[derive(Debug)]
pub struct Auditor {
    as_of: NaiveDate,
    config: AuditConfig,
    gstin_pattern: Regex,
}

impl Auditor {
    /// Create an auditor with default policy. The as-of date anchors the
    /// future-date check and must come from the caller, never a clock read
    /// inside the engine.
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            config: AuditConfig::default(),
            gstin_pattern: rules::gstin::default_pattern(),
        }
    }

    /// Create an auditor with explicit policy. Fails fast when the
    /// configured GSTIN pattern is not a valid regex.
    pub fn with_config(as_of: NaiveDate, config: AuditConfig) -> Result<Self> {
        let gstin_pattern = Regex::new(&config.gstin_pattern)
            .map_err(|e| AuditError::Config(format!("invalid GSTIN pattern: {e}")))?;
        Ok(Self {
            as_of,
            config,
            gstin_pattern,
        })
    }

    /// Set the arithmetic-mismatch tolerance.
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the repeated-item occurrence threshold.
    pub fn with_repeat_threshold(mut self, threshold: usize) -> Self {
        self.config.repeat_threshold = threshold;
        self
    }

    /// Audit an invoice set and assemble the report.
    ///
    /// Never fails on malformed invoice data: defects become issues and
    /// flags, and every input invoice participates in every aggregate.
    /// Repeated runs over the same input produce identically ordered
    /// reports.
    pub fn run(&self, invoices: &[RawInvoice]) -> AuditReport {
        info!("Auditing {} invoices as of {}", invoices.len(), self.as_of);

        let normalized: Vec<NormalizedInvoice> =
            invoices.iter().map(normalize_invoice).collect();

        let mut issues = Vec::new();
        let mut compliance_flags = ComplianceFlags::default();
        for invoice in &normalized {
            issues.extend(line_items::check_line_items(invoice, self.config.tolerance));
            compliance::check_invoice(
                invoice,
                &self.config.required_fields,
                &self.gstin_pattern,
                self.as_of,
                &mut compliance_flags,
            );
        }

        let report = AuditReport {
            summary: patterns::build_summary(&normalized),
            issues,
            compliance_flags,
            vendor_summary: patterns::summarize_vendors(&normalized),
            invoice_patterns: patterns::detect_patterns(
                &normalized,
                self.config.repeat_threshold,
            ),
        };

        debug!(
            "Audit complete: {} issues, {} missing fields, {} vendors",
            report.issues.len(),
            report.compliance_flags.missing_fields.len(),
            report.vendor_summary.len()
        );

        report
    }
}

/// Audit an invoice set with default policy.
pub fn run_audit(invoices: &[RawInvoice], as_of: NaiveDate) -> AuditReport {
    Auditor::new(as_of).run(invoices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{IssueType, Severity};

    fn fixture() -> Vec<RawInvoice> {
        RawInvoice::collection_from_json(
            r#"[
                {
                    "invoice_id": "INV-1001",
                    "vendor": "ABC Traders",
                    "date": "2025-06-01",
                    "gstin": "27AAPFU0939F1ZV",
                    "products": [
                        {"name": "Cement Bags", "quantity": "10", "unit_price": "Rs. 500.00", "total": "Rs. 5000.00"},
                        {"name": "Steel Rods", "quantity": "5", "unit_price": "Rs. 1200.00", "total": "Rs. 6000.00"}
                    ]
                },
                {
                    "invoice_id": "INV-1002",
                    "vendor": "XYZ Construction Supplies",
                    "date": "2025-08-12",
                    "gstin": "123INVALIDGST",
                    "products": [
                        {"name": "Bricks", "quantity": 1000, "unit_price": 10.0, "total": "Rs. 10000.00"},
                        {"name": "Sand Bags", "quantity": "50", "unit_price": "Rs. 80.00", "total": "Rs. 4000.00"}
                    ]
                },
                {
                    "invoice_id": "INV-1003",
                    "vendor": "",
                    "date": "2025-06-20",
                    "products": [
                        {"name": "Pipes (PVC)", "quantity": "20", "unit_price": "Rs. 300.00", "total": "Rs. 5000.00"},
                        {"name": "Valves", "quantity": "0", "unit_price": "Rs. 150.00", "total": "Rs. 0.00"}
                    ]
                },
                {
                    "invoice_id": "INV-1004",
                    "vendor": "Building Solutions Inc.",
                    "date": "2025-07-05",
                    "gstin": "29AABCU9603R1ZJ",
                    "products": [
                        {"name": "Paint (White)", "quantity": "5", "unit_price": "Rs. 800.00", "total": "Rs. 4000.00"},
                        {"name": "Cement Bags", "quantity": "10", "unit_price": "Rs. 500.00", "total": "Rs. 5000.00"}
                    ]
                }
            ]"#,
        )
        .unwrap()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    #[test]
    fn test_full_audit_fixture() {
        let report = run_audit(&fixture(), as_of());

        assert_eq!(report.summary.total_invoices, 4);
        assert_eq!(report.summary.vendors, 3);
        assert_eq!(
            report.summary.date_range.start,
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(
            report.summary.date_range.end,
            NaiveDate::from_ymd_opt(2025, 8, 12)
        );

        // INV-1003 has a mismatched line (20 × 300 = 6000 ≠ 5000); Valves is
        // a free item and stays clean.
        let mismatches: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.issue_type == IssueType::TotalMismatch)
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].invoice_id.as_deref(), Some("INV-1003"));
        assert_eq!(mismatches[0].severity, Severity::High);

        // INV-1002 is dated past the as-of date; its GSTIN is malformed.
        assert_eq!(report.compliance_flags.future_dates.len(), 1);
        assert_eq!(
            report.compliance_flags.future_dates[0].invoice_id.as_deref(),
            Some("INV-1002")
        );
        assert_eq!(report.compliance_flags.invalid_gstin.len(), 1);

        // INV-1003 is missing vendor and GSTIN.
        let missing: Vec<(&str, &str)> = report
            .compliance_flags
            .missing_fields
            .iter()
            .map(|f| (f.invoice_id.as_deref().unwrap_or(""), f.field.as_str()))
            .collect();
        assert_eq!(missing, vec![("INV-1003", "vendor"), ("INV-1003", "GSTIN")]);

        // 5000.00 appears on INV-1001, INV-1003, and INV-1004; 4000.00 on
        // INV-1002 and INV-1004. First-seen order.
        assert_eq!(report.invoice_patterns.duplicate_amounts.len(), 2);
        assert_eq!(
            report.invoice_patterns.duplicate_amounts[0].invoice_ids,
            vec!["INV-1001", "INV-1003", "INV-1004"]
        );
        assert_eq!(
            report.invoice_patterns.duplicate_amounts[1].invoice_ids,
            vec!["INV-1002", "INV-1004"]
        );

        // Cement Bags appears twice.
        assert_eq!(report.invoice_patterns.repeated_items.len(), 1);
        assert_eq!(report.invoice_patterns.repeated_items[0].item, "Cement Bags");

        // Every vendor group reported, empty vendor included.
        assert_eq!(report.vendor_summary.len(), 4);
    }

    #[test]
    fn test_idempotence() {
        let invoices = fixture();
        let first = serde_json::to_string(&run_audit(&invoices, as_of())).unwrap();
        let second = serde_json::to_string(&run_audit(&invoices, as_of())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_conservation() {
        let invoices = fixture();
        let report = run_audit(&invoices, as_of());

        assert_eq!(report.summary.total_invoices, invoices.len());
        let grouped: usize = report.vendor_summary.iter().map(|v| v.invoice_count).sum();
        assert_eq!(grouped, invoices.len());
    }

    #[test]
    fn test_entirely_malformed_invoice_still_reported() {
        let invoices = RawInvoice::collection_from_json(
            r#"[{"products": [{"name": "", "quantity": "??", "unit_price": null, "total": "?"}]}]"#,
        )
        .unwrap();
        let report = run_audit(&invoices, as_of());

        // Counted, flagged, never dropped.
        assert_eq!(report.summary.total_invoices, 1);
        assert_eq!(report.compliance_flags.missing_fields.len(), 4);
        let kinds: Vec<IssueType> = report.issues.iter().map(|i| i.issue_type).collect();
        assert_eq!(
            kinds,
            vec![
                IssueType::InvalidQuantity,
                IssueType::InvalidPrice,
                IssueType::MissingField
            ]
        );
        assert!(report.issues.iter().all(|i| i.invoice_id.is_none()));
    }

    #[test]
    fn test_builder_overrides() {
        let invoices = fixture();
        // With a huge tolerance the INV-1003 mismatch disappears.
        let report = Auditor::new(as_of())
            .with_tolerance(Decimal::new(10_000, 0))
            .with_repeat_threshold(3)
            .run(&invoices);

        assert!(report
            .issues
            .iter()
            .all(|i| i.issue_type != IssueType::TotalMismatch));
        assert!(report.invoice_patterns.repeated_items.is_empty());
    }

    #[test]
    fn test_with_config_rejects_bad_pattern() {
        let config = AuditConfig {
            gstin_pattern: "[unclosed".to_string(),
            ..AuditConfig::default()
        };
        let err = Auditor::with_config(as_of(), config).unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }

    #[test]
    fn test_empty_input() {
        let report = run_audit(&[], as_of());
        assert_eq!(report.summary.total_invoices, 0);
        assert!(report.issues.is_empty());
        assert!(report.vendor_summary.is_empty());
    }
}
