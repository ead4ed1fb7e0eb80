//! Core library for rule-based invoice auditing.
//!
//! This crate provides:
//! - Normalization of heterogeneous invoice records (currency-prefixed
//!   amounts, mixed date formats, null/missing fields)
//! - Line-item arithmetic and validity checks
//! - Invoice-level compliance checks (required fields, GSTIN format,
//!   future dates)
//! - Cross-invoice pattern detection (vendor summaries, duplicate amounts,
//!   repeated items)
//!
//! The single entry point is [`run_audit`] (or [`Auditor`] for configured
//! runs), a pure function from a set of raw invoice records to an
//! [`AuditReport`]. The as-of date is always injected by the caller.

pub mod audit;
pub mod error;
pub mod models;

pub use audit::{run_audit, Auditor};
pub use error::{AuditError, Result};
pub use models::config::{AuditConfig, InvoiceField};
pub use models::invoice::{
    NormalizedInvoice, NormalizedProduct, RawField, RawInvoice, RawProduct,
};
pub use models::report::{
    AuditReport, AuditSummary, ComplianceFlags, Issue, IssueType, Severity, VendorSummary,
};
