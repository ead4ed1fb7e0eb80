//! Invoice-level compliance checks: required fields, GSTIN format, future
//! dates.

use chrono::NaiveDate;
use regex::Regex;

use crate::models::config::InvoiceField;
use crate::models::invoice::NormalizedInvoice;
use crate::models::report::{ComplianceFlags, FutureDateFlag, InvalidGstinFlag, MissingFieldFlag};

use super::rules::validate_gstin_with;

/// Run the per-invoice compliance checks, accumulating into `flags`.
///
/// All applicable flags are recorded: checks never short-circuit, and an
/// invoice is never excluded for failing one. "Missing" and "present but
/// malformed" GSTINs are disjoint outcomes.
pub fn check_invoice(
    invoice: &NormalizedInvoice,
    required_fields: &[InvoiceField],
    gstin_pattern: &Regex,
    as_of: NaiveDate,
    flags: &mut ComplianceFlags,
) {
    for field in required_fields {
        let missing = match field {
            InvoiceField::InvoiceId => invoice.invoice_id.is_none(),
            InvoiceField::Vendor => invoice.vendor.is_empty(),
            InvoiceField::Date => invoice.date.is_none(),
            InvoiceField::Gstin => invoice.gstin.is_none(),
        };
        if missing {
            flags.missing_fields.push(MissingFieldFlag {
                invoice_id: invoice.invoice_id.clone(),
                field: field.label().to_string(),
            });
        }
    }

    if let Some(gstin) = &invoice.gstin {
        if !validate_gstin_with(gstin_pattern, gstin) {
            flags.invalid_gstin.push(InvalidGstinFlag {
                invoice_id: invoice.invoice_id.clone(),
                gstin: gstin.clone(),
            });
        }
    }

    if let Some(date) = invoice.date {
        if date > as_of {
            flags.future_dates.push(FutureDateFlag {
                invoice_id: invoice.invoice_id.clone(),
                date,
            });
        }
    }
}
