//! Cross-invoice pattern detection over the full normalized set.
//!
//! Grouping uses first-seen key order throughout, so repeated runs over the
//! same input produce identically ordered reports.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::models::invoice::NormalizedInvoice;
use crate::models::report::{
    AuditSummary, DateRange, DuplicateAmount, InvoicePatterns, RepeatedItem, VendorSummary,
};

/// Group invoices by vendor and aggregate counts and billed totals.
///
/// Every vendor is reported, single-invoice vendors included; the
/// empty-string vendor forms its own group so unattributed spend stays
/// visible. Risk thresholds are downstream's concern.
pub fn summarize_vendors(invoices: &[NormalizedInvoice]) -> Vec<VendorSummary> {
    let mut groups: IndexMap<&str, VendorSummary> = IndexMap::new();

    for invoice in invoices {
        let billed: Decimal = invoice.products.iter().filter_map(|p| p.total).sum();
        let entry = groups
            .entry(invoice.vendor.as_str())
            .or_insert_with(|| VendorSummary {
                vendor: invoice.vendor.clone(),
                invoice_count: 0,
                total_billed: Decimal::ZERO,
            });
        entry.invoice_count += 1;
        entry.total_billed += billed;
    }

    groups.into_values().collect()
}

/// Detect duplicate line-item amounts and repeated product names.
pub fn detect_patterns(invoices: &[NormalizedInvoice], repeat_threshold: usize) -> InvoicePatterns {
    // amount (2 dp) -> distinct invoice IDs, first-seen order
    let mut amounts: IndexMap<Decimal, Vec<String>> = IndexMap::new();
    // case-folded item name -> (first-seen spelling, occurrences)
    let mut items: IndexMap<String, (String, usize)> = IndexMap::new();

    for invoice in invoices {
        for product in &invoice.products {
            if let (Some(total), Some(id)) = (product.total, invoice.invoice_id.as_ref()) {
                let ids = amounts.entry(total.round_dp(2)).or_default();
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }

            let name = product.name.trim();
            if !name.is_empty() {
                items
                    .entry(name.to_lowercase())
                    .and_modify(|(_, count)| *count += 1)
                    .or_insert_with(|| (name.to_string(), 1));
            }
        }
    }

    InvoicePatterns {
        duplicate_amounts: amounts
            .into_iter()
            .filter(|(_, ids)| ids.len() >= 2)
            .map(|(amount, invoice_ids)| DuplicateAmount {
                amount,
                invoice_ids,
            })
            .collect(),
        repeated_items: items
            .into_values()
            .filter(|(_, occurrences)| *occurrences >= repeat_threshold)
            .map(|(item, occurrences)| RepeatedItem { item, occurrences })
            .collect(),
    }
}

/// Build the headline summary: input count, distinct non-empty vendors, and
/// the range of parseable dates.
pub fn build_summary(invoices: &[NormalizedInvoice]) -> AuditSummary {
    let vendors: HashSet<&str> = invoices
        .iter()
        .map(|inv| inv.vendor.as_str())
        .filter(|v| !v.is_empty())
        .collect();

    let dates = invoices.iter().filter_map(|inv| inv.date);
    let date_range = DateRange {
        start: dates.clone().min(),
        end: dates.max(),
    };

    AuditSummary {
        total_invoices: invoices.len(),
        vendors: vendors.len(),
        date_range,
    }
}
