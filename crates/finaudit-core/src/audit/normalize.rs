//! Conversion of raw invoice records into canonical normalized form.

use crate::models::invoice::{NormalizedInvoice, NormalizedProduct, RawInvoice, RawProduct};

use super::rules::{normalize_numeric, parse_invoice_date};

fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn normalize_product(raw: &RawProduct) -> NormalizedProduct {
    NormalizedProduct {
        name: raw.name.trim().to_string(),
        quantity: normalize_numeric(raw.quantity.as_ref()),
        unit_price: normalize_numeric(raw.unit_price.as_ref()),
        total: normalize_numeric(raw.total.as_ref()),
    }
}

/// Normalize a raw invoice. Never fails and never drops a record;
/// unparsable fields become explicit `None` markers for downstream checks.
pub fn normalize_invoice(raw: &RawInvoice) -> NormalizedInvoice {
    NormalizedInvoice {
        invoice_id: trimmed_or_none(raw.invoice_id.as_deref()),
        vendor: raw.vendor.as_deref().map(str::trim).unwrap_or("").to_string(),
        date: raw.date.as_deref().and_then(parse_invoice_date),
        gstin: trimmed_or_none(raw.gstin.as_deref()),
        products: raw.products.iter().map(normalize_product).collect(),
    }
}
