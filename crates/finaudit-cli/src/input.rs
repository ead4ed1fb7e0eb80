//! Invoice record loading from JSON arrays and flat CSV tables.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use finaudit_core::{RawField, RawInvoice, RawProduct};

/// One CSV row: a single product line with its invoice header fields.
/// Empty cells mean the field is absent.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    invoice_id: Option<String>,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    gstin: Option<String>,
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    unit_price: Option<String>,
    #[serde(default)]
    total: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Load invoice records from a file, dispatching on extension (`.json` or
/// `.csv`).
pub fn load_invoices(path: &Path) -> anyhow::Result<Vec<RawInvoice>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RawInvoice::collection_from_json(&data)
                .with_context(|| format!("failed to parse {}", path.display()))
        }
        "csv" => invoices_from_csv(path),
        _ => anyhow::bail!(
            "Unsupported input format: {} (expected .json or .csv)",
            path.display()
        ),
    }
}

/// Read a flat CSV table: one product row per line, rows sharing an
/// invoice_id merged into one invoice (header fields first-row-wins).
fn invoices_from_csv(path: &Path) -> anyhow::Result<Vec<RawInvoice>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut invoices: Vec<RawInvoice> = Vec::new();

    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("{}: bad CSV row {}", path.display(), line + 2))?;

        let invoice_id = non_empty(row.invoice_id);
        let product = RawProduct {
            name: row.item.unwrap_or_default().trim().to_string(),
            quantity: non_empty(row.quantity).map(RawField::Text),
            unit_price: non_empty(row.unit_price).map(RawField::Text),
            total: non_empty(row.total).map(RawField::Text),
        };

        let existing = invoice_id.as_ref().and_then(|id| {
            invoices
                .iter()
                .position(|inv| inv.invoice_id.as_ref() == Some(id))
        });

        match existing {
            Some(index) => invoices[index].products.push(product),
            None => invoices.push(RawInvoice {
                invoice_id,
                vendor: non_empty(row.vendor),
                date: non_empty(row.date),
                gstin: non_empty(row.gstin),
                products: vec![product],
            }),
        }
    }

    Ok(invoices)
}
