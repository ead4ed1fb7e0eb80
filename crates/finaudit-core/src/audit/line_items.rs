//! Per-line-item arithmetic and validity checks.

use rust_decimal::Decimal;

use crate::models::invoice::{NormalizedInvoice, NormalizedProduct};
use crate::models::report::{Issue, IssueType, Severity};

/// Zero quantity and zero total with a non-negative price is a giveaway
/// line, not a defect.
fn is_free_item(product: &NormalizedProduct) -> bool {
    product.quantity == Some(Decimal::ZERO)
        && product.total == Some(Decimal::ZERO)
        && product.unit_price.is_some_and(|p| p >= Decimal::ZERO)
}

/// Check every product line of an invoice.
///
/// Each defective line yields its own issue (never merged), and every issue
/// is keyed by the invoice it belongs to. A line can raise several issues at
/// once; an unparsable quantity does not suppress a negative price.
pub fn check_line_items(invoice: &NormalizedInvoice, tolerance: Decimal) -> Vec<Issue> {
    let mut issues = Vec::new();

    for product in &invoice.products {
        let free_item = is_free_item(product);

        match product.quantity {
            None => issues.push(issue(
                invoice,
                IssueType::InvalidQuantity,
                format!(
                    "Invalid quantity for item {}: missing or not a number",
                    product.name
                ),
            )),
            Some(q) if q < Decimal::ZERO => issues.push(issue(
                invoice,
                IssueType::InvalidQuantity,
                format!("Invalid quantity for item {}: {} is negative", product.name, q),
            )),
            Some(q) if q == Decimal::ZERO && !free_item => issues.push(issue(
                invoice,
                IssueType::InvalidQuantity,
                format!("Invalid quantity for item {}: zero", product.name),
            )),
            _ => {}
        }

        match product.unit_price {
            None => issues.push(issue(
                invoice,
                IssueType::InvalidPrice,
                format!(
                    "Invalid unit price for item {}: missing or not a number",
                    product.name
                ),
            )),
            Some(p) if p < Decimal::ZERO => issues.push(issue(
                invoice,
                IssueType::InvalidPrice,
                format!(
                    "Invalid unit price for item {}: {} is negative",
                    product.name, p
                ),
            )),
            _ => {}
        }

        match (product.quantity, product.unit_price, product.total) {
            (Some(quantity), Some(unit_price), Some(total)) => {
                let expected = (quantity * unit_price).round_dp(2);
                if (expected - total).abs() > tolerance {
                    issues.push(Issue {
                        invoice_id: invoice.invoice_id.clone(),
                        issue_type: IssueType::TotalMismatch,
                        description: format!(
                            "Total mismatch for item {}: expected {}, got {}",
                            product.name,
                            expected,
                            total.round_dp(2)
                        ),
                        severity: Severity::High,
                    });
                }
            }
            (_, _, None) => issues.push(issue(
                invoice,
                IssueType::MissingField,
                format!(
                    "Line total for item {} is missing or not a number",
                    product.name
                ),
            )),
            // Quantity or price already flagged above; nothing to cross-check.
            _ => {}
        }
    }

    issues
}

fn issue(invoice: &NormalizedInvoice, issue_type: IssueType, description: String) -> Issue {
    Issue {
        invoice_id: invoice.invoice_id.clone(),
        issue_type,
        description,
        severity: Severity::Medium,
    }
}
