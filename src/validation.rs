use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::document::LedgerDocument;
use crate::error::ValidationError;
use crate::types::Discount;

/// Validate a document for finalization.
///
/// Returns every outstanding condition (not just the first) so the
/// hosting form can display the full list and block saving until it is
/// empty. Constructed documents already uphold most of these invariants;
/// the full pass matters for documents deserialized from storage, whose
/// fields bypass the constructor checks.
pub fn validate_document(doc: &LedgerDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if doc.number().trim().is_empty() {
        errors.push(ValidationError::new(
            "number",
            "document number must not be empty",
        ));
    }

    if doc.lines().is_empty() {
        errors.push(ValidationError::new(
            "lines",
            format!("a {} must have at least one line item", doc.kind().label()),
        ));
    }

    for (i, line) in doc.lines().iter().enumerate() {
        let prefix = format!("lines[{i}]");

        if line.description().trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}.description"),
                "description must not be empty",
            ));
        }
        if line.quantity() == 0 {
            errors.push(ValidationError::new(
                format!("{prefix}.quantity"),
                "quantity must be at least 1",
            ));
        }
        if line.unit_rate().is_negative() {
            errors.push(ValidationError::new(
                format!("{prefix}.unit_rate"),
                "unit rate must not be negative",
            ));
        }
        if line.unit_rate().currency() != doc.currency() {
            errors.push(ValidationError::new(
                format!("{prefix}.unit_rate"),
                format!(
                    "line currency {} differs from document currency {}",
                    line.unit_rate().currency(),
                    doc.currency()
                ),
            ));
        }

        match line.discount() {
            Discount::Percent(percent) => {
                if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                    errors.push(ValidationError::new(
                        format!("{prefix}.discount"),
                        format!("percent discount must be between 0 and 100, got {percent}"),
                    ));
                }
            }
            Discount::Flat(amount) => {
                if amount.currency() != line.unit_rate().currency() {
                    errors.push(ValidationError::new(
                        format!("{prefix}.discount"),
                        "flat discount currency differs from the line currency",
                    ));
                } else if amount.is_negative() {
                    errors.push(ValidationError::new(
                        format!("{prefix}.discount"),
                        "flat discount must not be negative",
                    ));
                } else if line.amounts().net.is_negative() {
                    errors.push(ValidationError::new(
                        format!("{prefix}.discount"),
                        "discount exceeds item amount",
                    ));
                }
            }
        }
    }

    if doc.document_discount().is_negative() {
        errors.push(ValidationError::new(
            "document_discount",
            "document discount must not be negative",
        ));
    }
    if doc.document_discount().currency() != doc.currency() {
        errors.push(ValidationError::new(
            "document_discount",
            "document discount currency differs from the document currency",
        ));
    }
    if doc.shipping().is_negative() {
        errors.push(ValidationError::new(
            "shipping",
            "shipping must not be negative",
        ));
    }
    if doc.shipping().currency() != doc.currency() {
        errors.push(ValidationError::new(
            "shipping",
            "shipping currency differs from the document currency",
        ));
    }

    let mut seen = HashSet::new();
    for (i, rule) in doc.tax_rules().iter().enumerate() {
        if rule.rate_percent() < Decimal::ZERO || rule.rate_percent() > Decimal::ONE_HUNDRED {
            errors.push(ValidationError::new(
                format!("tax_rules[{i}]"),
                format!(
                    "tax rate must be between 0 and 100, got {}",
                    rule.rate_percent()
                ),
            ));
        }
        if !seen.insert(rule.name().to_string()) {
            errors.push(ValidationError::new(
                format!("tax_rules[{i}]"),
                format!("duplicate tax rule name '{}'", rule.name()),
            ));
        }
    }

    if doc.totals().taxable_base.is_negative() {
        errors.push(ValidationError::new(
            "totals.taxable_base",
            "discounts exceed subtotal",
        ));
    }

    errors.extend(validate_arithmetic(doc));

    errors
}

/// Check the cached totals against their defining identities. A mismatch
/// means the cache is stale (possible only on documents deserialized from
/// storage) and the host should call `recompute()`.
pub fn validate_arithmetic(doc: &LedgerDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let totals = doc.totals();

    let expected_taxable = totals.subtotal.amount()
        - totals.line_discount_total.amount()
        - totals.document_discount.amount();
    if totals.taxable_base.amount() != expected_taxable {
        errors.push(ValidationError::new(
            "totals.taxable_base",
            format!(
                "taxable base {} does not match subtotal − discounts = {}",
                totals.taxable_base.amount(),
                expected_taxable
            ),
        ));
    }

    let tax_sum: Decimal = totals.tax_lines.iter().map(|l| l.amount.amount()).sum();
    if totals.tax_total.amount() != tax_sum {
        errors.push(ValidationError::new(
            "totals.tax_total",
            format!(
                "tax total {} does not match sum of tax lines {}",
                totals.tax_total.amount(),
                tax_sum
            ),
        ));
    }

    let expected_grand = totals.taxable_base.amount()
        + totals.tax_total.amount()
        + totals.shipping_total.amount();
    if totals.grand_total.amount() != expected_grand {
        errors.push(ValidationError::new(
            "totals.grand_total",
            format!(
                "grand total {} does not match taxable base + tax + shipping = {}",
                totals.grand_total.amount(),
                expected_grand
            ),
        ));
    }

    errors
}
