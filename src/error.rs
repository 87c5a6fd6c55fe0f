use rust_decimal::Decimal;
use thiserror::Error;

use crate::currencies::Currency;

/// Errors raised by document construction and mutation.
///
/// All failures are synchronous and deterministic — they describe invalid
/// user input, not transient faults, so there is nothing to retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerError {
    /// Line quantity was zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Line unit rate was negative.
    #[error("unit rate must not be negative, got {rate}")]
    InvalidUnitRate { rate: Decimal },

    /// Discount out of range, negative, or exceeding the line base amount.
    #[error("invalid discount: {reason}")]
    InvalidDiscount { reason: String },

    /// Shipping or other document-level charge was negative.
    #[error("invalid charge: {reason}")]
    InvalidCharge { reason: String },

    /// Tax rate outside [0, 100].
    #[error("tax rate must be between 0 and 100, got {rate}")]
    InvalidTaxRate { rate: Decimal },

    /// Arithmetic attempted across two currencies.
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        expected: Currency,
        actual: Currency,
    },

    /// Finalize attempted on a document with no line items.
    #[error("document must have at least one line item")]
    EmptyDocument,

    /// Discounts exceed the subtotal; the document cannot be finalized.
    #[error("discounts exceed subtotal: taxable base would be {base}")]
    NegativeTaxableBase { base: Decimal },

    /// Mutation attempted on a finalized or cancelled document.
    #[error("document is locked and can no longer be edited")]
    DocumentFinalized,

    /// Revision requested for a document that is not finalized.
    #[error("only a finalized document can be revised")]
    NotFinalized,

    /// Line index outside the document's line sequence.
    #[error("line index {index} out of range ({len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Document number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),
}

/// A single outstanding validation condition with a field path and message.
///
/// [`crate::validation::validate_document`] returns every condition found,
/// not just the first, so the hosting form can display them all and block
/// finalization until the list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot/index path to the offending field (e.g. `lines[2].discount`).
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
