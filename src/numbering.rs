use chrono::{Datelike, NaiveDate};

use crate::error::LedgerError;
use crate::types::DocumentKind;

/// Gapless document number sequence, one per document kind.
///
/// Numbers take the form `{prefix}-{year}-{sequential}`, e.g.
/// "PO-2024-001" or "GRN-2024-042". Every transactional record carries
/// such a number; sequences are year-scoped and never reused or skipped.
#[derive(Debug, Clone)]
pub struct DocumentNumberSequence {
    kind: DocumentKind,
    year: i32,
    next: u64,
    zero_pad: usize,
}

impl DocumentNumberSequence {
    /// Create a sequence starting at 1.
    pub fn new(kind: DocumentKind, year: i32) -> Self {
        Self {
            kind,
            year,
            next: 1,
            zero_pad: 3,
        }
    }

    /// Create a sequence continuing from a stored counter.
    pub fn starting_at(kind: DocumentKind, year: i32, next: u64) -> Self {
        Self {
            kind,
            year,
            next,
            zero_pad: 3,
        }
    }

    /// Set zero-padding width (default 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The counter value the next issued number will use.
    pub fn next_raw(&self) -> u64 {
        self.next
    }

    /// Issue the next number, consuming it.
    pub fn next_number(&mut self) -> String {
        let number = self.format(self.next);
        self.next += 1;
        number
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next)
    }

    /// Move to a later year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), LedgerError> {
        if new_year <= self.year {
            return Err(LedgerError::Numbering(format!(
                "new year {new_year} must be greater than current year {}",
                self.year
            )));
        }
        self.year = new_year;
        self.next = 1;
        Ok(())
    }

    /// Advance the year automatically when `date` falls in a later one.
    /// Returns true if the sequence rolled over.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        if date.year() > self.year {
            self.year = date.year();
            self.next = 1;
            true
        } else {
            false
        }
    }

    fn format(&self, number: u64) -> String {
        format!(
            "{}-{}-{:0>width$}",
            self.kind.prefix(),
            self.year,
            number,
            width = self.zero_pad
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering_per_kind() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::PurchaseOrder, 2024);
        assert_eq!(seq.next_number(), "PO-2024-001");
        assert_eq!(seq.next_number(), "PO-2024-002");

        let mut grn = DocumentNumberSequence::new(DocumentKind::GoodsReceipt, 2024);
        assert_eq!(grn.next_number(), "GRN-2024-001");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::SalesBooking, 2024);
        assert_eq!(seq.peek(), "BKG-2024-001");
        assert_eq!(seq.peek(), "BKG-2024-001");
        assert_eq!(seq.next_number(), "BKG-2024-001");
        assert_eq!(seq.peek(), "BKG-2024-002");
    }

    #[test]
    fn starting_at_continues_stored_counter() {
        let mut seq = DocumentNumberSequence::starting_at(DocumentKind::MeterBill, 2024, 42);
        assert_eq!(seq.next_number(), "MB-2024-042");
        assert_eq!(seq.next_number(), "MB-2024-043");
    }

    #[test]
    fn custom_padding() {
        let mut seq =
            DocumentNumberSequence::new(DocumentKind::PurchaseInvoice, 2024).with_padding(5);
        assert_eq!(seq.next_number(), "PI-2024-00001");
    }

    #[test]
    fn year_advance_resets_counter() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::PurchaseOrder, 2024);
        seq.next_number();
        seq.next_number();
        seq.advance_year(2025).unwrap();
        assert_eq!(seq.next_number(), "PO-2025-001");
    }

    #[test]
    fn year_advance_rejects_past() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::PurchaseOrder, 2024);
        assert!(seq.advance_year(2023).is_err());
        assert!(seq.advance_year(2024).is_err());
    }

    #[test]
    fn auto_advance_rolls_over_once() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::PurchaseOrder, 2024);
        seq.next_number();

        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(seq.auto_advance(jan));
        assert_eq!(seq.next_number(), "PO-2025-001");

        let feb = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(!seq.auto_advance(feb));
        assert_eq!(seq.next_number(), "PO-2025-002");
    }
}
