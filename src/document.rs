use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currencies::Currency;
use crate::error::{LedgerError, ValidationError};
use crate::money::Money;
use crate::types::{
    Discount, DocumentKind, DocumentStatus, LineItem, TaxAmount, TaxRule, Totals,
};
use crate::validation;

/// A transactional ledger document: ordered line items plus document-level
/// adjustments and the tax rules that apply to the taxable base.
///
/// Every mutating operation re-derives [`Totals`] synchronously before
/// returning, so a caller that reads [`LedgerDocument::totals`] after a
/// mutation completes always sees figures consistent with the current
/// inputs. There is no deferred or batched recomputation. The struct holds
/// plain data and takes no locks; hosts sharing one instance across
/// threads must serialize access themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    kind: DocumentKind,
    number: String,
    issue_date: NaiveDate,
    currency: Currency,
    lines: Vec<LineItem>,
    document_discount: Money,
    shipping: Money,
    tax_rules: Vec<TaxRule>,
    status: DocumentStatus,
    revision: u32,
    finalized_on: Option<NaiveDate>,
    totals: Totals,
}

impl LedgerDocument {
    /// Open a new empty draft, as a form does when a record is created.
    pub fn new(
        kind: DocumentKind,
        number: impl Into<String>,
        issue_date: NaiveDate,
        currency: Currency,
    ) -> Self {
        Self {
            kind,
            number: number.into(),
            issue_date,
            currency,
            lines: Vec::new(),
            document_discount: Money::zero(currency),
            shipping: Money::zero(currency),
            tax_rules: Vec::new(),
            status: DocumentStatus::Draft,
            revision: 1,
            finalized_on: None,
            totals: Totals::zero(currency),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn document_discount(&self) -> Money {
        self.document_discount
    }

    pub fn shipping(&self) -> Money {
        self.shipping
    }

    pub fn tax_rules(&self) -> &[TaxRule] {
        &self.tax_rules
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    /// Revision counter; starts at 1 and increments on [`Self::revise`].
    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn finalized_on(&self) -> Option<NaiveDate> {
        self.finalized_on
    }

    /// The current totals. Always consistent with the inputs — every
    /// mutator recomputes before returning.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Append a line. Fails on a locked document or a currency mismatch.
    pub fn add_line(&mut self, line: LineItem) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        self.check_currency(line.unit_rate())?;
        self.lines.push(line);
        self.recompute();
        Ok(())
    }

    /// Remove and return the line at `index`. Removing the last line is
    /// permitted while drafting; [`Self::finalize`] rejects an empty
    /// document.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, LedgerError> {
        self.ensure_editable()?;
        self.check_index(index)?;
        let line = self.lines.remove(index);
        self.recompute();
        Ok(line)
    }

    /// Replace the line at `index` wholesale.
    pub fn replace_line(&mut self, index: usize, line: LineItem) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        self.check_index(index)?;
        self.check_currency(line.unit_rate())?;
        self.lines[index] = line;
        self.recompute();
        Ok(())
    }

    /// Change one line's quantity. Re-validates the whole line, so a
    /// quantity drop that would leave an existing flat discount above the
    /// new base amount is rejected rather than producing a negative net.
    pub fn set_line_quantity(&mut self, index: usize, quantity: u32) -> Result<(), LedgerError> {
        self.rebuild_line(index, |line| {
            LineItem::new(line.description(), quantity, line.unit_rate(), line.discount())
        })
    }

    /// Change one line's unit rate.
    pub fn set_line_unit_rate(&mut self, index: usize, unit_rate: Money) -> Result<(), LedgerError> {
        self.check_currency(unit_rate)?;
        self.rebuild_line(index, |line| {
            LineItem::new(line.description(), line.quantity(), unit_rate, line.discount())
        })
    }

    /// Change one line's discount.
    pub fn set_line_discount(&mut self, index: usize, discount: Discount) -> Result<(), LedgerError> {
        self.rebuild_line(index, |line| {
            LineItem::new(line.description(), line.quantity(), line.unit_rate(), discount)
        })
    }

    /// Set the document-level flat discount, applied after line discounts
    /// and before tax.
    pub fn set_document_discount(&mut self, discount: Money) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        self.check_currency(discount)?;
        if discount.is_negative() {
            return Err(LedgerError::InvalidDiscount {
                reason: format!(
                    "document discount must not be negative, got {}",
                    discount.amount()
                ),
            });
        }
        self.document_discount = discount;
        self.recompute();
        Ok(())
    }

    /// Set shipping and other document-level charges.
    pub fn set_shipping(&mut self, shipping: Money) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        self.check_currency(shipping)?;
        if shipping.is_negative() {
            return Err(LedgerError::InvalidCharge {
                reason: format!("shipping must not be negative, got {}", shipping.amount()),
            });
        }
        self.shipping = shipping;
        self.recompute();
        Ok(())
    }

    /// Attach a tax rule. Rules are applied additively to the taxable base.
    pub fn add_tax_rule(&mut self, rule: TaxRule) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        self.tax_rules.push(rule);
        self.recompute();
        Ok(())
    }

    /// Detach every tax rule.
    pub fn clear_tax_rules(&mut self) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        self.tax_rules.clear();
        self.recompute();
        Ok(())
    }

    /// Re-derive the totals from the current inputs. Idempotent, never
    /// fails: a draft mid-edit may have discounts exceeding its subtotal,
    /// which shows up as a negative taxable base until corrected.
    ///
    /// Mutators call this internally; it is public for hosts that
    /// deserialize a stored document and need the cached totals refreshed.
    pub fn recompute(&mut self) {
        let zero = Money::zero(self.currency);

        let mut gross = rust_decimal::Decimal::ZERO;
        let mut discounts = rust_decimal::Decimal::ZERO;
        for line in &self.lines {
            let amounts = line.amounts();
            gross += amounts.base.amount();
            discounts += amounts.discount.amount();
        }

        // Each published component is rounded exactly once; everything
        // after this point composes the published figures, keeping the
        // grand-total identity exact in minor units.
        let subtotal = Money::new(gross, self.currency).rounded();
        let line_discount_total = Money::new(discounts, self.currency).rounded();
        let document_discount = self.document_discount.rounded();
        let shipping_total = self.shipping.rounded();

        let taxable_base = subtotal - line_discount_total - document_discount;

        let mut tax_total = zero;
        let tax_lines: Vec<TaxAmount> = self
            .tax_rules
            .iter()
            .map(|rule| {
                let amount = rule.apply(taxable_base).rounded();
                tax_total += amount;
                TaxAmount {
                    name: rule.name().to_string(),
                    rate_percent: rule.rate_percent(),
                    amount,
                }
            })
            .collect();

        self.totals = Totals {
            subtotal,
            line_discount_total,
            document_discount,
            taxable_base,
            tax_lines,
            tax_total,
            shipping_total,
            grand_total: taxable_base + tax_total + shipping_total,
        };
    }

    /// Lock the document: Draft → Finalized.
    ///
    /// Fails with [`LedgerError::EmptyDocument`] when there are no lines
    /// and [`LedgerError::NegativeTaxableBase`] when discounts exceed the
    /// subtotal. The hosting form surfaces either as a blocking message.
    pub fn finalize(&mut self, on: NaiveDate) -> Result<(), LedgerError> {
        if self.status != DocumentStatus::Draft {
            return Err(LedgerError::DocumentFinalized);
        }
        if self.lines.is_empty() {
            return Err(LedgerError::EmptyDocument);
        }
        self.recompute();
        if self.totals.taxable_base.is_negative() {
            return Err(LedgerError::NegativeTaxableBase {
                base: self.totals.taxable_base.amount(),
            });
        }
        self.status = DocumentStatus::Finalized;
        self.finalized_on = Some(on);
        Ok(())
    }

    /// Cancel a draft or finalized document. Terminal.
    pub fn cancel(&mut self) -> Result<(), LedgerError> {
        if self.status == DocumentStatus::Cancelled {
            return Err(LedgerError::DocumentFinalized);
        }
        self.status = DocumentStatus::Cancelled;
        Ok(())
    }

    /// Start a new editable revision of a finalized document. The
    /// finalized instance is left untouched so the audit trail survives;
    /// the returned draft carries the next revision number.
    pub fn revise(&self) -> Result<LedgerDocument, LedgerError> {
        if self.status != DocumentStatus::Finalized {
            return Err(LedgerError::NotFinalized);
        }
        let mut revision = self.clone();
        revision.status = DocumentStatus::Draft;
        revision.revision = self.revision + 1;
        revision.finalized_on = None;
        Ok(revision)
    }

    /// Every outstanding validation condition, with field paths, for the
    /// hosting form's blocking messages. Empty means finalizable.
    pub fn validate(&self) -> Vec<ValidationError> {
        validation::validate_document(self)
    }

    fn rebuild_line<F>(&mut self, index: usize, build: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&LineItem) -> Result<LineItem, LedgerError>,
    {
        self.ensure_editable()?;
        self.check_index(index)?;
        let updated = build(&self.lines[index])?;
        self.lines[index] = updated;
        self.recompute();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), LedgerError> {
        if !self.status.is_editable() {
            return Err(LedgerError::DocumentFinalized);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), LedgerError> {
        if index >= self.lines.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    fn check_currency(&self, money: Money) -> Result<(), LedgerError> {
        if money.currency() != self.currency {
            return Err(LedgerError::CurrencyMismatch {
                expected: self.currency,
                actual: money.currency(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::Inr)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> LedgerDocument {
        LedgerDocument::new(
            DocumentKind::PurchaseInvoice,
            "PI-2024-001",
            date(2024, 6, 15),
            Currency::Inr,
        )
    }

    fn line(rate: Decimal, quantity: u32) -> LineItem {
        LineItem::new("part", quantity, inr(rate), Discount::none()).unwrap()
    }

    #[test]
    fn totals_follow_every_mutation() {
        let mut doc = draft();
        assert!(doc.totals().grand_total.is_zero());

        doc.add_line(line(dec!(1000), 2)).unwrap();
        assert_eq!(doc.totals().subtotal.amount(), dec!(2000));
        assert_eq!(doc.totals().grand_total.amount(), dec!(2000));

        doc.set_line_quantity(0, 3).unwrap();
        assert_eq!(doc.totals().grand_total.amount(), dec!(3000));

        doc.set_line_unit_rate(0, inr(dec!(500))).unwrap();
        assert_eq!(doc.totals().grand_total.amount(), dec!(1500));

        doc.set_line_discount(0, Discount::Percent(dec!(10))).unwrap();
        assert_eq!(doc.totals().line_discount_total.amount(), dec!(150));
        assert_eq!(doc.totals().grand_total.amount(), dec!(1350));

        doc.remove_line(0).unwrap();
        assert!(doc.totals().grand_total.is_zero());
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut doc = draft();
        doc.add_line(line(dec!(999.99), 7)).unwrap();
        doc.add_tax_rule(TaxRule::igst(dec!(28)).unwrap()).unwrap();
        let first = doc.totals().clone();
        doc.recompute();
        assert_eq!(*doc.totals(), first);
    }

    #[test]
    fn quantity_drop_under_flat_discount_rejected() {
        let mut doc = draft();
        doc.add_line(
            LineItem::new("kit", 4, inr(dec!(100)), Discount::Flat(inr(dec!(350)))).unwrap(),
        )
        .unwrap();

        // 3 × 100 = 300 < 350 flat discount.
        let err = doc.set_line_quantity(0, 3).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDiscount { .. }));
        // Rejected edit leaves the document untouched.
        assert_eq!(doc.lines()[0].quantity(), 4);
        assert_eq!(doc.totals().line_discount_total.amount(), dec!(350));
    }

    #[test]
    fn finalize_locks_document() {
        let mut doc = draft();
        doc.add_line(line(dec!(100), 1)).unwrap();
        doc.finalize(date(2024, 6, 20)).unwrap();

        assert_eq!(doc.status(), DocumentStatus::Finalized);
        assert_eq!(doc.finalized_on(), Some(date(2024, 6, 20)));
        assert_eq!(doc.add_line(line(dec!(1), 1)).unwrap_err(), LedgerError::DocumentFinalized);
        assert_eq!(doc.remove_line(0).unwrap_err(), LedgerError::DocumentFinalized);
        assert_eq!(doc.finalize(date(2024, 6, 21)).unwrap_err(), LedgerError::DocumentFinalized);
    }

    #[test]
    fn revise_creates_next_draft() {
        let mut doc = draft();
        doc.add_line(line(dec!(100), 1)).unwrap();
        doc.finalize(date(2024, 6, 20)).unwrap();

        let mut next = doc.revise().unwrap();
        assert_eq!(next.revision(), 2);
        assert_eq!(next.status(), DocumentStatus::Draft);
        assert_eq!(next.finalized_on(), None);
        next.add_line(line(dec!(50), 2)).unwrap();

        // The finalized original is untouched.
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.status(), DocumentStatus::Finalized);
    }

    #[test]
    fn revise_requires_finalized() {
        let doc = draft();
        assert_eq!(doc.revise().unwrap_err(), LedgerError::NotFinalized);
    }

    #[test]
    fn cancel_is_terminal() {
        let mut doc = draft();
        doc.cancel().unwrap();
        assert_eq!(doc.status(), DocumentStatus::Cancelled);
        assert_eq!(doc.cancel().unwrap_err(), LedgerError::DocumentFinalized);
        assert_eq!(
            doc.add_line(line(dec!(1), 1)).unwrap_err(),
            LedgerError::DocumentFinalized
        );
    }

    #[test]
    fn foreign_currency_line_rejected() {
        let mut doc = draft();
        let usd_line =
            LineItem::new("import", 1, Money::new(dec!(10), Currency::Usd), Discount::none())
                .unwrap();
        assert!(matches!(
            doc.add_line(usd_line).unwrap_err(),
            LedgerError::CurrencyMismatch { .. }
        ));
    }

    #[test]
    fn out_of_range_index_reported() {
        let mut doc = draft();
        assert_eq!(
            doc.remove_line(0).unwrap_err(),
            LedgerError::IndexOutOfRange { index: 0, len: 0 }
        );
    }
}
