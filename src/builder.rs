use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::currencies::Currency;
use crate::document::LedgerDocument;
use crate::error::LedgerError;
use crate::money::Money;
use crate::types::{Discount, DocumentKind, LineItem, TaxRule};

/// Builder for a populated ledger document.
///
/// ```
/// use chrono::NaiveDate;
/// use hisab::*;
/// use rust_decimal_macros::dec;
///
/// let (sgst, cgst) = TaxRule::gst_split(dec!(28)).unwrap();
/// let doc = DocumentBuilder::new(
///     DocumentKind::SalesBooking,
///     "BKG-2024-017",
///     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
///     Currency::Inr,
/// )
/// .line(
///     LineItemBuilder::new("Registration charges", 2, Money::new(dec!(1000), Currency::Inr))
///         .discount_percent(dec!(10))
///         .build()
///         .unwrap(),
/// )
/// .tax_rule(sgst)
/// .tax_rule(cgst)
/// .build()
/// .unwrap();
///
/// assert_eq!(doc.totals().grand_total.amount(), dec!(2304.00));
/// ```
pub struct DocumentBuilder {
    kind: DocumentKind,
    number: String,
    issue_date: NaiveDate,
    currency: Currency,
    lines: Vec<LineItem>,
    document_discount: Option<Money>,
    shipping: Option<Money>,
    tax_rules: Vec<TaxRule>,
}

impl DocumentBuilder {
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
            document_discount: None,
            shipping: None,
            tax_rules: Vec::new(),
        }
    }

    pub fn line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn document_discount(mut self, discount: Money) -> Self {
        self.document_discount = Some(discount);
        self
    }

    pub fn shipping(mut self, shipping: Money) -> Self {
        self.shipping = Some(shipping);
        self
    }

    pub fn tax_rule(mut self, rule: TaxRule) -> Self {
        self.tax_rules.push(rule);
        self
    }

    /// Assemble the document. Requires at least one line item; every line
    /// and adjustment goes through the same checks as the incremental
    /// mutators, so the result is a valid draft with current totals.
    pub fn build(self) -> Result<LedgerDocument, LedgerError> {
        if self.lines.is_empty() {
            return Err(LedgerError::EmptyDocument);
        }

        let mut doc =
            LedgerDocument::new(self.kind, self.number, self.issue_date, self.currency);
        for line in self.lines {
            doc.add_line(line)?;
        }
        if let Some(discount) = self.document_discount {
            doc.set_document_discount(discount)?;
        }
        if let Some(shipping) = self.shipping {
            doc.set_shipping(shipping)?;
        }
        for rule in self.tax_rules {
            doc.add_tax_rule(rule)?;
        }
        Ok(doc)
    }
}

/// Builder for a single line item.
pub struct LineItemBuilder {
    description: String,
    quantity: u32,
    unit_rate: Money,
    discount: Discount,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, quantity: u32, unit_rate: Money) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_rate,
            discount: Discount::none(),
        }
    }

    pub fn discount_percent(mut self, percent: Decimal) -> Self {
        self.discount = Discount::Percent(percent);
        self
    }

    pub fn discount_flat(mut self, amount: Money) -> Self {
        self.discount = Discount::Flat(amount);
        self
    }

    pub fn build(self) -> Result<LineItem, LedgerError> {
        LineItem::new(self.description, self.quantity, self.unit_rate, self.discount)
    }
}
