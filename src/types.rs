use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::money::Money;

/// Line-level discount: an absolute amount or a percentage of the base.
///
/// The source forms use both conventions (flat amounts on purchase
/// documents, percentages on sales bookings); both normalize to a derived
/// discount amount in [`LineItem::amounts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Absolute amount, same currency as the line's unit rate.
    Flat(Money),
    /// Percentage of the line base, in [0, 100].
    Percent(Decimal),
}

impl Discount {
    /// No discount (zero percent).
    pub fn none() -> Self {
        Self::Percent(Decimal::ZERO)
    }
}

/// One row of a ledger document: a quantity of a single priced unit.
///
/// Construction and every mutation validate the whole line, so an
/// in-memory `LineItem` always satisfies: quantity ≥ 1, unit rate ≥ 0,
/// discount within range and not exceeding the base amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    description: String,
    quantity: u32,
    unit_rate: Money,
    discount: Discount,
}

/// Derived amounts for one line. Never stored; recomputed from the line's
/// current fields. All values are lossless — callers round at display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineAmounts {
    /// `unit_rate × quantity`.
    pub base: Money,
    /// Flat amount, or `base × percent / 100`.
    pub discount: Money,
    /// `base − discount`; non-negative for every constructible line.
    pub net: Money,
}

impl LineItem {
    /// Create a validated line.
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        unit_rate: Money,
        discount: Discount,
    ) -> Result<Self, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        if unit_rate.is_negative() {
            return Err(LedgerError::InvalidUnitRate {
                rate: unit_rate.amount(),
            });
        }
        check_discount(discount, unit_rate, quantity)?;
        Ok(Self {
            description: description.into(),
            quantity,
            unit_rate,
            discount,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_rate(&self) -> Money {
        self.unit_rate
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    /// Pure derivation of the `(base, discount, net)` triple from the
    /// current fields. No side effects; callers cache the result.
    pub fn amounts(&self) -> LineAmounts {
        let base = self.unit_rate.times(self.quantity);
        let discount_amount = match self.discount {
            Discount::Flat(amount) => amount.amount(),
            Discount::Percent(percent) => base.percent_of(percent).amount(),
        };
        LineAmounts {
            base,
            discount: Money::new(discount_amount, base.currency()),
            net: Money::new(base.amount() - discount_amount, base.currency()),
        }
    }
}

/// Reject discounts that are out of range, negative, in the wrong
/// currency, or larger than the line base. Exceeding the base is rejected
/// rather than clamped so a saved document never carries a silently
/// adjusted figure.
fn check_discount(discount: Discount, unit_rate: Money, quantity: u32) -> Result<(), LedgerError> {
    match discount {
        Discount::Percent(percent) => {
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                return Err(LedgerError::InvalidDiscount {
                    reason: format!("percent discount must be between 0 and 100, got {percent}"),
                });
            }
        }
        Discount::Flat(amount) => {
            if amount.currency() != unit_rate.currency() {
                return Err(LedgerError::CurrencyMismatch {
                    expected: unit_rate.currency(),
                    actual: amount.currency(),
                });
            }
            if amount.is_negative() {
                return Err(LedgerError::InvalidDiscount {
                    reason: format!("flat discount must not be negative, got {}", amount.amount()),
                });
            }
            let base = unit_rate.times(quantity);
            if amount.amount() > base.amount() {
                return Err(LedgerError::InvalidDiscount {
                    reason: format!(
                        "flat discount {} exceeds line amount {}",
                        amount.amount(),
                        base.amount()
                    ),
                });
            }
        }
    }
    Ok(())
}

/// A named percentage-of-taxable-base tax component.
///
/// Immutable once attached to a document; rates are configuration inputs,
/// not constants, since the forms being consolidated used 9%, 14% and 28%
/// in different places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRule {
    name: String,
    rate_percent: Decimal,
}

impl TaxRule {
    /// Create a rule; the rate must be in [0, 100].
    pub fn new(name: impl Into<String>, rate_percent: Decimal) -> Result<Self, LedgerError> {
        if rate_percent < Decimal::ZERO || rate_percent > Decimal::ONE_HUNDRED {
            return Err(LedgerError::InvalidTaxRate { rate: rate_percent });
        }
        Ok(Self {
            name: name.into(),
            rate_percent,
        })
    }

    /// Intra-state GST: the total rate split into equal SGST and CGST
    /// halves, the recurring pattern on the source purchase forms.
    pub fn gst_split(total_rate: Decimal) -> Result<(Self, Self), LedgerError> {
        let half = total_rate / Decimal::TWO;
        Ok((Self::new("SGST", half)?, Self::new("CGST", half)?))
    }

    /// Inter-state GST: a single IGST component at the full rate.
    pub fn igst(rate: Decimal) -> Result<Self, LedgerError> {
        Self::new("IGST", rate)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate_percent(&self) -> Decimal {
        self.rate_percent
    }

    /// `base × rate / 100`, lossless. Rounded once at the totals boundary.
    pub fn apply(&self, base: Money) -> Money {
        base.percent_of(self.rate_percent)
    }
}

/// One computed tax component in a document's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAmount {
    /// Rule name (e.g. "SGST").
    pub name: String,
    /// Rule rate at computation time.
    pub rate_percent: Decimal,
    /// Tax amount, rounded to minor units.
    pub amount: Money,
}

/// The transactional record kinds that share this calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    PurchaseOrder,
    PurchaseInvoice,
    GoodsReceipt,
    SalesBooking,
    MeterBill,
}

impl DocumentKind {
    /// Number prefix used by [`crate::numbering::DocumentNumberSequence`].
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "PO",
            Self::PurchaseInvoice => "PI",
            Self::GoodsReceipt => "GRN",
            Self::SalesBooking => "BKG",
            Self::MeterBill => "MB",
        }
    }

    /// Human-readable name for validation messages and display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase order",
            Self::PurchaseInvoice => "purchase invoice",
            Self::GoodsReceipt => "goods receipt",
            Self::SalesBooking => "sales booking",
            Self::MeterBill => "meter bill",
        }
    }
}

/// Lifecycle of a ledger document.
///
/// Totals on a `Draft` are provisional and recomputed on every change.
/// `Finalized` locks the inputs; edits happen through a new revision.
/// `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Draft,
    Finalized,
    Cancelled,
}

impl DocumentStatus {
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

/// Document totals. Every component is rounded to minor units exactly
/// once, and `grand_total` is composed from the published components, so
/// `grand_total = taxable_base + tax_total + shipping_total` holds exactly
/// in minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line base amounts.
    pub subtotal: Money,
    /// Sum of line discount amounts.
    pub line_discount_total: Money,
    /// Document-level flat discount, applied after line discounts.
    pub document_discount: Money,
    /// `subtotal − line_discount_total − document_discount`. Provisionally
    /// negative drafts are representable; finalize rejects them.
    pub taxable_base: Money,
    /// Per-rule tax amounts on the taxable base.
    pub tax_lines: Vec<TaxAmount>,
    /// Sum of `tax_lines`.
    pub tax_total: Money,
    /// Shipping and other document-level charges.
    pub shipping_total: Money,
    /// `taxable_base + tax_total + shipping_total`.
    pub grand_total: Money,
}

impl Totals {
    /// All-zero totals for an empty draft.
    pub fn zero(currency: crate::currencies::Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            line_discount_total: zero,
            document_discount: zero,
            taxable_base: zero,
            tax_lines: Vec::new(),
            tax_total: zero,
            shipping_total: zero,
            grand_total: zero,
        }
    }
}
