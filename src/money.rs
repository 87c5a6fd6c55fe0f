//! Monetary values with explicit currency and boundary-only rounding.
//!
//! All arithmetic is carried out losslessly on [`rust_decimal::Decimal`];
//! a value is rounded to its currency's minor units exactly once, at the
//! point where it becomes a published figure (a per-line amount, a totals
//! component, a formatted string). Intermediate rounding is never applied,
//! so chained percentages cannot accumulate drift.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::currencies::Currency;
use crate::error::LedgerError;

/// Rounding applied when a value is published.
///
/// The dealership forms use commercial (half-up) rounding throughout;
/// half-even is offered for hosts reconciling against bank statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round half away from zero (commercial rounding). The default.
    HalfUp,
    /// Round half to even (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Digit-grouping convention for [`Money::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Indian grouping: last three digits, then pairs (`12,34,567.89`).
    EnIn,
    /// Western grouping: triplets (`1,234,567.89`).
    EnUs,
}

/// A signed monetary amount in a declared currency.
///
/// Stored losslessly; see the module docs for the rounding discipline.
/// Cross-currency arithmetic is a hard error — use [`Money::checked_add`]
/// and [`Money::checked_sub`] on any path where both operands are not
/// already known to share a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Create a value. The amount is stored as given, not rounded.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a value from integer minor units (paise, cents, …).
    pub fn from_minor(minor: i64, currency: Currency) -> Self {
        Self {
            amount: Decimal::new(minor, currency.minor_units()),
            currency,
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// The unrounded amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The declared currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    /// Addition that fails with [`LedgerError::CurrencyMismatch`] instead
    /// of panicking when currencies differ.
    pub fn checked_add(&self, other: &Money) -> Result<Money, LedgerError> {
        self.require_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Subtraction that fails with [`LedgerError::CurrencyMismatch`]
    /// instead of panicking when currencies differ.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, LedgerError> {
        self.require_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Multiply by a scalar, losslessly.
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Multiply by a unit count, losslessly.
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency)
    }

    /// `percent`% of this value, losslessly. Rounding is deferred to the
    /// caller's publication boundary.
    pub fn percent_of(&self, percent: Decimal) -> Self {
        Self::new(self.amount * percent / Decimal::ONE_HUNDRED, self.currency)
    }

    /// Round to the currency's minor units. Idempotent.
    pub fn round(&self, mode: RoundingMode) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(self.currency.minor_units(), mode.strategy()),
            currency: self.currency,
        }
    }

    /// Round half-up to the currency's minor units — the convention of the
    /// source forms.
    pub fn rounded(&self) -> Self {
        self.round(RoundingMode::HalfUp)
    }

    /// Value in integer minor units, after half-up rounding.
    pub fn minor(&self) -> i64 {
        let scale = Decimal::from(10i64.pow(self.currency.minor_units()));
        (self.rounded().amount * scale).to_i64().unwrap_or_default()
    }

    /// Presentation-only formatting: currency symbol plus locale-grouped
    /// digits. Does not affect the stored precision.
    pub fn format(&self, locale: Locale) -> String {
        let dp = self.currency.minor_units() as usize;
        let rounded = self.rounded();
        let plain = format!("{:.*}", dp, rounded.amount.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };
        let grouped = match locale {
            Locale::EnIn => group_indian(int_part),
            Locale::EnUs => group_western(int_part),
        };
        let sign = if rounded.amount.is_sign_negative() && !rounded.amount.is_zero() {
            "-"
        } else {
            ""
        };
        match frac_part {
            Some(frac) => format!("{sign}{}{grouped}.{frac}", self.currency.symbol()),
            None => format!("{sign}{}{grouped}", self.currency.symbol()),
        }
    }

    fn require_same_currency(&self, other: &Money) -> Result<(), LedgerError> {
        if self.currency != other.currency {
            return Err(LedgerError::CurrencyMismatch {
                expected: self.currency,
                actual: other.currency,
            });
        }
        Ok(())
    }
}

/// Group digits in Indian style: last three, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Group digits in western style: triplets.
fn group_western(digits: &str) -> String {
    let mut groups = Vec::new();
    let mut end = digits.len();
    while end > 3 {
        groups.push(&digits[end - 3..end]);
        end -= 3;
    }
    groups.push(&digits[..end]);
    groups.reverse();
    groups.join(",")
}

/// Debug-oriented display: symbol plus half-up amount, no grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.minor_units() as usize;
        let rounded = self.rounded();
        if rounded.amount.is_sign_negative() && !rounded.amount.is_zero() {
            write!(f, "-{}{:.*}", self.currency.symbol(), dp, rounded.amount.abs())
        } else {
            write!(f, "{}{:.*}", self.currency.symbol(), dp, rounded.amount)
        }
    }
}

/// Panics if currencies differ. Ledger code validates currency once at the
/// document boundary, then uses operators internally; external callers
/// combining arbitrary values should prefer [`Money::checked_add`].
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("currency mismatch in Money::add")
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Panics if currencies differ; see [`Add`].
impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("currency mismatch in Money::sub")
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}
