//! ISO 4217 currencies used by dealership ledger documents.
//!
//! The source records are denominated in INR; the remaining codes cover
//! import purchase orders and the occasional foreign-currency insurance
//! policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency with its minor-unit exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee.
    Inr,
    /// UAE Dirham.
    Aed,
    /// Australian Dollar.
    Aud,
    /// Swiss Franc.
    Chf,
    /// Euro.
    Eur,
    /// Pound Sterling.
    Gbp,
    /// Japanese Yen (no minor unit).
    Jpy,
    /// Singapore Dollar.
    Sgd,
    /// US Dollar.
    Usd,
}

impl Currency {
    /// Every supported currency, sorted by ISO code.
    pub const ALL: &'static [Currency] = &[
        Self::Aed,
        Self::Aud,
        Self::Chf,
        Self::Eur,
        Self::Gbp,
        Self::Inr,
        Self::Jpy,
        Self::Sgd,
        Self::Usd,
    ];

    /// ISO 4217 alphabetic code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Aed => "AED",
            Self::Aud => "AUD",
            Self::Chf => "CHF",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Sgd => "SGD",
            Self::Usd => "USD",
        }
    }

    /// Parse from an ISO 4217 alphabetic code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INR" => Some(Self::Inr),
            "AED" => Some(Self::Aed),
            "AUD" => Some(Self::Aud),
            "CHF" => Some(Self::Chf),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            "JPY" => Some(Self::Jpy),
            "SGD" => Some(Self::Sgd),
            "USD" => Some(Self::Usd),
            _ => None,
        }
    }

    /// Number of minor-unit decimal places (ISO 4217 exponent).
    pub fn minor_units(&self) -> u32 {
        match self {
            Self::Jpy => 0,
            _ => 2,
        }
    }

    /// Display symbol used by [`crate::money::Money::format`].
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Aed => "د.إ",
            Self::Aud => "A$",
            Self::Chf => "CHF ",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
            Self::Sgd => "S$",
            Self::Usd => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Check whether `code` is a supported ISO 4217 alphabetic code.
pub fn is_known_currency_code(code: &str) -> bool {
    Currency::from_code(code).is_some()
}
