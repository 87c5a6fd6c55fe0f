//! # hisab
//!
//! Line-item ledger calculator for dealership back-office documents:
//! purchase orders, purchase invoices, goods receipts, sales bookings and
//! meter bills. The back-office forms each re-derived the same
//! tax/discount arithmetic with different rates and rounding; this crate
//! consolidates it into one parameterized model.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Arithmetic stays lossless; each published figure is rounded
//! half-up to the currency's minor units exactly once, so the grand-total
//! identity `grand = taxable base + taxes + shipping` holds to the paisa.
//!
//! Every mutation recomputes the document totals synchronously before it
//! returns: a form reading totals after an edit never sees stale figures.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hisab::*;
//! use rust_decimal_macros::dec;
//!
//! let mut doc = LedgerDocument::new(
//!     DocumentKind::SalesBooking,
//!     "BKG-2024-017",
//!     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
//!     Currency::Inr,
//! );
//!
//! let line = LineItemBuilder::new("Registration charges", 2, Money::new(dec!(1000), Currency::Inr))
//!     .discount_percent(dec!(10))
//!     .build()
//!     .unwrap();
//! doc.add_line(line).unwrap();
//!
//! let (sgst, cgst) = TaxRule::gst_split(dec!(28)).unwrap();
//! doc.add_tax_rule(sgst).unwrap();
//! doc.add_tax_rule(cgst).unwrap();
//!
//! assert_eq!(doc.totals().taxable_base.amount(), dec!(1800.00));
//! assert_eq!(doc.totals().grand_total.amount(), dec!(2304.00));
//!
//! doc.finalize(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()).unwrap();
//! assert_eq!(doc.status(), DocumentStatus::Finalized);
//! ```

mod builder;
mod currencies;
mod document;
mod error;
mod money;
mod numbering;
mod types;
mod validation;

pub use builder::*;
pub use currencies::{Currency, is_known_currency_code};
pub use document::*;
pub use error::*;
pub use money::*;
pub use numbering::*;
pub use types::*;
pub use validation::{validate_arithmetic, validate_document};
