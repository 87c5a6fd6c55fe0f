//! Property-based tests for the ledger arithmetic.
//!
//! Run with: `cargo test --test proptest_tests`

use chrono::NaiveDate;
use hisab::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn inr(amount: Decimal) -> Money {
    Money::new(amount, Currency::Inr)
}

// ── Strategies ──────────────────────────────────────────────────────────

/// A unit rate between ₹0.01 and ₹99,999.99.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|paise| Decimal::new(paise as i64, 2))
}

/// A quantity between 1 and 100.
fn arb_quantity() -> impl Strategy<Value = u32> {
    1u32..=100u32
}

/// A percent discount in [0, 100] with two decimal places.
fn arb_percent() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|basis_points| Decimal::new(basis_points as i64, 2))
}

/// A GST rate from the set the source forms actually used.
fn arb_gst_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(0)),
        Just(dec!(9)),
        Just(dec!(14)),
        Just(dec!(18)),
        Just(dec!(28)),
    ]
}

fn arb_line() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_rate(), arb_percent()).prop_map(|(quantity, rate, percent)| {
        LineItemBuilder::new("item", quantity, inr(rate))
            .discount_percent(percent)
            .build()
            .unwrap()
    })
}

fn build_document(lines: Vec<LineItem>, rates: Vec<Decimal>, shipping: Decimal) -> LedgerDocument {
    let mut builder = DocumentBuilder::new(
        DocumentKind::PurchaseInvoice,
        "PI-2024-PROP",
        date(),
        Currency::Inr,
    )
    .shipping(inr(shipping));
    for line in lines {
        builder = builder.line(line);
    }
    for (i, rate) in rates.into_iter().enumerate() {
        builder = builder.tax_rule(TaxRule::new(format!("TAX{i}"), rate).unwrap());
    }
    builder.build().unwrap()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    /// net = base − discount, and never negative.
    #[test]
    fn line_net_is_base_minus_discount(
        quantity in arb_quantity(),
        rate in arb_rate(),
        percent in arb_percent(),
    ) {
        let line = LineItemBuilder::new("item", quantity, inr(rate))
            .discount_percent(percent)
            .build()
            .unwrap();
        let amounts = line.amounts();
        prop_assert_eq!(
            amounts.net.amount(),
            amounts.base.amount() - amounts.discount.amount()
        );
        prop_assert!(!amounts.net.is_negative());
    }

    /// A flat discount up to the base is accepted; a paisa over is not.
    #[test]
    fn flat_discount_boundary(
        quantity in arb_quantity(),
        rate in arb_rate(),
    ) {
        let base = inr(rate).times(quantity);

        let at_base = LineItemBuilder::new("item", quantity, inr(rate))
            .discount_flat(base)
            .build();
        prop_assert!(at_base.is_ok());
        prop_assert!(at_base.unwrap().amounts().net.is_zero());

        let over = base.checked_add(&Money::from_minor(1, Currency::Inr)).unwrap();
        let rejected = LineItemBuilder::new("item", quantity, inr(rate))
            .discount_flat(over)
            .build();
        prop_assert!(
            matches!(rejected, Err(LedgerError::InvalidDiscount { .. })),
            "expected InvalidDiscount error"
        );
    }

    /// The published totals compose exactly in minor units.
    #[test]
    fn grand_total_identity_in_minor_units(
        lines in proptest::collection::vec(arb_line(), 1..8),
        rates in proptest::collection::vec(arb_gst_rate(), 0..3),
        shipping_paise in 0i64..100_000i64,
    ) {
        let doc = build_document(lines, rates, Decimal::new(shipping_paise, 2));
        let totals = doc.totals();

        let tax_minor: i64 = totals.tax_lines.iter().map(|l| l.amount.minor()).sum();
        prop_assert_eq!(totals.tax_total.minor(), tax_minor);
        prop_assert_eq!(
            totals.grand_total.minor(),
            totals.taxable_base.minor() + totals.tax_total.minor()
                + totals.shipping_total.minor()
        );
        prop_assert_eq!(
            totals.taxable_base.minor(),
            totals.subtotal.minor() - totals.line_discount_total.minor()
                - totals.document_discount.minor()
        );
    }

    /// recompute() twice without an intervening mutation changes nothing.
    #[test]
    fn recompute_is_idempotent(
        lines in proptest::collection::vec(arb_line(), 1..8),
        rates in proptest::collection::vec(arb_gst_rate(), 0..3),
    ) {
        let mut doc = build_document(lines, rates, dec!(0));
        let first = doc.totals().clone();
        doc.recompute();
        prop_assert_eq!(doc.totals(), &first);
        doc.recompute();
        prop_assert_eq!(doc.totals(), &first);
    }

    /// Rounding a rounded value is a no-op, for both modes.
    #[test]
    fn rounding_is_idempotent(paise in -10_000_000i64..10_000_000i64, extra in 0u32..999u32) {
        // Compose a value with sub-minor digits.
        let raw = Decimal::new(paise, 2) + Decimal::new(extra as i64, 5);
        for mode in [RoundingMode::HalfUp, RoundingMode::HalfEven] {
            let once = inr(raw).round(mode);
            prop_assert_eq!(once.round(mode), once);
        }
    }

    /// Drafts whose discounts swallow the subtotal never finalize.
    #[test]
    fn negative_taxable_base_never_finalizes(
        quantity in arb_quantity(),
        rate in arb_rate(),
        excess_paise in 1i64..100_000i64,
    ) {
        let mut doc = LedgerDocument::new(
            DocumentKind::SalesBooking,
            "BKG-2024-PROP",
            date(),
            Currency::Inr,
        );
        doc.add_line(
            LineItemBuilder::new("item", quantity, inr(rate)).build().unwrap(),
        ).unwrap();

        let subtotal = doc.totals().subtotal;
        let discount = subtotal
            .checked_add(&Money::from_minor(excess_paise, Currency::Inr))
            .unwrap();
        doc.set_document_discount(discount).unwrap();

        let result = doc.finalize(date());
        prop_assert!(
            matches!(result, Err(LedgerError::NegativeTaxableBase { .. })),
            "expected NegativeTaxableBase error"
        );
        prop_assert_eq!(doc.status(), DocumentStatus::Draft);
    }
}
