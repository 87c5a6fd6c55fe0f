use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use hisab::*;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn build_document(lines: usize) -> LedgerDocument {
    let mut builder = DocumentBuilder::new(
        DocumentKind::PurchaseInvoice,
        "PI-2024-BENCH",
        test_date(),
        Currency::Inr,
    )
    .shipping(Money::new(dec!(350), Currency::Inr));

    for i in 1..=lines {
        builder = builder.line(
            LineItemBuilder::new(
                format!("Part {i}"),
                (i % 7 + 1) as u32,
                Money::new(dec!(499.99), Currency::Inr),
            )
            .discount_percent(dec!(2.5))
            .build()
            .unwrap(),
        );
    }

    let (sgst, cgst) = TaxRule::gst_split(dec!(18)).unwrap();
    builder.tax_rule(sgst).tax_rule(cgst).build().unwrap()
}

fn bench_build_document(c: &mut Criterion) {
    c.bench_function("build_document_10_lines", |b| {
        b.iter(|| black_box(build_document(10)));
    });
}

fn bench_recompute(c: &mut Criterion) {
    for lines in [10usize, 100, 1000] {
        let mut doc = build_document(lines);
        c.bench_function(&format!("recompute_{lines}_lines"), |b| {
            b.iter(|| {
                doc.recompute();
                black_box(doc.totals().grand_total)
            });
        });
    }
}

fn bench_edit_cycle(c: &mut Criterion) {
    // One form keystroke: mutate a line, totals re-derived synchronously.
    let mut doc = build_document(100);
    c.bench_function("edit_cycle_100_lines", |b| {
        let mut quantity = 1u32;
        b.iter(|| {
            quantity = quantity % 9 + 1;
            doc.set_line_quantity(50, black_box(quantity)).unwrap();
            black_box(doc.totals().grand_total)
        });
    });
}

fn bench_validate(c: &mut Criterion) {
    let doc = build_document(100);
    c.bench_function("validate_100_lines", |b| {
        b.iter(|| black_box(validate_document(black_box(&doc))));
    });
}

criterion_group!(
    benches,
    bench_build_document,
    bench_recompute,
    bench_edit_cycle,
    bench_validate,
);
criterion_main!(benches);
