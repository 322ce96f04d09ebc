//! Benchmarks for the per-keystroke and per-submit paths.
//!
//! Run with: cargo bench

use cardform::picker::ExpiryRange;
use cardform::{detect, is_valid_number, luhn, FieldId, FormConfig, FormGate, SchemeWatch};
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const VISA: &str = "4242424242424242";
const VISA_SPACED: &str = "4242 4242 4242 4242";
const AMEX: &str = "378282246310005";
const MIR: &str = "2200000000000004";

const VISA_DIGITS: [u8; 16] = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];

/// Scheme detection while typing
fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");

    for len in [1usize, 2, 4, 16] {
        group.bench_with_input(BenchmarkId::new("visa_prefix", len), &VISA[..len], |b, input| {
            b.iter(|| detect(black_box(input)))
        });
    }

    group.bench_function("mir", |b| b.iter(|| detect(black_box(MIR))));

    group.bench_function("scheme_watch_typing", |b| {
        b.iter(|| {
            let mut watch = SchemeWatch::new();
            for end in 1..=AMEX.len() {
                black_box(watch.observe(&AMEX[..end]));
            }
        })
    });

    group.finish();
}

/// Luhn checksum on text and on digit slices
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("passes_16", |b| b.iter(|| luhn::passes(black_box(VISA))));

    group.bench_function("validate_digits_16", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("check_digit_15", |b| {
        b.iter(|| luhn::generate_check_digit(black_box(&VISA_DIGITS[..15])))
    });

    group.finish();
}

/// Full number validation
fn bench_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("number");

    group.bench_function("visa", |b| b.iter(|| is_valid_number(black_box(VISA))));
    group.bench_function("amex", |b| b.iter(|| is_valid_number(black_box(AMEX))));
    group.bench_function("unknown", |b| {
        b.iter(|| is_valid_number(black_box("9999999999999995")))
    });

    group.finish();
}

/// Picker resolution and the submit gate
fn bench_form(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2018, 5, 15, 0, 0, 0).unwrap();
    let mut group = c.benchmark_group("form");

    let range = ExpiryRange::new(now, 20);
    group.bench_function("resolve_selection", |b| {
        b.iter(|| range.resolve_selection(black_box(11), black_box(20)))
    });

    let gate = FormGate::default();
    let mut snapshot = gate.new_snapshot();
    for (field, value) in [
        (FieldId::CardNumber, VISA_SPACED),
        (FieldId::Expiry, "06/2020"),
        (FieldId::Cvv, "100"),
        (FieldId::CardholderName, "Jane Doe"),
        (FieldId::AddressLine1, "1 Main Street"),
        (FieldId::City, "Springfield"),
        (FieldId::State, "IL"),
        (FieldId::PostalCode, "62701"),
        (FieldId::Country, "United States"),
        (FieldId::Phone, "+1 217 555 0100"),
    ] {
        snapshot.set_value(field, value);
    }
    gate.refresh(&mut snapshot, now);

    group.bench_function("is_submittable", |b| {
        b.iter(|| gate.is_submittable(black_box(&snapshot)))
    });

    group.bench_function("end_editing_cvv", |b| {
        let mut snapshot = snapshot.clone();
        b.iter(|| gate.end_editing(&mut snapshot, FieldId::Cvv, black_box("100"), now))
    });

    group.bench_function("submit", |b| {
        let gate = FormGate::new(FormConfig::new());
        b.iter(|| gate.submit(black_box(&snapshot), now))
    });

    group.finish();
}

criterion_group!(benches, bench_detect, bench_luhn, bench_number, bench_form);
criterion_main!(benches);
