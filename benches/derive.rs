//! Benchmarks for expiration derivation.

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use forage::expiration::derive;
use forage::models::{DurationUnit, LifespanTable, ShelfLife};

fn single_entry_table() -> LifespanTable {
    LifespanTable::from_entries([(
        "refrigerator".to_string(),
        ShelfLife::new(2, DurationUnit::Week),
    )])
    .unwrap()
}

fn three_entry_table() -> LifespanTable {
    LifespanTable::from_entries([
        ("pantry".to_string(), ShelfLife::new(3, DurationUnit::Day)),
        (
            "refrigerator".to_string(),
            ShelfLife::new(2, DurationUnit::Week),
        ),
        ("freezer".to_string(), ShelfLife::new(8, DurationUnit::Month)),
    ])
    .unwrap()
}

fn bench_derive(c: &mut Criterion) {
    let reference = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
    let single = single_entry_table();
    let triple = three_entry_table();

    let mut group = c.benchmark_group("derive");

    group.bench_function("single_entry", |b| {
        b.iter(|| derive(black_box(&single), black_box(reference)));
    });

    group.bench_function("three_entries", |b| {
        b.iter(|| derive(black_box(&triple), black_box(reference)));
    });

    group.finish();
}

fn bench_enrich_catalog(c: &mut Criterion) {
    let reference = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
    let items = forage::catalog::builtin().unwrap();

    c.bench_function("enrich_builtin_catalog", |b| {
        b.iter_batched(
            || items.clone(),
            |mut batch| forage::expiration::enrich(black_box(&mut batch), reference),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_derive, bench_enrich_catalog);
criterion_main!(benches);
