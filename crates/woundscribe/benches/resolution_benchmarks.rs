//! Identity resolution benchmarks.
//!
//! Fuzzy lookup scores every registry key, so resolution cost grows with
//! registry size.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use woundscribe::registry::{PatientRegistry, TokenSortScorer};
use woundscribe::{DocumentSegmenter, Woundscribe};

const FIRST_NAMES: &[&str] = &["John", "Mary", "Robert", "Linda", "James", "Susan", "David", "Karen"];
const LAST_NAMES: &[&str] = &["Smith", "Jones", "Brown", "Garcia", "Miller", "Davis", "Wilson", "Moore"];
const CLINICS: &[&str] = &["Riverside", "Lakeside", "Hillcrest", "Northgate"];

/// Generate a registry with `size` distinct patients.
fn generate_registry(size: usize) -> PatientRegistry {
    let mut registry = PatientRegistry::new();
    for i in 0..size {
        let first = FIRST_NAMES[i % FIRST_NAMES.len()];
        let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
        let key = format!("{} {} {}", first, last, i);
        registry.upsert(&key, CLINICS[i % CLINICS.len()]);
    }
    registry
}

/// Benchmark a single fuzzy lookup against registries of various sizes.
fn bench_lookup_fuzzy(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_fuzzy");

    for size in [100, 1_000, 10_000].iter() {
        let registry = generate_registry(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("registry", size), &registry, |b, registry| {
            b.iter(|| black_box(registry.lookup_fuzzy("Jon Smyth 42", 85.0, &TokenSortScorer)))
        });
    }

    group.finish();
}

/// Benchmark a full process run: segment, normalize, resolve.
fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    let pipeline = Woundscribe::new();

    let pages: Vec<String> = (0..300)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[i % LAST_NAMES.len()];
            format!("Resident Name: {}, {} {}\nnotes", last, first, i)
        })
        .collect();
    let documents = DocumentSegmenter::new().segment(&pages).len();

    for size in [100, 1_000].iter() {
        let registry = generate_registry(*size);

        group.throughput(Throughput::Elements(documents as u64));
        group.bench_with_input(BenchmarkId::new("registry", size), &registry, |b, registry| {
            b.iter_with_setup(
                || registry.clone(),
                |mut registry| black_box(pipeline.process(&pages, &mut registry)),
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup_fuzzy, bench_process);
criterion_main!(benches);
