//! Lookup strategy benchmarks
//!
//! Compares the five membership tests of the lookup harness across
//! collection sizes, for a present (last) element and an absent one.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use publisher_lab::benchmark::absent_probe;
use publisher_lab::{LookupHarness, Publisher};
use std::time::Duration;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn bench_lookups(c: &mut Criterion, group_name: &str, pick_last: bool) {
    let mut group = c.benchmark_group(group_name);
    group.measurement_time(Duration::from_secs(3));

    for size in SIZES {
        let harness = LookupHarness::new(size);
        let probe = if pick_last {
            harness.organizations()[size - 1].clone()
        } else {
            absent_probe()
        };
        let probe_string = probe.canonical_string();
        let probe_value = Publisher::from_organization(probe.clone(), harness.license_expiry());

        group.bench_with_input(BenchmarkId::new("vec_organization", size), &size, |b, _| {
            b.iter(|| black_box(harness.organizations().contains(black_box(&probe))))
        });

        group.bench_with_input(BenchmarkId::new("vec_string", size), &size, |b, _| {
            b.iter(|| black_box(harness.strings().contains(black_box(&probe_string))))
        });

        group.bench_with_input(BenchmarkId::new("map_organization_key", size), &size, |b, _| {
            b.iter(|| black_box(harness.organization_map().contains_key(black_box(&probe))))
        });

        group.bench_with_input(BenchmarkId::new("map_string_key", size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    harness
                        .string_map()
                        .contains_key(black_box(probe_string.as_str())),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("map_organization_value", size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    harness
                        .organization_map()
                        .values()
                        .any(|value| *value == probe_value),
                )
            })
        });
    }

    group.finish();
}

fn bench_present_lookup(c: &mut Criterion) {
    bench_lookups(c, "lookup_last_element", true);
}

fn bench_absent_lookup(c: &mut Criterion) {
    bench_lookups(c, "lookup_absent_element", false);
}

fn bench_harness_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("harness_build");
    group.sample_size(10);

    for size in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(LookupHarness::new(size)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_present_lookup,
    bench_absent_lookup,
    bench_harness_build
);
criterion_main!(benches);
