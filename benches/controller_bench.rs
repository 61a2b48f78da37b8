use criterion::{Criterion, criterion_group, criterion_main};
use hstretch::memory::Ram;
use hstretch::stretch;
use hstretch::testbench::{DEFAULT_MAX_TICKS, Testbench};
use hstretch::types::Dimensions;
use std::hint::black_box;

fn gradient(dims: Dimensions) -> Vec<u8> {
    (0..dims.pixel_count()).map(|i| (64 + i % 96) as u8).collect()
}

// ============================================================================
// TIER 1: FULL PASS BENCHMARKS (Primary Baseline)
// ============================================================================

/// One complete controller pass over the largest image that fits in memory
fn bench_full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pass");

    let dims = Dimensions::new(181, 181);
    let pixels = gradient(dims);

    group.bench_function("181x181", |b| {
        b.iter(|| {
            let mut tb = Testbench::new(Ram::with_image(dims, black_box(&pixels)));
            tb.run_pass(DEFAULT_MAX_TICKS).unwrap()
        });
    });

    group.finish();
}

// ============================================================================
// TIER 2: COMPONENT-LEVEL BENCHMARKS (Diagnostic)
// ============================================================================

/// Reference model on the same image, for comparison with the tick-level run
fn bench_reference_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_model");

    let pixels = gradient(Dimensions::new(181, 181));

    group.bench_function("stretch_181x181", |b| {
        b.iter(|| stretch::stretch(black_box(&pixels)));
    });

    group.finish();
}

// ============================================================================
// BENCHMARK REGISTRATION
// ============================================================================

criterion_group!(
    benches,
    bench_full_pass,
    bench_reference_model,
);

criterion_main!(benches);
