use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use autofit_core::{
    resolve, resolve_batch, FitRequest, MeasureError, MeasureOracle, Measurement, StyleConfig,
};
use std::hint::black_box;

/// Closed-form greedy fill, so the bench measures the search and not layout.
struct PitchOracle;

impl MeasureOracle for PitchOracle {
    fn measure(
        &mut self,
        text: &str,
        box_width: f32,
        size: u32,
        style: &StyleConfig,
    ) -> Result<Measurement, MeasureError> {
        let per_line = ((box_width / (0.55 * size as f32)).floor() as usize).max(1);
        let lines = text.len().div_ceil(per_line);
        Ok(Measurement {
            rendered_height: lines as f32 * style.line_box(size),
            line_count: lines as u32,
        })
    }
}

/// Benchmark: single resolution over the default [8, 500] range
fn bench_resolve_default_range(c: &mut Criterion) {
    let req = FitRequest::new(
        "The quick brown fox jumps over the lazy dog",
        320.0,
        120.0,
        StyleConfig::default(),
    );
    c.bench_function("resolve_default_range", |b| {
        b.iter(|| resolve(&mut PitchOracle, black_box(&req)))
    });
}

/// Benchmark: line ceiling forcing the second pass
fn bench_resolve_fallback(c: &mut Criterion) {
    let req = FitRequest::new("x".repeat(200), 100.0, 1000.0, StyleConfig::default())
        .with_max_lines(1);
    c.bench_function("resolve_two_pass_fallback", |b| {
        b.iter(|| resolve(&mut PitchOracle, black_box(&req)))
    });
}

/// Benchmark: N independent requests across the rayon pool
fn bench_resolve_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_batch");

    for count in [100, 1_000] {
        let requests: Vec<FitRequest> = (0..count)
            .map(|i| {
                FitRequest::new("y".repeat(10 + i % 90), 240.0, 80.0, StyleConfig::default())
                    .with_max_lines(3)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &requests, |b, reqs| {
            b.iter(|| resolve_batch(black_box(reqs), || PitchOracle));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_default_range,
    bench_resolve_fallback,
    bench_resolve_batch
);
criterion_main!(benches);
