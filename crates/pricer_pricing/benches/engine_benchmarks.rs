//! Criterion benchmarks for the Monte Carlo engine.
//!
//! Measures path generation, payoff evaluation and full valuations across
//! trajectory counts, for both generator kinds.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{MarketParams, NoteTerms};
use pricer_pricing::mc::{generate_gbm_paths, price, GbmParams, MonteCarloConfig, ValuationInputs};
use pricer_pricing::path_dependent::evaluate_paths;
use pricer_pricing::rng::{RandomStream, RngKind};

fn bench_path_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_generation");
    let params = GbmParams::new(16.25, 0.04, 0.02, 0.2, 2.0);

    for n_paths in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &n_paths, |b, &n| {
            b.iter(|| {
                let mut rng = RandomStream::new(RngKind::StdRng, 42).unwrap();
                generate_gbm_paths(black_box(&params), 5, n, &mut rng)
            })
        });
    }

    group.finish();
}

fn bench_payoff_evaluation(c: &mut Criterion) {
    let params = GbmParams::new(16.25, 0.04, 0.02, 0.2, 2.0);
    let terms = NoteTerms::default();
    let mut rng = RandomStream::new(RngKind::StdRng, 42).unwrap();
    let paths = generate_gbm_paths(&params, 5, 10_000, &mut rng).unwrap();

    c.bench_function("evaluate_paths_10k", |b| {
        b.iter(|| evaluate_paths(black_box(&paths), black_box(&terms)))
    });
}

fn bench_valuation(c: &mut Criterion) {
    let mut group = c.benchmark_group("valuation");

    for kind in [RngKind::StdRng, RngKind::Mt19937] {
        let inputs = ValuationInputs::new(
            MarketParams::default(),
            NoteTerms::default(),
            MonteCarloConfig::builder()
                .n_paths(10_000)
                .rng(kind)
                .build()
                .unwrap(),
        );
        group.bench_with_input(BenchmarkId::from_parameter(kind), &inputs, |b, inputs| {
            b.iter(|| price(black_box(inputs)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_path_generation,
    bench_payoff_evaluation,
    bench_valuation
);
criterion_main!(benches);
