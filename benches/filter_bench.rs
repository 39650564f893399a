//! Criterion benchmarks for per-sample filtering.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use iir_filters::{AudioFilter, FilterAlgorithm, Topology};
use std::hint::black_box;

const BUF_SIZE: usize = 1024;
const SAMPLE_RATE: f64 = 48_000.0;

/// Deterministic white noise from a simple LCG.
fn white_noise(len: usize) -> Vec<f64> {
    let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
        })
        .collect()
}

fn filter_for(algorithm: FilterAlgorithm, topology: Topology) -> AudioFilter {
    let mut filter = AudioFilter::new();
    filter.set_algorithm(algorithm);
    filter.set_topology(topology);
    filter.set_cutoff(1000.0);
    filter.set_q(0.707);
    filter.set_gain_db(6.0);
    filter.prepare(SAMPLE_RATE);
    filter
}

fn bench_topologies(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");
    let input = white_noise(BUF_SIZE);

    for topology in [
        Topology::Direct,
        Topology::Canonical,
        Topology::TransposeDirect,
        Topology::TransposeCanonical,
    ] {
        let mut filter = filter_for(FilterAlgorithm::Lpf2, topology);
        let mut buffer = input.clone();
        group.bench_function(BenchmarkId::from_parameter(format!("{topology:?}")), |b| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process_block(black_box(&mut buffer));
            });
        });
    }

    group.finish();
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithm");
    let input = white_noise(BUF_SIZE);

    for algorithm in [
        FilterAlgorithm::Lpf1,
        FilterAlgorithm::ButterBpf2,
        FilterAlgorithm::LowShelf,
        FilterAlgorithm::CqParaEq,
        FilterAlgorithm::MatchLp2a,
    ] {
        let mut filter = filter_for(algorithm, Topology::Direct);
        let mut buffer = input.clone();
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process_block(black_box(&mut buffer));
            });
        });
    }

    group.finish();
}

/// Worst case: a parameter moves every sample, so every sample pays for a redesign.
fn bench_modulated_cutoff(c: &mut Criterion) {
    let input = white_noise(BUF_SIZE);
    let mut filter = filter_for(FilterAlgorithm::MatchBp2a, Topology::Direct);

    c.bench_function("modulated_cutoff", |b| {
        b.iter(|| {
            for (n, &x) in input.iter().enumerate() {
                filter.set_cutoff(500.0 + n as f64);
                black_box(filter.process_sample(x));
            }
        });
    });
}

criterion_group!(benches, bench_topologies, bench_algorithms, bench_modulated_cutoff);
criterion_main!(benches);
