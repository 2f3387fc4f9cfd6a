//! Modulator stepping and readout.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use froggers::graph::Marbles;

use crate::BLOCK_SIZES;

pub fn bench_marbles(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/marbles");

    for &size in BLOCK_SIZES {
        // One step per block, then a block of readout
        let mut marbles = Marbles::with_seed(48_000.0, 7);
        marbles.read_params(&[1.0, 0.3, 0.6, 0.4, 0.8, 1.0, 0.2]);

        group.bench_with_input(BenchmarkId::new("step_and_read", size), &size, |b, _| {
            b.iter(|| {
                black_box(marbles.increment());
                let mut sum = 0.0f32;
                for _ in 0..size {
                    let [left, right] = marbles.process();
                    sum += left + right;
                }
                sum
            })
        });
    }

    group.finish();
}
