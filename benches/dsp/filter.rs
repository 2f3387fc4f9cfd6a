//! Benchmarks for biquad sections and the EQ cascade.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use froggers::{
    dsp::filter::{Biquad, BiquadCoefs},
    graph::{eq::Eq, GraphNode},
};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        let mut biquad = Biquad::new(BiquadCoefs::peaking(0.02, 4.0, 2.0));
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("biquad", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                biquad.render(black_box(&mut buffer));
            })
        });

        // Static gains: no redesign in the loop
        let mut eq = Eq::new(48_000.0);
        group.bench_with_input(BenchmarkId::new("eq_static", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                eq.render_block(black_box(&mut buffer));
            })
        });

        // A gain that moves every sample forces a redesign per sample,
        // the worst case while a smoother is still gliding
        let mut eq = Eq::new(48_000.0);
        group.bench_with_input(BenchmarkId::new("eq_gliding", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for (i, &x) in input.iter().enumerate() {
                    eq.set_low_gain(1.0 + i as f32 * 1e-4);
                    sum += eq.process(black_box(x));
                }
                sum
            })
        });
    }

    group.finish();
}
