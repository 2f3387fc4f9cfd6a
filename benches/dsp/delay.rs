//! Benchmarks for the comb and pure delay lines.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use froggers::dsp::delay::{Comb, PureDelay};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Delay times in samples
    let delay_times: &[f32] = &[
        48.0,   // 1ms at 48kHz
        480.0,  // 10ms at 48kHz
        7200.0, // 150ms at 48kHz
    ];

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        for &delay_samples in delay_times {
            let delay_ms = delay_samples / 48.0;

            let mut comb = Comb::new();
            comb.set_delay_samples(delay_samples);
            comb.set_feedback(1.1);
            comb.set_cutoff_alpha(0.5);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("comb_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        comb.render(black_box(&mut buffer));
                    })
                },
            );
        }

        // Fractional delay swept every sample (delay-time modulation)
        let mut delay = PureDelay::new();
        group.bench_with_input(BenchmarkId::new("pure_delay_swept", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for (i, &x) in input.iter().enumerate() {
                    delay.set_delay_samples(480.0 + (i as f32 * 0.1).sin() * 48.0);
                    sum += delay.process(black_box(x));
                }
                sum
            })
        });
    }

    group.finish();
}
