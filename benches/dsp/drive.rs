//! Benchmarks for the degradation chain and its parts.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use froggers::graph::{
    drive::{Oversampler2x, PolynomialDrive},
    frog::{DriveStage, FrogBlock},
    reorganizer::DigitalReorganizer,
    GraphNode,
};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_drive(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/drive");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        let mut drive = PolynomialDrive::new(96_000.0);
        drive.set_gain(0.7);
        drive.set_coefs(0.4);
        let mut oversampler = Oversampler2x::new();
        group.bench_with_input(BenchmarkId::new("oversampled_poly", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    sum += oversampler.process(black_box(x), |s| drive.process(s));
                }
                sum
            })
        });

        let mut reorganizer = DigitalReorganizer::new();
        reorganizer.set_flip(0.3);
        reorganizer.set_hash(1.0);
        group.bench_with_input(BenchmarkId::new("reorganizer", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                reorganizer.render_block(black_box(&mut buffer));
            })
        });

        let mut frog = FrogBlock::new(48_000.0);
        group.bench_with_input(BenchmarkId::new("frog_block", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                frog.render_block(black_box(&mut buffer));
            })
        });

        // Every knob off its default so each smoother is live
        let mut stage = DriveStage::new(48_000.0);
        stage.read_params(&[0.6, 0.4, 0.2, 0.3, 0.5, 0.75, 0.8]);
        group.bench_with_input(BenchmarkId::new("drive_stage", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                stage.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
