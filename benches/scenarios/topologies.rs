//! Both topologies end to end.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use froggers::{CombEq, DelayBump, EngineConfig, Froggers, PageId, ToneStage, Topology};

use crate::{test_signal, BLOCK_SIZES};

fn engine<T: ToneStage>(topology: Topology) -> Froggers<T> {
    let config = EngineConfig {
        topology,
        seed: Some(1),
        ..Default::default()
    };
    let (mut engine, _handle) = Froggers::<T>::new(&config).expect("valid bench config");

    // A busy patch: drive, crush, feedback
    let knobs = engine.knobs_mut();
    knobs.set(PageId::Drive, 0, 0.6);
    knobs.set(PageId::Drive, 1, 0.4);
    knobs.set(PageId::Drive, 5, 0.75);
    knobs.set(PageId::Filter, 5, 0.9);
    engine
}

fn bench_engine<T: ToneStage>(c: &mut Criterion, name: &str, topology: Topology) {
    let mut group = c.benchmark_group(format!("scenarios/{}", name));

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];
        let mut engine = engine::<T>(topology);

        group.bench_with_input(BenchmarkId::new("process_block", size), &size, |b, _| {
            b.iter(|| {
                engine.process_block(black_box(&input), &mut left, &mut right);
            })
        });
    }

    group.finish();
}

pub fn bench_topologies(c: &mut Criterion) {
    bench_engine::<CombEq>(c, "comb_eq", Topology::CombEq);
    bench_engine::<DelayBump>(c, "delay_bump", Topology::DelayBump);
}
