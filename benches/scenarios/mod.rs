//! Real-world scenario benchmarks.
//!
//! These benchmarks run the engine the way the audio callback does: one
//! `process_block` per device buffer, knobs read once per block.

mod marbles;
mod topologies;

pub use marbles::bench_marbles;
pub use topologies::bench_topologies;
