//! Benchmarks for low-level DSP primitives and single graph blocks.

mod delay;
mod drive;
mod filter;

pub use delay::bench_delay;
pub use drive::bench_drive;
pub use filter::bench_filter;
