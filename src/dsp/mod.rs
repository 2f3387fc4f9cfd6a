//! Low-level DSP primitives used by the effect blocks in [`crate::graph`].
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside the engine. They intentionally stay focused on the
//! signal-processing math so the graph blocks can layer on knob mapping and
//! chaining.

/// XOR-shift diffusion shared by the bit reorganizer and knob fuegoization.
pub mod bit_hash;
/// Exponential knob curves and natural-frequency conversion.
pub mod curves;
/// Feedback comb and fractional delay lines.
pub mod delay;
/// Tanh saturation for feedback paths.
pub mod distortion;
/// Biquad sections and RBJ shelf/peak designs.
pub mod filter;
/// Dry/wet crossfade.
pub mod mix;
/// One-pole low-pass filter.
pub mod one_pole;
/// Uniform random numbers for stochastic blocks.
pub mod rng;
/// Hold-and-repeat sample-rate reduction.
pub mod sample_rate_reducer;
/// Smoothed runtime parameters.
pub mod smoother;
/// Hysteresis edge detection for gate inputs.
pub mod trigger;
/// Sine and cosine lookup tables.
pub mod wavetable;

pub use delay::{Comb, PureDelay};
pub use filter::{Biquad, BiquadCoefs};
pub use one_pole::OnePole;
pub use smoother::RuntimeParam;
