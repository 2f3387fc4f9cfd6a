//! Effect blocks built from the DSP primitives.
//!
//! Graph blocks wrap the low-level primitives with what the instrument needs
//! around them: knob mapping, smoothed parameter pushes and fixed chaining.
//! The `tone` module ties them into the two selectable topologies.

/// Polynomial waveshaper and 2x oversampler.
pub mod drive;
/// Four-band EQ and resonant bump.
pub mod eq;
/// The degradation chain and its drive page.
pub mod frog;
/// Two-channel stochastic stepped modulator.
pub mod marbles;
/// Core trait shared by all graph nodes.
pub mod node;
/// 8-bit quantizer with low-bit diffusion.
pub mod reorganizer;
/// `ToneStage` and its two topologies.
pub mod tone;

pub use frog::{DriveStage, FrogBlock};
pub use marbles::{Marbles, Step};
pub use node::GraphNode;
pub use tone::{CombEq, DelayBump, ToneStage};
