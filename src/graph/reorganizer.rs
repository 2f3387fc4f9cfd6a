//! Bit-crushing by scrambling low bits rather than truncating them.

use crate::dsp::bit_hash::{diffuse, low_bit_mask};
use crate::graph::node::GraphNode;

/// Largest number of hashed bits.
pub const MAX_HASH_BITS: u32 = 8;

/// 8-bit quantizer with a flip mask and low-bit diffusion.
///
/// The sample is mapped from [-1, 1] onto the 8-bit grid (`(x + 1) · 128`),
/// XORed with the flip mask, and the lowest `hash_bits` bits are scrambled
/// with [`diffuse`]. The part of the sample below one quantization step is
/// kept aside and added back before mapping to [-1, 1] again, so with no
/// flip and no hashing the signal comes out unchanged.
///
/// The integer path wraps: a full-scale +1.0 lands on code 256, which wraps
/// to 0 and comes out as -1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitalReorganizer {
    flip: u8,
    hash_bits: u32,
}

impl DigitalReorganizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// XOR mask from the DIGR knob (`knob · 255`).
    pub fn set_flip(&mut self, knob: f32) {
        self.flip = (knob.clamp(0.0, 1.0) * 255.0) as u8;
    }

    /// Hashed bit count from the HASH knob (`round(knob · 8)`).
    pub fn set_hash(&mut self, knob: f32) {
        self.hash_bits = (knob.clamp(0.0, 1.0) * MAX_HASH_BITS as f32).round() as u32;
    }

    pub fn flip(&self) -> u8 {
        self.flip
    }

    pub fn hash_bits(&self) -> u32 {
        self.hash_bits
    }

    /// The integer part of the transform: flip, then diffuse the low bits.
    #[inline]
    pub fn process_code(&self, code: u8) -> u8 {
        let mask = low_bit_mask(self.hash_bits);
        let tail_shift = 1 + self.hash_bits / 2;
        diffuse((code ^ self.flip) as u16, mask, tail_shift) as u8
    }
}

impl GraphNode for DigitalReorganizer {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let scaled = (input + 1.0) * 128.0;
        let rounded = scaled.round();
        let remainder = scaled - rounded;
        let code = rounded as i32 as u8;

        (self.process_code(code) as f32 + remainder) / 128.0 - 1.0
    }
}
