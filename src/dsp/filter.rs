use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Biquad Sections
===============

Every tone-shaping filter in the engine is a second-order section:

    y[n] = b0·x[n] + b1·x[n−1] + b2·x[n−2] − a1·y[n−1] − a2·y[n−2]

with a0 normalized to 1. The section is run in transposed direct form II,
which keeps only two state values (z1, z2):

    y  = b0·x + z1
    z1 = b1·x − a1·y + z2
    z2 = b2·x − a2·y

Coefficient Design (RBJ cookbook)
---------------------------------

All three shapes start from the same intermediate values at normalized
frequency f (cycles per sample):

    ω = 2π·f      A = √gain      α = sin ω / (2Q)

| shape      | boosts/cuts            | gain = 1        |
| ---------- | ---------------------- | --------------- |
| peaking    | a bell around f        | b = a, identity |
| low shelf  | everything below f     | b = a, identity |
| high shelf | everything above f     | b = a, identity |

Continuity over exactness
-------------------------

Swapping coefficients never touches z1/z2. Resetting the state on every
knob move would click far worse than the brief transient a live
coefficient change produces, so state always carries over.
*/

/// Smallest Q (or resonance width) a design will accept.
pub const MIN_Q: f32 = 0.01;

/// Normalized coefficients {b0, b1, b2, a1, a2} (a0 = 1).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoefs {
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    fn normalized(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Peaking bell at `freq` cycles per sample.
    pub fn peaking(freq: f32, gain: f32, q: f32) -> Self {
        let omega = TAU * freq;
        let (sinw, cosw) = omega.sin_cos();
        let a = gain.sqrt();
        let alpha = sinw / (2.0 * q.max(MIN_Q));

        Self::normalized(
            1.0 + alpha * a,
            -2.0 * cosw,
            1.0 - alpha * a,
            1.0 + alpha / a,
            -2.0 * cosw,
            1.0 - alpha / a,
        )
    }

    /// Low shelf with corner at `freq` cycles per sample (shelf slope 1).
    pub fn low_shelf(freq: f32, gain: f32) -> Self {
        let omega = TAU * freq;
        let (sinw, cosw) = omega.sin_cos();
        let a = gain.sqrt();
        let beta = a.sqrt();

        Self::normalized(
            a * ((a + 1.0) - (a - 1.0) * cosw + beta * sinw),
            2.0 * a * ((a - 1.0) - (a + 1.0) * cosw),
            a * ((a + 1.0) - (a - 1.0) * cosw - beta * sinw),
            (a + 1.0) + (a - 1.0) * cosw + beta * sinw,
            -2.0 * ((a - 1.0) + (a + 1.0) * cosw),
            (a + 1.0) + (a - 1.0) * cosw - beta * sinw,
        )
    }

    /// High shelf with corner at `freq` cycles per sample (shelf slope 1).
    pub fn high_shelf(freq: f32, gain: f32) -> Self {
        let omega = TAU * freq;
        let (sinw, cosw) = omega.sin_cos();
        let a = gain.sqrt();
        let beta = a.sqrt();

        Self::normalized(
            a * ((a + 1.0) + (a - 1.0) * cosw + beta * sinw),
            -2.0 * a * ((a - 1.0) + (a + 1.0) * cosw),
            a * ((a + 1.0) + (a - 1.0) * cosw - beta * sinw),
            (a + 1.0) - (a - 1.0) * cosw + beta * sinw,
            2.0 * ((a - 1.0) - (a + 1.0) * cosw),
            (a + 1.0) - (a - 1.0) * cosw - beta * sinw,
        )
    }
}

impl Default for BiquadCoefs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single second-order section in transposed direct form II.
#[derive(Debug, Clone, Copy, Default)]
pub struct Biquad {
    coefs: BiquadCoefs,
    z1: f32,
    z2: f32,
}

impl Biquad {
    pub fn new(coefs: BiquadCoefs) -> Self {
        Self {
            coefs,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Swap in new coefficients; the filter state carries over.
    pub fn set_coefs(&mut self, coefs: BiquadCoefs) {
        self.coefs = coefs;
    }

    pub fn coefs(&self) -> BiquadCoefs {
        self.coefs
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coefs;
        let output = c.b0 * input + self.z1;
        self.z1 = c.b1 * input - c.a1 * output + self.z2;
        self.z2 = c.b2 * input - c.a2 * output;
        output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
