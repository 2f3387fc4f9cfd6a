//! Fixed-capacity circular delay lines: a feedback comb and a fractional delay.
//!
//! Both lines write one sample per call and advance the write position by
//! exactly one, modulo [`DELAY_CAPACITY`]. Reads happen before the write, at
//! an offset kept in `[1, DELAY_CAPACITY - 1]` so the slot about to be
//! overwritten is never read.
//!
//! # Comb
//!
//! ```text
//! input ──→ (+) ──────────────────────────┬──→ output
//!            ↑                            │
//!            └── × fb ← sat ← lowpass ← [delay] ←┘
//! ```
//!
//! The feedback knob reaches ±1.1: beyond unity the loop would ring up
//! forever, but the saturator caps every pass at its ceiling, so the output
//! stays bounded.
//!
//! # PureDelay
//!
//! A plain delay with a fractional read position. Linear interpolation
//! between the two neighbouring taps lets the delay time glide without the
//! clicks an integer-only read produces.

use crate::dsp::{curves::zeroed_exp_param, distortion::TanhSaturator, one_pole::OnePole};

/// Samples held by every delay line.
pub const DELAY_CAPACITY: usize = 8192;

/// Lowest comb frequency accepted, in cycles per sample.
const MIN_COMB_FREQ: f32 = 1.0 / (DELAY_CAPACITY - 1) as f32;

/// Magnitude of the feedback at either end of the feedback knob.
const MAX_FEEDBACK: f32 = 1.1;

/// Drive of the saturator inside the comb's feedback path.
const COMB_SATURATOR_DRIVE: f32 = 0.5;

/// Feedback comb filter with a low-pass and saturator in the loop.
pub struct Comb {
    filter: OnePole,
    buffer: [f32; DELAY_CAPACITY],
    write_pos: usize,
    delay_samples: usize,
    feedback: f32,
    saturator: TanhSaturator,
}

impl Comb {
    pub fn new() -> Self {
        Self {
            filter: OnePole::new(),
            buffer: [0.0; DELAY_CAPACITY],
            write_pos: 0,
            delay_samples: 1,
            feedback: 0.0,
            saturator: TanhSaturator::new(COMB_SATURATOR_DRIVE),
        }
    }

    /// Delay length in samples; the fraction is dropped.
    pub fn set_delay_samples(&mut self, samples: f32) {
        self.delay_samples = (samples as usize).clamp(1, DELAY_CAPACITY - 1);
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback;
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Alpha of the one-pole low-pass in the loop (1 = no filtering).
    pub fn set_cutoff_alpha(&mut self, alpha: f32) {
        self.filter.set_alpha(alpha);
    }

    /// Largest magnitude the feedback path can add to the input.
    pub fn feedback_ceiling(&self) -> f32 {
        self.feedback.abs() * self.saturator.ceiling()
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let read_pos = (self.write_pos + DELAY_CAPACITY - self.delay_samples) % DELAY_CAPACITY;
        let delayed = self.filter.process(self.buffer[read_pos]);
        let output = input + self.feedback * self.saturator.process(delayed);

        self.buffer[self.write_pos] = output;
        self.write_pos = (self.write_pos + 1) % DELAY_CAPACITY;

        output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Delay in samples that makes the comb resonate at `freq` cycles per sample.
    ///
    /// Frequencies at or below zero are raised to the lowest frequency the
    /// line can hold.
    pub fn delay_samples_for(freq: f32) -> f32 {
        1.0 / freq.max(MIN_COMB_FREQ)
    }

    /// Map the feedback knob: negative below the midpoint, positive above,
    /// zero at 0.5 and ±1.1 at the ends.
    pub fn feedback_for_knob(knob: f32) -> f32 {
        if knob < 0.5 {
            -MAX_FEEDBACK * zeroed_exp_param(0.25, 2.0 * (0.5 - knob))
        } else {
            MAX_FEEDBACK * zeroed_exp_param(0.25, 2.0 * (knob - 0.5))
        }
    }
}

impl Default for Comb {
    fn default() -> Self {
        Self::new()
    }
}

/// Delay line with a fractional, linearly interpolated read position.
pub struct PureDelay {
    buffer: [f32; DELAY_CAPACITY],
    write_pos: usize,
    delay_samples: f32,
}

impl PureDelay {
    pub fn new() -> Self {
        Self {
            buffer: [0.0; DELAY_CAPACITY],
            write_pos: 0,
            delay_samples: 1.0,
        }
    }

    /// Delay in (fractional) samples, clamped so both taps stay readable.
    pub fn set_delay_samples(&mut self, samples: f32) {
        self.delay_samples = samples.clamp(1.0, (DELAY_CAPACITY - 2) as f32);
    }

    pub fn delay_samples(&self) -> f32 {
        self.delay_samples
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let whole = self.delay_samples as usize;
        let frac = self.delay_samples - whole as f32;

        let near = self.buffer[(self.write_pos + DELAY_CAPACITY - whole) % DELAY_CAPACITY];
        let far = self.buffer[(self.write_pos + DELAY_CAPACITY - whole - 1) % DELAY_CAPACITY];
        let output = near + (far - near) * frac;

        self.buffer[self.write_pos] = input;
        self.write_pos = (self.write_pos + 1) % DELAY_CAPACITY;

        output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

impl Default for PureDelay {
    fn default() -> Self {
        Self::new()
    }
}
