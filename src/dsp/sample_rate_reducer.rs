//! Hold-and-repeat decimation.
//!
//! A phase accumulator advances by `freq` (cycles per sample) on every call.
//! Each time it crosses 1 the reducer latches the current input; in between it
//! keeps repeating the last latched value:
//!
//! ```text
//! freq = 1.0   latch every sample (transparent)
//! freq = 0.25  latch every 4th sample
//! freq = 0.1   latch every 10th sample
//! ```
//!
//! Frequencies that do not divide 1 evenly produce irregular hold lengths,
//! which is where most of the reducer's grit comes from.

/// Sample-rate reducer with a normalized latch frequency.
#[derive(Debug, Clone, Copy)]
pub struct SampleRateReducer {
    phase: f32,
    freq: f32,
    held: f32,
}

impl SampleRateReducer {
    pub fn new() -> Self {
        Self {
            // Start latched so the first call captures its input.
            phase: 1.0,
            freq: 1.0,
            held: 0.0,
        }
    }

    /// Latch frequency in cycles per sample; clamped to [0, 1].
    pub fn set_freq(&mut self, freq: f32) {
        self.freq = freq.clamp(0.0, 1.0);
    }

    pub fn freq(&self) -> f32 {
        self.freq
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
            self.held = input;
        }
        self.phase += self.freq;
        self.held
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

impl Default for SampleRateReducer {
    fn default() -> Self {
        Self::new()
    }
}
