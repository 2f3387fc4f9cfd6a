//! Control-rate to audio-rate parameter smoothing.

/*
Runtime Parameters
==================

Knobs are read once per audio block, but the DSP reads its parameters every
sample. Jumping a gain or a filter coefficient from one block to the next
produces an audible click, so each parameter is held as a *target* and
approached through a one-pole low-pass filter at a 1 kHz corner:

    block start:  set_target(new value)
    every sample: value = process()

                    target ─────────────────────────
                          ╱‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
    smoothed value       ╱
                 ───────╯

The response to a step is a geometric approach: monotonic, no overshoot.

Caller contract: `process()` must run exactly once per tick of the rate the
parameter was built for. Calling it twice per sample doubles the corner
frequency. Parameters that live inside a 2x oversampler are therefore built
with twice the sample rate.
*/

use crate::dsp::one_pole::OnePole;

/// Corner frequency of every runtime parameter, in Hz.
pub const SMOOTHING_HZ: f32 = 1000.0;

/// A smoothed parameter: a target value plus a one-pole filter toward it.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeParam {
    target: f32,
    filter: OnePole,
}

impl RuntimeParam {
    /// Parameter ticked at `tick_rate` Hz, starting from zero.
    pub fn new(tick_rate: f32) -> Self {
        Self::with_value(tick_rate, 0.0)
    }

    /// Parameter whose target and smoothed output both start at `value`.
    pub fn with_value(tick_rate: f32, value: f32) -> Self {
        let mut filter = OnePole::with_state(1.0, value);
        filter.set_alpha_from_nat_freq(SMOOTHING_HZ / tick_rate);
        Self {
            target: value,
            filter,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Advance one tick toward the target and return the smoothed value.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.filter.process(self.target)
    }

    /// Last smoothed value, without advancing.
    pub fn value(&self) -> f32 {
        self.filter.value()
    }
}
