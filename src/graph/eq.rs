//! Four-band equalizer and single-band resonant bump.

use crate::dsp::filter::{Biquad, BiquadCoefs, MIN_Q};
use crate::graph::node::GraphNode;

/*
Tone Stages
===========

Both shapers end the chain and both are plain biquad cascades whose
coefficients are recomputed from frequency, gain and Q. Frequencies are
given in Hz and converted to cycles per sample with the stage's sample rate.

    Eq:            low shelf → low-mid peak → high-mid peak → high shelf
                   100 Hz      500 Hz, Q 1    2 kHz, Q 1      5 kHz

    ResonantBump:  one peaking section; height is the linear gain at the
                   center, width is its Q

A setter only redesigns its own section, and only when the value actually
changed: the smoothed knob values are pushed every sample, but once they
settle they stop moving and the redesign stops with them.

Gains are linear (1.0 = flat). At gain 1 every section has b = a and passes
its input unchanged.
*/

const LOW_SHELF_HZ: f32 = 100.0;
const LOW_MID_HZ: f32 = 500.0;
const HIGH_MID_HZ: f32 = 2_000.0;
const HIGH_SHELF_HZ: f32 = 5_000.0;
const DEFAULT_MID_Q: f32 = 1.0;

/// Highest design frequency, in cycles per sample.
const MAX_FREQ: f32 = 0.49;
/// Lowest design frequency, in cycles per sample.
const MIN_FREQ: f32 = 1e-5;

fn cycles_per_sample(freq_hz: f32, sample_rate: f32) -> f32 {
    (freq_hz / sample_rate).clamp(MIN_FREQ, MAX_FREQ)
}

#[derive(Debug, Clone, Copy)]
struct Band {
    section: Biquad,
    freq_hz: f32,
    gain: f32,
    q: f32,
}

impl Band {
    fn new(freq_hz: f32, q: f32) -> Self {
        Self {
            section: Biquad::new(BiquadCoefs::IDENTITY),
            freq_hz,
            gain: 1.0,
            q,
        }
    }
}

/// Four-band equalizer: two shelves around two peaks.
pub struct Eq {
    low: Band,
    low_mid: Band,
    high_mid: Band,
    high: Band,
    sample_rate: f32,
}

impl Eq {
    pub fn new(sample_rate: f32) -> Self {
        let mut eq = Self {
            low: Band::new(LOW_SHELF_HZ, DEFAULT_MID_Q),
            low_mid: Band::new(LOW_MID_HZ, DEFAULT_MID_Q),
            high_mid: Band::new(HIGH_MID_HZ, DEFAULT_MID_Q),
            high: Band::new(HIGH_SHELF_HZ, DEFAULT_MID_Q),
            sample_rate,
        };
        eq.update_coefficients();
        eq
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    pub fn set_low_freq(&mut self, freq_hz: f32) {
        if self.low.freq_hz != freq_hz {
            self.low.freq_hz = freq_hz;
            self.update_low_shelf();
        }
    }

    pub fn set_low_gain(&mut self, gain: f32) {
        if self.low.gain != gain {
            self.low.gain = gain;
            self.update_low_shelf();
        }
    }

    pub fn set_low_mid_freq(&mut self, freq_hz: f32) {
        if self.low_mid.freq_hz != freq_hz {
            self.low_mid.freq_hz = freq_hz;
            self.update_low_mid_peak();
        }
    }

    pub fn set_low_mid_gain(&mut self, gain: f32) {
        if self.low_mid.gain != gain {
            self.low_mid.gain = gain;
            self.update_low_mid_peak();
        }
    }

    pub fn set_low_mid_q(&mut self, q: f32) {
        if self.low_mid.q != q {
            self.low_mid.q = q;
            self.update_low_mid_peak();
        }
    }

    pub fn set_high_mid_freq(&mut self, freq_hz: f32) {
        if self.high_mid.freq_hz != freq_hz {
            self.high_mid.freq_hz = freq_hz;
            self.update_high_mid_peak();
        }
    }

    pub fn set_high_mid_gain(&mut self, gain: f32) {
        if self.high_mid.gain != gain {
            self.high_mid.gain = gain;
            self.update_high_mid_peak();
        }
    }

    pub fn set_high_mid_q(&mut self, q: f32) {
        if self.high_mid.q != q {
            self.high_mid.q = q;
            self.update_high_mid_peak();
        }
    }

    pub fn set_high_freq(&mut self, freq_hz: f32) {
        if self.high.freq_hz != freq_hz {
            self.high.freq_hz = freq_hz;
            self.update_high_shelf();
        }
    }

    pub fn set_high_gain(&mut self, gain: f32) {
        if self.high.gain != gain {
            self.high.gain = gain;
            self.update_high_shelf();
        }
    }

    /// Linear gains of the four bands, low to high.
    pub fn gains(&self) -> [f32; 4] {
        [self.low.gain, self.low_mid.gain, self.high_mid.gain, self.high.gain]
    }

    fn update_low_shelf(&mut self) {
        let freq = cycles_per_sample(self.low.freq_hz, self.sample_rate);
        self.low
            .section
            .set_coefs(BiquadCoefs::low_shelf(freq, self.low.gain));
    }

    fn update_low_mid_peak(&mut self) {
        let band = &mut self.low_mid;
        let freq = cycles_per_sample(band.freq_hz, self.sample_rate);
        band.section
            .set_coefs(BiquadCoefs::peaking(freq, band.gain, band.q.max(MIN_Q)));
    }

    fn update_high_mid_peak(&mut self) {
        let band = &mut self.high_mid;
        let freq = cycles_per_sample(band.freq_hz, self.sample_rate);
        band.section
            .set_coefs(BiquadCoefs::peaking(freq, band.gain, band.q.max(MIN_Q)));
    }

    fn update_high_shelf(&mut self) {
        let freq = cycles_per_sample(self.high.freq_hz, self.sample_rate);
        self.high
            .section
            .set_coefs(BiquadCoefs::high_shelf(freq, self.high.gain));
    }

    fn update_coefficients(&mut self) {
        self.update_low_shelf();
        self.update_low_mid_peak();
        self.update_high_mid_peak();
        self.update_high_shelf();
    }
}

impl GraphNode for Eq {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let output = self.low.section.process(input);
        let output = self.low_mid.section.process(output);
        let output = self.high_mid.section.process(output);
        self.high.section.process(output)
    }
}

/// A single peaking section with independent height and width.
pub struct ResonantBump {
    section: Biquad,
    freq_hz: f32,
    height: f32,
    width: f32,
    sample_rate: f32,
}

impl ResonantBump {
    pub fn new(sample_rate: f32) -> Self {
        let mut bump = Self {
            section: Biquad::new(BiquadCoefs::IDENTITY),
            freq_hz: 1_000.0,
            height: 1.0,
            width: 1.0,
            sample_rate,
        };
        bump.update_coefficients();
        bump
    }

    pub fn set_freq(&mut self, freq_hz: f32) {
        if self.freq_hz != freq_hz {
            self.freq_hz = freq_hz;
            self.update_coefficients();
        }
    }

    /// Linear gain at the center frequency; 1.0 is transparent.
    pub fn set_height(&mut self, height: f32) {
        if self.height != height {
            self.height = height;
            self.update_coefficients();
        }
    }

    /// Q of the bump; higher is narrower.
    pub fn set_width(&mut self, width: f32) {
        if self.width != width {
            self.width = width;
            self.update_coefficients();
        }
    }

    pub fn freq_hz(&self) -> f32 {
        self.freq_hz
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn update_coefficients(&mut self) {
        let freq = cycles_per_sample(self.freq_hz, self.sample_rate);
        self.section
            .set_coefs(BiquadCoefs::peaking(freq, self.height, self.width.max(MIN_Q)));
    }
}

impl GraphNode for ResonantBump {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.section.process(input)
    }
}
