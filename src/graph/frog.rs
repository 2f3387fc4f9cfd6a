use crate::dsp::{
    curves::{wrap_phase, zeroed_exp_param},
    mix::blend_dry_wet,
    sample_rate_reducer::SampleRateReducer,
    smoother::RuntimeParam,
    wavetable::WaveTable,
};
use crate::graph::{
    drive::{Oversampler2x, PolynomialDrive},
    node::GraphNode,
    reorganizer::DigitalReorganizer,
};

/*
Frog Block
==========

The degradation chain every topology starts with:

    input ─┬─→ [ drive → sine fold ] ×2 oversampled
           │         → reorganizer → srr1 → srr2 ──→ wet
           │                                          │
           └──────────────────────────────────→ dry ──┴─→ blend(mix) → out

Sine fold
---------

The polynomial can leave [-1, 1] by a wide margin. Instead of clipping, the
result is divided by 4, wrapped into one cycle and read off the sine table:

    fold(y) = sin(2π · wrap(y / 4))

Any excursion lands back in [-1, 1], and large ones fold over several
times, adding bright partials rather than the flat tops of a clipper. For
small inputs with the identity polynomial this is sin(π·x/2), a gentle
soft-saturation.

Drive page
----------

| knob  | maps to                                   |
| ----- | ----------------------------------------- |
| GAIN  | drive gain, exp 1..5                      |
| SHAPE | drive coefficients (space-filling curve)  |
| SRR1  | reducer 1 rate, 0.01 + zeroed_exp(10, 1−k) |
| SRR2  | reducer 2 rate, same curve                |
| DIGR  | reorganizer flip mask                     |
| HASH  | reorganizer hashed bit count              |
| MIX   | dry/wet                                   |

SRR at 0 means full rate (the curve gives 1.01, clamped to 1); turning it
up lowers the rate toward 0.01 cycles per sample.
*/

/// Drive page knob labels, in page order.
pub const DRIVE_LABELS: [&str; 7] = ["GAIN", "SHAPE", "SRR1", "SRR2", "DIGR", "HASH", "MIX"];

/// Drive page knob values at power-up: clean, full rate, fully wet.
pub const DRIVE_DEFAULT_KNOBS: [f32; 7] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];

const SRR_FLOOR: f32 = 1e-2;
const SRR_CURVE_BASE: f32 = 10.0;

/// Reducer rate for an SRR knob, in cycles per sample.
pub fn srr_freq_for_knob(knob: f32) -> f32 {
    SRR_FLOOR + zeroed_exp_param(SRR_CURVE_BASE, 1.0 - knob)
}

/// The degradation chain: oversampled drive and fold, reorganizer, two
/// sample-rate reducers, dry/wet blend.
pub struct FrogBlock {
    drive: PolynomialDrive,
    oversampler: Oversampler2x,
    sine: &'static WaveTable,
    reorganizer: DigitalReorganizer,
    srr1: SampleRateReducer,
    srr2: SampleRateReducer,
    mix: f32,
}

impl FrogBlock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            drive: PolynomialDrive::new(2.0 * sample_rate),
            oversampler: Oversampler2x::new(),
            sine: WaveTable::sine(),
            reorganizer: DigitalReorganizer::new(),
            srr1: SampleRateReducer::new(),
            srr2: SampleRateReducer::new(),
            mix: 1.0,
        }
    }

    pub fn drive(&self) -> &PolynomialDrive {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut PolynomialDrive {
        &mut self.drive
    }

    pub fn reorganizer(&self) -> &DigitalReorganizer {
        &self.reorganizer
    }

    pub fn reorganizer_mut(&mut self) -> &mut DigitalReorganizer {
        &mut self.reorganizer
    }

    pub fn set_srr_freqs(&mut self, srr1: f32, srr2: f32) {
        self.srr1.set_freq(srr1);
        self.srr2.set_freq(srr2);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix;
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }
}

impl GraphNode for FrogBlock {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let drive = &mut self.drive;
        let sine = self.sine;
        let folded = self
            .oversampler
            .process(input, |x| sine.evaluate(wrap_phase(drive.process(x) / 4.0)));

        let crushed = self.reorganizer.process(folded);
        let reduced = self.srr2.process(self.srr1.process(crushed));

        blend_dry_wet(input, reduced, self.mix)
    }
}

/// A [`FrogBlock`] together with the smoothers that feed it from the drive page.
///
/// GAIN and SHAPE go straight to the drive, whose own smoothers tick inside
/// the oversampler. The other five are smoothed here and pushed into the
/// block before every sample.
pub struct DriveStage {
    frog: FrogBlock,
    srr1: RuntimeParam,
    srr2: RuntimeParam,
    digr: RuntimeParam,
    hash: RuntimeParam,
    mix: RuntimeParam,
}

impl DriveStage {
    pub fn new(sample_rate: f32) -> Self {
        let [_, _, srr1, srr2, digr, hash, mix] = DRIVE_DEFAULT_KNOBS;

        Self {
            frog: FrogBlock::new(sample_rate),
            srr1: RuntimeParam::with_value(sample_rate, srr_freq_for_knob(srr1)),
            srr2: RuntimeParam::with_value(sample_rate, srr_freq_for_knob(srr2)),
            digr: RuntimeParam::with_value(sample_rate, digr),
            hash: RuntimeParam::with_value(sample_rate, hash),
            mix: RuntimeParam::with_value(sample_rate, mix),
        }
    }

    /// Block-rate update from the seven drive page knobs.
    pub fn read_params(&mut self, knobs: &[f32; 7]) {
        let [gain, shape, srr1, srr2, digr, hash, mix] = *knobs;

        self.srr1.set_target(srr_freq_for_knob(srr1));
        self.srr2.set_target(srr_freq_for_knob(srr2));
        self.digr.set_target(digr);
        self.hash.set_target(hash);
        self.mix.set_target(mix);

        let drive = self.frog.drive_mut();
        drive.set_gain(gain);
        drive.set_coefs(shape);
    }

    pub fn frog(&self) -> &FrogBlock {
        &self.frog
    }

    fn update_params(&mut self) {
        let srr1 = self.srr1.process();
        let srr2 = self.srr2.process();
        self.frog.set_srr_freqs(srr1, srr2);

        let reorganizer = self.frog.reorganizer_mut();
        reorganizer.set_flip(self.digr.process());
        reorganizer.set_hash(self.hash.process());

        self.frog.set_mix(self.mix.process());
    }
}

impl GraphNode for DriveStage {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.update_params();
        self.frog.process(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SAMPLE_RATE;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_srr_curve() {
        // Knob at zero is full rate, knob at one is the floor
        assert!(srr_freq_for_knob(0.0) >= 1.0);
        assert_abs_diff_eq!(srr_freq_for_knob(1.0), 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_silence_stays_silent() {
        let mut frog = FrogBlock::new(DEFAULT_SAMPLE_RATE);
        for _ in 0..1_000 {
            assert_abs_diff_eq!(frog.process(0.0), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_dry_mix_bypasses() {
        let mut frog = FrogBlock::new(DEFAULT_SAMPLE_RATE);
        frog.set_mix(0.0);
        frog.drive_mut().set_gain(1.0);
        frog.drive_mut().set_coefs(0.7);
        for i in 0..512 {
            let x = (i as f32 * 0.05).sin() * 0.8;
            assert_abs_diff_eq!(frog.process(x), x, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_clean_settings_soft_saturate() {
        let mut frog = FrogBlock::new(DEFAULT_SAMPLE_RATE);
        // Hold a DC level long enough for the anti-alias filter to settle
        let mut y = 0.0;
        for _ in 0..64 {
            y = frog.process(0.5);
        }
        let expected = (std::f32::consts::PI * 0.25).sin();
        assert_abs_diff_eq!(y, expected, epsilon = 1e-2);
    }

    #[test]
    fn test_drive_page_reaches_the_block() {
        let mut stage = DriveStage::new(DEFAULT_SAMPLE_RATE);
        stage.read_params(&[1.0, 0.0, 0.0, 0.0, 0.5, 1.0, 0.25]);
        // GAIN lands on the drive's target immediately
        assert_abs_diff_eq!(stage.frog().drive().gain_target(), 5.0, epsilon = 1e-4);

        for _ in 0..4_800 {
            stage.process(0.0);
        }
        let frog = stage.frog();
        assert_eq!(frog.reorganizer().flip(), 127);
        assert_eq!(frog.reorganizer().hash_bits(), 8);
        assert_abs_diff_eq!(frog.mix(), 0.25, epsilon = 1e-4);
    }

    #[test]
    fn test_heavy_drive_stays_in_range() {
        let mut stage = DriveStage::new(DEFAULT_SAMPLE_RATE);
        stage.read_params(&[1.0, 0.8, 0.3, 0.6, 0.4, 1.0, 1.0]);
        for i in 0..4_800 {
            let x = (i as f32 * 0.031).sin();
            let y = stage.process(x);
            assert!(y.is_finite());
            // The fold bounds the wet path; the reorganizer keeps up to half a
            // step of remainder on top of a hashed code.
            assert!(y.abs() <= 1.0 + 1.0 / 128.0 + 1e-4, "y = {}", y);
        }
    }

    #[test]
    fn test_reducer_holds_samples() {
        let mut stage = DriveStage::new(DEFAULT_SAMPLE_RATE);
        stage.read_params(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        // Let the SRR1 smoother settle at the floor rate
        for _ in 0..4_800 {
            stage.process(0.0);
        }

        let outputs: Vec<f32> = (0..200).map(|i| stage.process(i as f32 / 400.0)).collect();
        let changes = outputs.windows(2).filter(|p| p[0] != p[1]).count();
        assert!(changes <= 3, "{} changes at 0.01 cycles per sample", changes);
    }
}
