use crate::dsp::{
    curves::{exp_param, wrap_phase, zeroed_exp_param},
    one_pole::OnePole,
    smoother::RuntimeParam,
    wavetable::WaveTable,
};

/*
Polynomial Drive
================

A fifth-order polynomial waveshaper behind a gain stage:

    y = gain · (c0·x + c1·x² + c2·x³ + c3·x⁴ + c4·x⁵)

Nothing here clips. Large excursions are expected and are tamed downstream
by the sine fold in the frog block.

One Knob, Five Coefficients
---------------------------

The SHAPE knob drives all five coefficients at once. The knob is bent
through a zeroed exponential curve into a phase p, and each coefficient
reads the sine table at a different multiple of that phase:

    c0 = 1 + 10·sin(wrap(p · 1.000))
    c1 =     10·sin(wrap(p · 1.618 + 0.25·(gain − 1)))
    c2 =     10·sin(wrap(p · 2.718))
    c3 =     10·sin(wrap(p · 3.141 + 0.25·(gain − 1)))
    c4 =     10·sin(wrap(p · 4.669))

The multipliers are incommensurate, so as p sweeps the point (c0..c4) traces
a curve that never retraces itself and wanders through the whole
coefficient space instead of orbiting a small loop. The two gain offsets
make GAIN bend the shape as well as scale it.

At SHAPE = 0 the coefficients come out as [1, 0, 0, 0, 0] (for gain 1): the
polynomial is the identity.

Oversampling
------------

Polynomials of degree five produce harmonics up to five times the input
frequency. `Oversampler2x` runs any nonlinear closure at twice the rate:

    prev ─┐
          ├─ midpoint ─→ f ─→ lowpass ─┐ (discarded)
    x ────┴────────────→ f ─→ lowpass ─┴─→ output

The anti-alias low-pass sits at a natural frequency of 0.4 cycles per
oversampled sample. Only wrap nonlinear stages in it; a linear filter gains
nothing from oversampling.

The drive's own smoothers are ticked once per call of the wrapped closure,
so twice per audio sample. They are built at twice the sample rate to keep
their corner where every other smoother's is.
*/

/// Number of polynomial coefficients.
pub const NUM_COEFS: usize = 5;

/// Frequency multipliers of the coefficient curve.
const COEF_MULTIPLIERS: [f32; NUM_COEFS] = [1.0, 1.618, 2.718, 3.141, 4.669];

/// Coefficients whose phase is nudged by the gain.
const GAIN_NUDGED: [bool; NUM_COEFS] = [false, true, false, true, false];

const MAX_GAIN: f32 = 5.0;
const SHAPE_CURVE_BASE: f32 = 30.0;
const COEF_SCALE: f32 = 10.0;

/// Natural frequency of the anti-alias filter, in cycles per oversampled sample.
const ANTI_ALIAS_NAT_FREQ: f32 = 0.4;

/// Gain-staged fifth-order polynomial waveshaper.
pub struct PolynomialDrive {
    gain: RuntimeParam,
    coefs: [RuntimeParam; NUM_COEFS],
    sine: &'static WaveTable,
}

impl PolynomialDrive {
    /// `tick_rate` is the rate `process` will be called at (2× the sample
    /// rate inside an [`Oversampler2x`]).
    pub fn new(tick_rate: f32) -> Self {
        let mut coefs = [RuntimeParam::new(tick_rate); NUM_COEFS];
        coefs[0] = RuntimeParam::with_value(tick_rate, 1.0);

        Self {
            gain: RuntimeParam::with_value(tick_rate, 1.0),
            coefs,
            sine: WaveTable::sine(),
        }
    }

    /// Map the GAIN knob onto [1, 5].
    pub fn set_gain(&mut self, knob: f32) {
        self.gain.set_target(exp_param(1.0, MAX_GAIN, knob));
    }

    /// Map the SHAPE knob onto the five coefficients.
    ///
    /// Reads the gain target, so call [`set_gain`](Self::set_gain) first.
    pub fn set_coefs(&mut self, knob: f32) {
        let phase = zeroed_exp_param(SHAPE_CURVE_BASE, knob);
        let nudge = 0.25 * (self.gain.target() - 1.0);

        for (i, coef) in self.coefs.iter_mut().enumerate() {
            let mut coef_phase = phase * COEF_MULTIPLIERS[i];
            if GAIN_NUDGED[i] {
                coef_phase += nudge;
            }
            let bias = if i == 0 { 1.0 } else { 0.0 };
            coef.set_target(bias + COEF_SCALE * self.sine.evaluate(wrap_phase(coef_phase)));
        }
    }

    pub fn gain_target(&self) -> f32 {
        self.gain.target()
    }

    pub fn coef_targets(&self) -> [f32; NUM_COEFS] {
        std::array::from_fn(|i| self.coefs[i].target())
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let x2 = input * input;
        let x3 = x2 * input;
        let x4 = x3 * input;
        let x5 = x3 * x2;

        let [c0, c1, c2, c3, c4] = &mut self.coefs;
        self.gain.process()
            * (input * c0.process()
                + x2 * c1.process()
                + x3 * c2.process()
                + x4 * c3.process()
                + x5 * c4.process())
    }
}

/// Runs a nonlinear stage at twice the sample rate.
pub struct Oversampler2x {
    prev_input: f32,
    first_sample: bool,
    anti_alias: OnePole,
}

impl Oversampler2x {
    pub fn new() -> Self {
        let mut anti_alias = OnePole::new();
        anti_alias.set_alpha_from_nat_freq(ANTI_ALIAS_NAT_FREQ);

        Self {
            prev_input: 0.0,
            first_sample: true,
            anti_alias,
        }
    }

    /// Run `stage` on the interpolated midpoint and on `input`, low-pass both
    /// and keep the second.
    ///
    /// The very first call has no previous input, so it runs `stage` on
    /// `input` twice.
    #[inline]
    pub fn process<F>(&mut self, input: f32, mut stage: F) -> f32
    where
        F: FnMut(f32) -> f32,
    {
        let midpoint = if self.first_sample {
            self.first_sample = false;
            input
        } else {
            (self.prev_input + input) * 0.5
        };

        let first = stage(midpoint);
        let second = stage(input);
        self.anti_alias.process(first);
        let output = self.anti_alias.process(second);

        self.prev_input = input;
        output
    }
}

impl Default for Oversampler2x {
    fn default() -> Self {
        Self::new()
    }
}
