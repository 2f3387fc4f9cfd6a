use crate::config::Topology;
use crate::dsp::{
    curves::{alpha_from_nat_freq, exp_param},
    delay::{Comb, PureDelay},
    smoother::RuntimeParam,
};
use crate::graph::{
    eq::{Eq, ResonantBump},
    node::GraphNode,
};

/*
Tone Stages
===========

Everything after the frog block is one of two interchangeable chains, chosen
when the engine is built:

    CombEq     (A):  comb → eq
    DelayBump  (B):  pure delay → comb → bump

Each owns the seven knobs of the filter page. Once per block
`read_params` maps the knobs to physical values and sets smoother targets;
every sample the smoothers advance and their values are pushed into the
filters before the sample runs through them. `new` pushes the starting
values once, so a fresh stage already matches its default knobs.

Filter page, A
--------------

| knob | maps to                                           |
| ---- | ------------------------------------------------- |
| EQLW | low shelf gain,  exp 0.0631..3.981 (−24..+12 dB)  |
| EQLM | low-mid gain,    same                              |
| EQHM | high-mid gain,   same                              |
| EQHI | high shelf gain, same                              |
| COMF | comb frequency,  exp 20 Hz..10 kHz                |
| COMQ | comb feedback,   −1.1..0..+1.1                    |
| CMLP | comb loop low-pass, exp 20 Hz..20 kHz             |

Knob 0.6667 on an EQ band is (very nearly) unity gain.

Filter page, B
--------------

| knob | maps to                                  |
| ---- | ---------------------------------------- |
| FREQ | bump center, exp 20 Hz..20 kHz           |
| HGHT | bump height, exp 1..10 (0..+20 dB)       |
| WDTH | bump Q,      exp 0.1..10                 |
| DLAY | pure delay,  exp 1..150 ms               |
| COMF | as A                                     |
| COMQ | as A                                     |
| CMLP | as A                                     |

HGHT at 0 leaves the bump transparent.
*/

/// The capability every post-drive chain provides.
pub trait ToneStage: GraphNode + Sized {
    /// The topology this stage implements.
    const TOPOLOGY: Topology;
    /// Filter page knob labels, in page order.
    const LABELS: [&'static str; 7];
    /// Filter page knob values at power-up.
    const DEFAULT_KNOBS: [f32; 7];

    fn new(sample_rate: f32) -> Self;

    /// Block-rate update from the seven filter page knobs.
    fn read_params(&mut self, knobs: &[f32; 7]);
}

const EQ_MIN_GAIN: f32 = 0.0631;
const EQ_MAX_GAIN: f32 = 3.981;
/// EQ knob position for (very nearly) unity gain.
pub const EQ_FLAT_KNOB: f32 = 0.6667;

const COMB_MIN_HZ: f32 = 20.0;
const COMB_MAX_HZ: f32 = 10_000.0;
const LOOP_LP_MIN_HZ: f32 = 20.0;
const LOOP_LP_MAX_HZ: f32 = 20_000.0;

/// Comb smoothers shared by both topologies: COMF, COMQ, CMLP.
struct CombControls {
    freq: RuntimeParam,
    feedback: RuntimeParam,
    loop_alpha: RuntimeParam,
    sample_rate: f32,
}

impl CombControls {
    fn new(sample_rate: f32, [comf, comq, cmlp]: [f32; 3]) -> Self {
        let (freq, feedback, loop_alpha) = map_comb_knobs(sample_rate, comf, comq, cmlp);
        Self {
            freq: RuntimeParam::with_value(sample_rate, freq),
            feedback: RuntimeParam::with_value(sample_rate, feedback),
            loop_alpha: RuntimeParam::with_value(sample_rate, loop_alpha),
            sample_rate,
        }
    }

    fn read_params(&mut self, comf: f32, comq: f32, cmlp: f32) {
        let (freq, feedback, loop_alpha) = map_comb_knobs(self.sample_rate, comf, comq, cmlp);
        self.freq.set_target(freq);
        self.feedback.set_target(feedback);
        self.loop_alpha.set_target(loop_alpha);
    }

    /// Hand the current smoothed values to the comb without advancing them.
    fn apply(&self, comb: &mut Comb) {
        comb.set_delay_samples(Comb::delay_samples_for(self.freq.value()));
        comb.set_feedback(self.feedback.value());
        comb.set_cutoff_alpha(self.loop_alpha.value());
    }

    /// Advance the three smoothers one sample.
    #[inline]
    fn tick(&mut self) {
        self.freq.process();
        self.feedback.process();
        self.loop_alpha.process();
    }
}

/// Comb frequency (cycles per sample), feedback and loop alpha.
fn map_comb_knobs(sample_rate: f32, comf: f32, comq: f32, cmlp: f32) -> (f32, f32, f32) {
    let freq = exp_param(COMB_MIN_HZ / sample_rate, COMB_MAX_HZ / sample_rate, comf);
    let feedback = Comb::feedback_for_knob(comq);
    let loop_nat_freq = exp_param(LOOP_LP_MIN_HZ / sample_rate, LOOP_LP_MAX_HZ / sample_rate, cmlp);
    (freq, feedback, alpha_from_nat_freq(loop_nat_freq))
}

fn eq_gain_for_knob(knob: f32) -> f32 {
    exp_param(EQ_MIN_GAIN, EQ_MAX_GAIN, knob)
}

/// Topology A: comb into a four-band EQ.
pub struct CombEq {
    eq_gains: [RuntimeParam; 4],
    comb_controls: CombControls,
    comb: Comb,
    eq: Eq,
}

impl CombEq {
    pub fn eq(&self) -> &Eq {
        &self.eq
    }

    pub fn comb(&self) -> &Comb {
        &self.comb
    }

    fn apply(&mut self) {
        let [low, low_mid, high_mid, high] = &self.eq_gains;
        self.eq.set_low_gain(low.value());
        self.eq.set_low_mid_gain(low_mid.value());
        self.eq.set_high_mid_gain(high_mid.value());
        self.eq.set_high_gain(high.value());
        self.comb_controls.apply(&mut self.comb);
    }
}

impl ToneStage for CombEq {
    const TOPOLOGY: Topology = Topology::CombEq;
    const LABELS: [&'static str; 7] = ["EQLW", "EQLM", "EQHM", "EQHI", "COMF", "COMQ", "CMLP"];
    const DEFAULT_KNOBS: [f32; 7] = [EQ_FLAT_KNOB, EQ_FLAT_KNOB, EQ_FLAT_KNOB, EQ_FLAT_KNOB, 0.5, 0.5, 1.0];

    fn new(sample_rate: f32) -> Self {
        let [lw, lm, hm, hi, comf, comq, cmlp] = Self::DEFAULT_KNOBS;
        let eq_gains = [lw, lm, hm, hi].map(|k| RuntimeParam::with_value(sample_rate, eq_gain_for_knob(k)));

        let mut stage = Self {
            eq_gains,
            comb_controls: CombControls::new(sample_rate, [comf, comq, cmlp]),
            comb: Comb::new(),
            eq: Eq::new(sample_rate),
        };
        stage.apply();
        stage
    }

    fn read_params(&mut self, knobs: &[f32; 7]) {
        for (param, &knob) in self.eq_gains.iter_mut().zip(knobs[..4].iter()) {
            param.set_target(eq_gain_for_knob(knob));
        }
        self.comb_controls.read_params(knobs[4], knobs[5], knobs[6]);
    }
}

impl GraphNode for CombEq {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        for gain in self.eq_gains.iter_mut() {
            gain.process();
        }
        self.comb_controls.tick();
        self.apply();

        let output = self.comb.process(input);
        self.eq.process(output)
    }
}

const BUMP_MIN_HZ: f32 = 20.0;
const BUMP_MAX_HZ: f32 = 20_000.0;
const BUMP_MAX_HEIGHT: f32 = 10.0;
const BUMP_MIN_WIDTH: f32 = 0.1;
const BUMP_MAX_WIDTH: f32 = 10.0;
const DELAY_MIN_MS: f32 = 1.0;
const DELAY_MAX_MS: f32 = 150.0;

fn delay_samples_for_knob(sample_rate: f32, knob: f32) -> f32 {
    exp_param(DELAY_MIN_MS, DELAY_MAX_MS, knob) * 0.001 * sample_rate
}

/// Topology B: pure delay into a comb into a resonant bump.
pub struct DelayBump {
    bump_freq: RuntimeParam,
    bump_height: RuntimeParam,
    bump_width: RuntimeParam,
    delay_time: RuntimeParam,
    comb_controls: CombControls,
    delay: PureDelay,
    comb: Comb,
    bump: ResonantBump,
    sample_rate: f32,
}

impl DelayBump {
    fn map_bump(knobs: [f32; 3]) -> [f32; 3] {
        let [freq, height, width] = knobs;
        [
            exp_param(BUMP_MIN_HZ, BUMP_MAX_HZ, freq),
            exp_param(1.0, BUMP_MAX_HEIGHT, height),
            exp_param(BUMP_MIN_WIDTH, BUMP_MAX_WIDTH, width),
        ]
    }

    pub fn delay(&self) -> &PureDelay {
        &self.delay
    }

    pub fn comb(&self) -> &Comb {
        &self.comb
    }

    pub fn bump(&self) -> &ResonantBump {
        &self.bump
    }

    fn apply(&mut self) {
        self.bump.set_freq(self.bump_freq.value());
        self.bump.set_height(self.bump_height.value());
        self.bump.set_width(self.bump_width.value());
        self.delay.set_delay_samples(self.delay_time.value());
        self.comb_controls.apply(&mut self.comb);
    }
}

impl ToneStage for DelayBump {
    const TOPOLOGY: Topology = Topology::DelayBump;
    const LABELS: [&'static str; 7] = ["FREQ", "HGHT", "WDTH", "DLAY", "COMF", "COMQ", "CMLP"];
    const DEFAULT_KNOBS: [f32; 7] = [0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 1.0];

    fn new(sample_rate: f32) -> Self {
        let [freq, height, width, dlay, comf, comq, cmlp] = Self::DEFAULT_KNOBS;
        let [freq, height, width] = Self::map_bump([freq, height, width]);
        let delay_samples = delay_samples_for_knob(sample_rate, dlay);

        let mut stage = Self {
            bump_freq: RuntimeParam::with_value(sample_rate, freq),
            bump_height: RuntimeParam::with_value(sample_rate, height),
            bump_width: RuntimeParam::with_value(sample_rate, width),
            delay_time: RuntimeParam::with_value(sample_rate, delay_samples),
            comb_controls: CombControls::new(sample_rate, [comf, comq, cmlp]),
            delay: PureDelay::new(),
            comb: Comb::new(),
            bump: ResonantBump::new(sample_rate),
            sample_rate,
        };
        stage.apply();
        stage
    }

    fn read_params(&mut self, knobs: &[f32; 7]) {
        let [freq, height, width] = Self::map_bump([knobs[0], knobs[1], knobs[2]]);
        self.bump_freq.set_target(freq);
        self.bump_height.set_target(height);
        self.bump_width.set_target(width);
        self.delay_time
            .set_target(delay_samples_for_knob(self.sample_rate, knobs[3]));
        self.comb_controls.read_params(knobs[4], knobs[5], knobs[6]);
    }
}

impl GraphNode for DelayBump {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.bump_freq.process();
        self.bump_height.process();
        self.bump_width.process();
        self.delay_time.process();
        self.comb_controls.tick();
        self.apply();

        let output = self.delay.process(input);
        let output = self.comb.process(output);
        self.bump.process(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SAMPLE_RATE;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_flat_knob_is_near_unity() {
        assert_abs_diff_eq!(eq_gain_for_knob(EQ_FLAT_KNOB), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_comb_eq_silence() {
        let mut stage = CombEq::new(DEFAULT_SAMPLE_RATE);
        stage.read_params(&CombEq::DEFAULT_KNOBS);
        for _ in 0..4_800 {
            assert_eq!(stage.process(0.0), 0.0);
        }
    }

    #[test]
    fn test_comb_eq_defaults_have_no_feedback() {
        let stage = CombEq::new(DEFAULT_SAMPLE_RATE);
        assert_abs_diff_eq!(stage.comb().feedback(), 0.0);
        let gains = stage.eq().gains();
        assert!(gains.iter().all(|g| (g - 1.0).abs() < 1e-3));
    }

    #[test]
    fn test_comb_eq_delay_follows_comf() {
        let mut stage = CombEq::new(DEFAULT_SAMPLE_RATE);
        let mut knobs = CombEq::DEFAULT_KNOBS;
        knobs[4] = 0.0;
        stage.read_params(&knobs);
        for _ in 0..4_800 {
            stage.process(0.0);
        }
        // 20 Hz at 48 kHz is 2400 samples
        let delay = stage.comb().delay_samples();
        assert!((2_390..=2_400).contains(&delay), "delay = {}", delay);
    }

    #[test]
    fn test_delay_bump_defaults_are_transparent_bump() {
        let stage = DelayBump::new(DEFAULT_SAMPLE_RATE);
        assert_abs_diff_eq!(stage.bump().height(), 1.0);
        // 0.5 on the delay knob is the geometric mean of 1 and 150 ms
        let expected = (150.0f32).sqrt() * 0.001 * DEFAULT_SAMPLE_RATE;
        assert_abs_diff_eq!(stage.delay().delay_samples(), expected, epsilon = 0.5);
    }

    #[test]
    fn test_delay_bump_delays_an_impulse() {
        let mut stage = DelayBump::new(DEFAULT_SAMPLE_RATE);
        let delay = stage.delay().delay_samples();

        let mut first_nonzero = None;
        for i in 0..2_000 {
            let y = stage.process(if i == 0 { 1.0 } else { 0.0 });
            if y.abs() > 1e-6 && first_nonzero.is_none() {
                first_nonzero = Some(i);
            }
        }
        let first = first_nonzero.expect("impulse came through");
        assert!((first as f32 - delay).abs() <= 1.0, "first {} delay {}", first, delay);
    }

    #[test]
    fn test_fresh_stages_match_default_knobs() {
        let sr = DEFAULT_SAMPLE_RATE;
        let comb_delay = Comb::delay_samples_for(exp_param(20.0 / sr, 10_000.0 / sr, 0.5));

        let a = CombEq::new(sr);
        assert_eq!(a.comb().delay_samples(), comb_delay as usize);

        let b = DelayBump::new(sr);
        assert_eq!(b.comb().delay_samples(), comb_delay as usize);
        assert_abs_diff_eq!(b.bump().freq_hz(), exp_param(20.0, 20_000.0, 0.5), epsilon = 1e-2);
        assert_abs_diff_eq!(
            b.delay().delay_samples(),
            delay_samples_for_knob(sr, 0.5),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_delay_bump_extreme_knobs_stay_finite() {
        let mut stage = DelayBump::new(DEFAULT_SAMPLE_RATE);
        stage.read_params(&[1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        for i in 0..48_000 {
            let x = if i % 97 == 0 { 1.0 } else { 0.0 };
            assert!(stage.process(x).is_finite());
        }
    }
}
