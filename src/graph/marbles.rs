use crate::dsp::{curves::exp_param, one_pole::OnePole, rng::UniformRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Marbles
=======

Two stepped random sequences, each eight "marbles" long, that move on
discrete triggers and are read through a slew filter every sample.

    trigger ──→ increment() ──→ index / slot rewrite     (event rate)
    sample  ──→ process()   ──→ slew(marbles[index])     (audio rate)

On each trigger, for each channel independently:

  1. Skip entirely with probability (1 − PROB). PROB is shared.
  2. DJV > 0.5:  jump to a random slot with probability 2·(DJV − 0.5),
                 otherwise advance to the next slot.
  3. DJV ≤ 0.5:  advance to the next slot, then with probability
                 2·(0.5 − DJV) overwrite it with a fresh random value.

    DJV  0.0 ──────────── 0.5 ──────────── 1.0
         always reseed    plain loop       always jump
         (never repeats)  (repeats SZ)     (shuffles SZ)

Only the first SZ = 2..8 slots take part in advancing and jumping. Shrinking
SZ leaves the index where it is until the next advance wraps it.

Every mutation happens inside `increment`, and `increment` is only ever
called between two `process` calls on the same thread. The engine enforces
this by queueing triggers from the control context and draining the queue at
block start, so a read never sees an index paired with a slot that was not
current at the same time.

Page knobs
----------

  PROB  DJV1  SZ1  SLW1  DJV2  SZ2  SLW2

  SZ   →  2 + round(k · 6)
  SLW  →  slew natural frequency exp(0.05 Hz .. 10 kHz) over 1 − k,
          so a higher knob means a slower glide
*/

/// Slots per channel.
pub const NUM_MARBLES: usize = 8;
/// Number of independent channels.
pub const NUM_CHANNELS: usize = 2;
/// Smallest active sequence length.
pub const MIN_SIZE: usize = 2;

/// Marbles page knob labels, in page order.
pub const MARBLES_LABELS: [&str; 7] = ["PROB", "DJV1", "SZ1", "SLW1", "DJV2", "SZ2", "SLW2"];

/// Marbles page knob values at power-up.
pub const MARBLES_DEFAULT_KNOBS: [f32; 7] = [1.0, 0.5, 1.0, 0.0, 0.5, 1.0, 0.0];

const SLEW_MIN_HZ: f32 = 0.05;
const SLEW_MAX_HZ: f32 = 10_000.0;
const INITIAL_PROBABILITY: f32 = 0.5;

/// What a trigger did to one channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The probability gate swallowed the trigger.
    Skipped,
    /// Moved to the next slot.
    Advanced,
    /// Moved to the next slot and gave it a new value.
    Reseeded,
    /// Moved to a random slot.
    Jumped,
}

#[derive(Debug, Clone)]
struct Channel {
    marbles: [f32; NUM_MARBLES],
    size: usize,
    index: usize,
    deja_vu: f32,
    slew: OnePole,
}

impl Channel {
    fn new(rng: &mut UniformRng) -> Self {
        Self {
            marbles: std::array::from_fn(|_| rng.uni_gen_range(0.0, 1.0)),
            size: NUM_MARBLES,
            index: 0,
            deja_vu: 0.5,
            slew: OnePole::new(),
        }
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.size;
    }

    fn step(&mut self, rng: &mut UniformRng) -> Step {
        if self.deja_vu > 0.5 {
            if rng.uni_gen() < 2.0 * (self.deja_vu - 0.5) {
                self.index = rng.range_gen(self.size);
                Step::Jumped
            } else {
                self.advance();
                Step::Advanced
            }
        } else {
            self.advance();
            if rng.uni_gen() < 2.0 * (0.5 - self.deja_vu) {
                self.marbles[self.index] = rng.uni_gen_range(0.0, 1.0);
                Step::Reseeded
            } else {
                Step::Advanced
            }
        }
    }
}

/// Two-channel probabilistic stepped modulator.
#[derive(Debug, Clone)]
pub struct Marbles {
    channels: [Channel; NUM_CHANNELS],
    probability: f32,
    rng: UniformRng,
    sample_rate: f32,
}

impl Marbles {
    /// Marbles seeded from OS entropy.
    pub fn new(sample_rate: f32) -> Self {
        Self::from_rng(sample_rate, UniformRng::new())
    }

    /// Marbles with a reproducible sequence of decisions.
    pub fn with_seed(sample_rate: f32, seed: u64) -> Self {
        Self::from_rng(sample_rate, UniformRng::with_seed(seed))
    }

    fn from_rng(sample_rate: f32, mut rng: UniformRng) -> Self {
        let channels = [Channel::new(&mut rng), Channel::new(&mut rng)];
        let mut marbles = Self {
            channels,
            probability: INITIAL_PROBABILITY,
            rng,
            sample_rate,
        };
        for channel in 0..NUM_CHANNELS {
            marbles.set_slew(channel, MARBLES_DEFAULT_KNOBS[3]);
        }
        marbles
    }

    /// Shared trigger probability, from the PROB knob.
    pub fn set_probability(&mut self, probability: f32) {
        self.probability = probability;
    }

    pub fn set_deja_vu(&mut self, channel: usize, knob: f32) {
        self.channels[channel].deja_vu = knob;
    }

    /// Active length from the SZ knob: `2 + round(k · 6)`.
    pub fn set_size(&mut self, channel: usize, knob: f32) {
        let extra = (knob.clamp(0.0, 1.0) * (NUM_MARBLES - MIN_SIZE) as f32).round() as usize;
        self.channels[channel].size = MIN_SIZE + extra;
    }

    /// Slew cutoff from the SLW knob; higher knob, slower glide.
    pub fn set_slew(&mut self, channel: usize, knob: f32) {
        let nat_freq = exp_param(
            SLEW_MIN_HZ / self.sample_rate,
            SLEW_MAX_HZ / self.sample_rate,
            1.0 - knob,
        );
        self.channels[channel].slew.set_alpha_from_nat_freq(nat_freq);
    }

    /// Block-rate update from the seven marbles page knobs.
    pub fn read_params(&mut self, knobs: &[f32; 7]) {
        let [prob, djv1, sz1, slw1, djv2, sz2, slw2] = *knobs;

        self.set_probability(prob);
        self.set_deja_vu(0, djv1);
        self.set_size(0, sz1);
        self.set_slew(0, slw1);
        self.set_deja_vu(1, djv2);
        self.set_size(1, sz2);
        self.set_slew(1, slw2);
    }

    /// Step both channels once. Called on every trigger.
    pub fn increment(&mut self) -> [Step; NUM_CHANNELS] {
        let mut steps = [Step::Skipped; NUM_CHANNELS];

        for (channel, step) in self.channels.iter_mut().zip(steps.iter_mut()) {
            if self.rng.uni_gen() >= self.probability {
                continue;
            }
            *step = channel.step(&mut self.rng);
        }

        steps
    }

    /// Advance both slew filters one sample and return the smoothed outputs.
    #[inline]
    pub fn process(&mut self) -> [f32; NUM_CHANNELS] {
        let [a, b] = &mut self.channels;
        [
            a.slew.process(a.marbles[a.index]),
            b.slew.process(b.marbles[b.index]),
        ]
    }

    /// Unsmoothed value of the current slot.
    pub fn current(&self, channel: usize) -> f32 {
        let ch = &self.channels[channel];
        ch.marbles[ch.index]
    }

    pub fn index(&self, channel: usize) -> usize {
        self.channels[channel].index
    }

    pub fn size(&self, channel: usize) -> usize {
        self.channels[channel].size
    }

    pub fn slots(&self, channel: usize) -> &[f32; NUM_MARBLES] {
        &self.channels[channel].marbles
    }

    /// Last smoothed output, without advancing.
    pub fn output(&self, channel: usize) -> f32 {
        self.channels[channel].slew.value()
    }
}
