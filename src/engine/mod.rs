//! The complete effect: drive stage, tone stage and modulator behind one
//! block-processing entry point.

pub mod message;
pub mod modulation;

use std::sync::Arc;

use rtrb::Consumer;

use crate::config::{ConfigError, EngineConfig};
use crate::controls::{read_page, ControlSource, KnobPages, PageId};
use crate::graph::{
    frog::DriveStage,
    marbles::{Marbles, Step, NUM_CHANNELS},
    node::GraphNode,
    tone::ToneStage,
};

pub use message::{ControlHandle, ControlMessage, STEP_BUTTON};
pub use modulation::{AtomicF32, ModulationTap};

/*
Engine
======

    control thread                         audio thread
    ──────────────                         ────────────
    ControlHandle ──(rtrb queue)──→ process_block():
                                     1. drain queue (knobs, count presses)
                                     2. read all three knob pages once
                                     3. replay presses: marbles.increment()
                                     4. per sample:
                                          marbles.process()
                                          drive stage → tone stage
                                          left = output, right = 0
                                     5. publish Marbles outputs

Every piece of DSP state is owned by the engine and only touched from
`process_block`. The queue is the one thing the two threads share, which is
what keeps a Marbles step from ever landing in the middle of a read.

Only the first output channel carries signal. The second is always written
with silence.
*/

/// The effect engine, generic over its tone stage.
pub struct Froggers<T: ToneStage> {
    drive: DriveStage,
    tone: T,
    marbles: Marbles,
    knobs: KnobPages,
    rx: Consumer<ControlMessage>,
    modulation: Arc<ModulationTap>,
    last_steps: [Step; NUM_CHANNELS],
    steps_taken: u64,
    sample_rate: f32,
    block_size: usize,
}

impl<T: ToneStage> Froggers<T> {
    /// Build the engine and the handle the control context drives it with.
    pub fn new(config: &EngineConfig) -> Result<(Self, ControlHandle), ConfigError> {
        config.validate()?;
        if config.topology != T::TOPOLOGY {
            return Err(ConfigError::TopologyMismatch {
                expected: T::TOPOLOGY,
                found: config.topology,
            });
        }

        let sample_rate = config.sample_rate;
        let marbles = match config.seed {
            Some(seed) => Marbles::with_seed(sample_rate, seed),
            None => Marbles::new(sample_rate),
        };
        let (handle, rx) = message::control_channel();

        tracing::debug!(
            topology = %T::TOPOLOGY,
            sample_rate,
            block_size = config.block_size,
            seed = ?config.seed,
            "building engine"
        );

        let engine = Self {
            drive: DriveStage::new(sample_rate),
            tone: T::new(sample_rate),
            marbles,
            knobs: KnobPages::for_stage::<T>(),
            rx,
            modulation: Arc::new(ModulationTap::new()),
            last_steps: [Step::Skipped; NUM_CHANNELS],
            steps_taken: 0,
            sample_rate,
            block_size: config.block_size,
        };

        Ok((engine, handle))
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size the engine was configured for.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The knob pages the engine reads from.
    pub fn knobs(&self) -> &KnobPages {
        &self.knobs
    }

    /// Direct access to the knob pages, for callers that own the engine on
    /// the control thread (tests, offline rendering).
    pub fn knobs_mut(&mut self) -> &mut KnobPages {
        &mut self.knobs
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    pub fn marbles(&self) -> &Marbles {
        &self.marbles
    }

    /// Shared cell the Marbles outputs are published to.
    pub fn modulation(&self) -> Arc<ModulationTap> {
        Arc::clone(&self.modulation)
    }

    /// What the most recent step did to each channel.
    pub fn last_steps(&self) -> [Step; NUM_CHANNELS] {
        self.last_steps
    }

    /// Number of step button presses handled so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Step the Marbles sequences now.
    pub fn button(&mut self, button: u8) {
        if button == STEP_BUTTON {
            self.last_steps = self.marbles.increment();
            self.steps_taken += 1;
        }
    }

    /// Apply queued knob moves and return the step presses to replay once
    /// the block's knobs have been read.
    fn drain_messages(&mut self) -> usize {
        let mut presses = 0;
        while let Ok(msg) = self.rx.pop() {
            match msg {
                ControlMessage::Knob { page, index, value } => self.knobs.set(page, index, value),
                ControlMessage::Button(STEP_BUTTON) => presses += 1,
                ControlMessage::Button(_) => {}
            }
        }
        presses
    }

    /// Block-rate update: map every knob and set smoother targets.
    pub fn read_params_block<C: ControlSource + ?Sized>(&mut self, controls: &C) {
        self.tone.read_params(&read_page(controls, PageId::Filter));
        self.drive.read_params(&read_page(controls, PageId::Drive));
        self.marbles.read_params(&read_page(controls, PageId::Marbles));
    }

    /// Process one sample. Parameters keep gliding toward their last targets.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.marbles.process();
        let output = self.drive.process(input);
        self.tone.process(output)
    }

    /// Process one block: drain control messages, read the knobs once, step
    /// Marbles for every queued press, then run every sample. `right` is
    /// always filled with silence.
    pub fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(input.len(), left.len());
        debug_assert_eq!(input.len(), right.len());

        let presses = self.drain_messages();
        let knobs = self.knobs;
        self.read_params_block(&knobs);
        for _ in 0..presses {
            self.button(STEP_BUTTON);
        }

        for ((&x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            *l = self.process(x);
            *r = 0.0;
        }

        self.modulation
            .publish([self.marbles.output(0), self.marbles.output(1)]);
    }
}
