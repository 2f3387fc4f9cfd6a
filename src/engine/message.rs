use rtrb::{Consumer, Producer, RingBuffer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::controls::PageId;
use crate::dsp::trigger::SchmidtTrigger;

/// Messages from the control context to the audio context.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    /// Move a knob on a page.
    Knob { page: PageId, index: usize, value: f32 },
    /// A button press. Button 0 steps the modulator.
    Button(u8),
}

/// Button that steps the Marbles sequences.
pub const STEP_BUTTON: u8 = 0;

pub(crate) const CONTROL_QUEUE_SIZE: usize = 256;

pub(crate) fn control_channel() -> (ControlHandle, Consumer<ControlMessage>) {
    let (tx, rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE_SIZE);
    let handle = ControlHandle {
        tx,
        gate: SchmidtTrigger::default(),
    };
    (handle, rx)
}

/// Control-context side of the engine.
///
/// Owned by the control loop. Every call is a non-blocking push into a
/// single-producer, single-consumer queue that the engine drains at the start
/// of its next block. When the queue is full the message is dropped.
pub struct ControlHandle {
    tx: Producer<ControlMessage>,
    gate: SchmidtTrigger,
}

impl ControlHandle {
    pub fn send(&mut self, msg: ControlMessage) -> bool {
        match self.tx.push(msg) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(?msg, "control queue full, dropping message");
                false
            }
        }
    }

    pub fn knob(&mut self, page: PageId, index: usize, value: f32) -> bool {
        self.send(ControlMessage::Knob { page, index, value })
    }

    pub fn button(&mut self, button: u8) -> bool {
        self.send(ControlMessage::Button(button))
    }

    /// Feed the gate input level. A rising edge presses the step button.
    ///
    /// Returns whether this level produced an edge.
    pub fn gate(&mut self, level: f32) -> bool {
        if self.gate.process(level) {
            self.button(STEP_BUTTON);
            true
        } else {
            false
        }
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_edges_become_button_presses() {
        let (mut handle, mut rx) = control_channel();
        for &level in &[0.0, 0.8, 0.8, 0.0, 0.9] {
            handle.gate(level);
        }
        assert_eq!(rx.pop().ok(), Some(ControlMessage::Button(STEP_BUTTON)));
        assert_eq!(rx.pop().ok(), Some(ControlMessage::Button(STEP_BUTTON)));
        assert!(rx.pop().is_err());
    }

    #[test]
    fn test_full_queue_drops() {
        let (mut handle, _rx) = control_channel();
        for _ in 0..CONTROL_QUEUE_SIZE {
            assert!(handle.button(1));
        }
        assert_eq!(handle.slots(), 0);
        assert!(!handle.knob(PageId::Drive, 0, 0.5));
    }
}
