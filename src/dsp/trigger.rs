//! Schmitt trigger for turning a noisy gate level into clean rising edges.

/// Default thresholds for a 0..1 gate input.
pub const GATE_HIGH: f32 = 0.2;
pub const GATE_LOW: f32 = 0.1;

/// Rising-edge detector with hysteresis.
///
/// The trigger goes high once the input climbs above `high` and only re-arms
/// after it has fallen below `low`, so a level wobbling around one threshold
/// fires once rather than on every wobble.
#[derive(Debug, Clone, Copy)]
pub struct SchmidtTrigger {
    high: f32,
    low: f32,
    state: bool,
}

impl SchmidtTrigger {
    pub fn new(high: f32, low: f32) -> Self {
        debug_assert!(low <= high);
        Self {
            high,
            low,
            state: false,
        }
    }

    /// Feed one level; returns `true` only on the rising edge.
    #[inline]
    pub fn process(&mut self, level: f32) -> bool {
        if self.state {
            if level < self.low {
                self.state = false;
            }
            false
        } else if level > self.high {
            self.state = true;
            true
        } else {
            false
        }
    }

    pub fn is_high(&self) -> bool {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = false;
    }
}

impl Default for SchmidtTrigger {
    fn default() -> Self {
        Self::new(GATE_HIGH, GATE_LOW)
    }
}
