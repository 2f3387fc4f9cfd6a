//! Shared sine and cosine lookup tables.

use once_cell::sync::Lazy;
use std::f32::consts::TAU;

/// Number of points per cycle (a guard point is stored after the last one).
pub const TABLE_SIZE: usize = 1024;

static SINE: Lazy<WaveTable> = Lazy::new(|| WaveTable::from_fn(|phase| (TAU * phase).sin()));
static COSINE: Lazy<WaveTable> = Lazy::new(|| WaveTable::from_fn(|phase| (TAU * phase).cos()));

/// One cycle of a periodic function, read back with linear interpolation.
pub struct WaveTable {
    table: [f32; TABLE_SIZE + 1],
}

impl WaveTable {
    fn from_fn(f: impl Fn(f32) -> f32) -> Self {
        let mut table = [0.0; TABLE_SIZE + 1];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = f(i as f32 / TABLE_SIZE as f32);
        }
        Self { table }
    }

    pub fn sine() -> &'static WaveTable {
        &SINE
    }

    pub fn cosine() -> &'static WaveTable {
        &COSINE
    }

    /// Value at `phase` in [0, 1]; values outside are clamped to the cycle.
    #[inline]
    pub fn evaluate(&self, phase: f32) -> f32 {
        let position = phase.clamp(0.0, 1.0) * TABLE_SIZE as f32;
        let index = (position as usize).min(TABLE_SIZE - 1);
        let frac = position - index as f32;
        let a = self.table[index];
        let b = self.table[index + 1];
        a + (b - a) * frac
    }
}
