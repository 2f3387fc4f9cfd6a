use std::sync::atomic::{AtomicU32, Ordering};

/// Lock-free f32 cell.
///
/// Uses AtomicU32 internally since there's no native AtomicF32.
/// Suitable for real-time audio thread communication.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// The two Marbles outputs, published by the audio thread once per block.
///
/// Readers on other threads see each channel's latest block-end value. The
/// two channels are independent cells, so a reader may see one channel from
/// a newer block than the other.
#[derive(Debug, Default)]
pub struct ModulationTap {
    channels: [AtomicF32; 2],
}

impl ModulationTap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, values: [f32; 2]) {
        for (cell, value) in self.channels.iter().zip(values) {
            cell.set(value);
        }
    }

    pub fn get(&self, channel: usize) -> f32 {
        self.channels[channel].get()
    }

    pub fn snapshot(&self) -> [f32; 2] {
        [self.get(0), self.get(1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_atomic_f32_round_trips_bits() {
        let cell = AtomicF32::new(0.25);
        assert_eq!(cell.get(), 0.25);
        cell.set(-1.5e-7);
        assert_eq!(cell.get(), -1.5e-7);
    }

    #[test]
    fn test_tap_visible_across_threads() {
        let tap = Arc::new(ModulationTap::new());
        let writer = Arc::clone(&tap);
        std::thread::spawn(move || writer.publish([0.1, 0.9]))
            .join()
            .expect("writer thread");
        assert_eq!(tap.snapshot(), [0.1, 0.9]);
    }
}
