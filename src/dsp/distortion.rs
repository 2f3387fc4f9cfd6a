//! Saturation inside feedback loops.
//!
//! A feedback path with gain above 1 grows without bound unless something in
//! the loop compresses large values. A tanh-shaped saturator does exactly that
//! while leaving small signals alone:
//!
//! ```text
//! f(x) = tanh(drive · x) / drive
//!
//!   slope at 0:   1          (small signals pass unchanged)
//!   asymptote:    ±1 / drive (nothing ever leaves this band)
//! ```
//!
//! Dividing by `drive` keeps the small-signal gain at unity, so lowering
//! `drive` raises the ceiling instead of the level. The comb filter runs its
//! feedback through a saturator with drive 0.5, bounding each pass to ±2.

/// Unity-slope tanh saturator.
#[derive(Debug, Clone, Copy)]
pub struct TanhSaturator {
    drive: f32,
}

impl TanhSaturator {
    pub fn new(drive: f32) -> Self {
        Self {
            drive: drive.max(1e-3),
        }
    }

    /// Largest magnitude the saturator can output.
    pub fn ceiling(&self) -> f32 {
        1.0 / self.drive
    }

    #[inline]
    pub fn process(&self, input: f32) -> f32 {
        (self.drive * input).tanh() / self.drive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_signals_pass_nearly_unchanged() {
        let sat = TanhSaturator::new(0.5);
        let output = sat.process(0.01);
        assert!((output - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_output_never_exceeds_ceiling() {
        let sat = TanhSaturator::new(0.5);
        for &x in &[1.0, 10.0, 1e3, -1e6] {
            assert!(sat.process(x).abs() <= sat.ceiling());
        }
        assert!((sat.ceiling() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_odd_symmetry() {
        let sat = TanhSaturator::new(0.5);
        assert!((sat.process(0.8) + sat.process(-0.8)).abs() < 1e-6);
    }
}
