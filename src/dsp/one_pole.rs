use crate::dsp::curves::alpha_from_nat_freq;

/// One-pole low-pass filter: `y += alpha · (x − y)`.
///
/// Alpha of 1 passes the input straight through; smaller values smooth more.
#[derive(Debug, Clone, Copy)]
pub struct OnePole {
    alpha: f32,
    state: f32,
}

impl OnePole {
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            state: 0.0,
        }
    }

    /// Filter with its output already settled at `value`.
    pub fn with_state(alpha: f32, value: f32) -> Self {
        Self {
            alpha,
            state: value,
        }
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Set alpha from a natural frequency in cycles per sample.
    pub fn set_alpha_from_nat_freq(&mut self, nat_freq: f32) {
        self.alpha = alpha_from_nat_freq(nat_freq);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state += self.alpha * (input - self.state);
        self.state
    }

    pub fn value(&self) -> f32 {
        self.state
    }
}

impl Default for OnePole {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_transparent() {
        let mut filter = OnePole::new();
        assert_relative_eq!(filter.process(0.7), 0.7);
        assert_relative_eq!(filter.process(-0.2), -0.2);
        assert_relative_eq!(filter.process(0.9), 0.9);
    }

    #[test]
    fn test_settled_state_is_exact() {
        // Smoothers rely on a settled value not drifting by an ulp
        let mut filter = OnePole::with_state(0.37, 0.123_456);
        for _ in 0..1_000 {
            assert_eq!(filter.process(0.123_456), 0.123_456);
        }
    }

    #[test]
    fn test_smooths_step() {
        let mut filter = OnePole::new();
        filter.set_alpha_from_nat_freq(100.0 / 48_000.0);

        let first = filter.process(1.0);
        assert!(first > 0.0 && first < 0.1);

        for _ in 0..48_000 {
            filter.process(1.0);
        }
        assert!((filter.value() - 1.0).abs() < 1e-4);
    }
}
