//! Knob curves: mapping a normalized control value to a physical range.

/*
Knob Curves
===========

Every knob on the instrument produces a value in [0, 1]. Almost nothing in the
signal chain wants a linear [0, 1] though: frequencies, gains and Q factors
are perceived logarithmically, so the knob is bent through an exponential
curve before it reaches the DSP.

  exp_param(lo, hi, k)      = lo · (hi / lo)^k

      k = 0   → lo
      k = 0.5 → geometric mean of lo and hi
      k = 1   → hi

  zeroed_exp_param(base, k) = (base^k − 1) / (base − 1)

      Passes through 0 at k = 0 and 1 at k = 1, which an exp_param curve can
      never do (it would need lo = 0). base > 1 bends the curve down (slow
      start, fast finish), base < 1 bends it up, base = 1 is a straight line.

Natural Frequency to Alpha
--------------------------

One-pole smoothers are parameterized by alpha, the fraction of the remaining
distance covered per sample. For a natural frequency f in cycles per sample:

    alpha = 1 − e^(−2π·f)

f = 1000 / 48000 gives alpha ≈ 0.123; f ≥ 0.5 is already close to 1 (no
smoothing).
*/

use std::f32::consts::TAU;

/// Exponential knob curve from `lo` (knob = 0) to `hi` (knob = 1).
#[inline]
pub fn exp_param(lo: f32, hi: f32, knob: f32) -> f32 {
    lo * (hi / lo).powf(knob)
}

/// Exponential knob curve pinned to 0 at knob = 0 and 1 at knob = 1.
#[inline]
pub fn zeroed_exp_param(base: f32, knob: f32) -> f32 {
    if (base - 1.0).abs() < f32::EPSILON {
        return knob;
    }

    (base.powf(knob) - 1.0) / (base - 1.0)
}

/// One-pole coefficient for a natural frequency in cycles per sample.
#[inline]
pub fn alpha_from_nat_freq(nat_freq: f32) -> f32 {
    1.0 - (-TAU * nat_freq).exp()
}

/// Wrap a phase into [0, 1).
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    phase - phase.floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_param_endpoints() {
        assert_relative_eq!(exp_param(1.0, 5.0, 0.0), 1.0);
        assert_relative_eq!(exp_param(1.0, 5.0, 1.0), 5.0, epsilon = 1e-5);
        // Midpoint is the geometric mean
        assert_relative_eq!(exp_param(1.0, 100.0, 0.5), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_eq_gain_curve_is_flat_near_two_thirds() {
        let gain = exp_param(0.0631, 3.981, 0.6667);
        assert!((gain - 1.0).abs() < 0.01, "gain at flat knob = {}", gain);
    }

    #[test]
    fn test_zeroed_exp_param_endpoints() {
        for &base in &[0.25, 10.0, 30.0] {
            assert_relative_eq!(zeroed_exp_param(base, 0.0), 0.0);
            assert_relative_eq!(zeroed_exp_param(base, 1.0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zeroed_exp_param_curvature() {
        // base > 1 sags below the diagonal, base < 1 bulges above it
        assert!(zeroed_exp_param(10.0, 0.5) < 0.5);
        assert!(zeroed_exp_param(0.25, 0.5) > 0.5);
        assert_relative_eq!(zeroed_exp_param(1.0, 0.3), 0.3);
    }

    #[test]
    fn test_alpha_from_nat_freq() {
        assert_relative_eq!(alpha_from_nat_freq(0.0), 0.0);
        let alpha = alpha_from_nat_freq(1000.0 / 48_000.0);
        assert!(alpha > 0.12 && alpha < 0.13, "alpha = {}", alpha);
        assert!(alpha_from_nat_freq(0.5) > 0.95);
    }

    #[test]
    fn test_wrap_phase() {
        assert_relative_eq!(wrap_phase(1.25), 0.25);
        assert_relative_eq!(wrap_phase(-0.25), 0.75);
        assert_relative_eq!(wrap_phase(0.0), 0.0);
    }
}
