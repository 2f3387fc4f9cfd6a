//! Crossfade between a stage's input and its processed output.

/*
The frog block runs fully wet and crossfades against its own input:

    out = dry · (1 − mix) + wet · mix

  MIX 0  →  the input, untouched
  MIX 1  →  only the degraded signal

A linear crossfade is enough here: the degraded signal tracks the dry one
closely, so there is no audible dip at the midpoint. Both endpoints are
exact: a held wet sample stays bit-identical however the dry input moves.
*/

/// Crossfade from `dry` (mix 0) to `wet` (mix 1).
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        assert_eq!(blend_dry_wet(0.8, -0.3, 0.0), 0.8);
        assert_eq!(blend_dry_wet(0.8, -0.3, 1.0), -0.3);
    }

    #[test]
    fn test_midpoint_is_average() {
        assert_relative_eq!(blend_dry_wet(1.0, 0.0, 0.5), 0.5);
        assert_relative_eq!(blend_dry_wet(-0.4, 0.6, 0.5), 0.1);
    }

    #[test]
    fn test_equal_inputs_ignore_mix() {
        for i in 0..=10 {
            assert_relative_eq!(blend_dry_wet(0.25, 0.25, i as f32 / 10.0), 0.25);
        }
    }
}
