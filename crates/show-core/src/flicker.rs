use crate::constants::{FLICKER_BASE, FLICKER_DRIFT_AMP, FLICKER_PHASE_AMP};
use std::f64::consts::PI;

/// Brightness multiplier for particle `index` at `now_ms`.
///
/// Two sines with index-dependent phase keep neighbours out of step; the
/// result always lies in `[FLICKER_MIN, FLICKER_MAX]`.
#[inline]
pub fn flicker_factor(now_ms: f64, index: usize) -> f32 {
    let t = now_ms * 0.001;
    let i = index as f64;
    let phase = (t + i * 0.1).sin() * PI;
    let drift = (t * 0.5 + i * 0.3).sin() * FLICKER_DRIFT_AMP as f64;
    (FLICKER_BASE as f64 + phase.sin() * FLICKER_PHASE_AMP as f64 + drift) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLICKER_MAX, FLICKER_MIN};

    #[test]
    fn factor_stays_in_bounds() {
        for step in 0..500 {
            let now = 1_700_000_000_000.0 + step as f64 * 16.7;
            for i in (0..10_000).step_by(97) {
                let f = flicker_factor(now, i);
                assert!(f >= FLICKER_MIN - 1e-6 && f <= FLICKER_MAX + 1e-6, "{f}");
                assert!(f > 0.0);
            }
        }
    }

    #[test]
    fn neighbours_are_out_of_phase() {
        let a = flicker_factor(12_345.0, 10);
        let b = flicker_factor(12_345.0, 11);
        assert!((a - b).abs() > 1e-4);
    }
}
