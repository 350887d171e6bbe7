//! One-pole lowpass over a caller-owned state cell.
//!
//! The difference equation is
//!
//! ```text
//! y[n] = y[n-1] + coefficient * (x[n] - y[n-1])
//! ```
//!
//! The persistent state lives in the *effect*, not here: the reverb owns
//! one decay cell per feedback loop and threads it through by mutable
//! reference, which keeps the per-sample topology code free of filter
//! objects. The same function doubles as a tone-shaping element and a
//! parameter smoother.
//!
//! A coefficient of 0 holds the state forever; 1 is a pass-through. Values
//! in `[0, 1)` are stable by construction.

use crate::math::flush_denormal;

/// Applies one step of the one-pole lowpass to `state` and returns the new
/// state.
///
/// The state is flushed to zero when subnormal so silent feedback tails
/// cannot degrade into denormal arithmetic.
#[inline]
pub fn one_pole(state: &mut f32, input: f32, coefficient: f32) -> f32 {
    *state = flush_denormal(*state + coefficient * (input - *state));
    *state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_dc() {
        let mut state = 0.0;
        for _ in 0..10_000 {
            one_pole(&mut state, 1.0, 0.05);
        }
        assert!((state - 1.0).abs() < 1e-4, "settled at {state}");
    }

    #[test]
    fn unity_coefficient_passes_through() {
        let mut state = 0.3;
        let out = one_pole(&mut state, -0.8, 1.0);
        assert_eq!(out, -0.8);
    }

    #[test]
    fn zero_coefficient_holds_state() {
        let mut state = 0.4;
        let out = one_pole(&mut state, 1.0, 0.0);
        assert_eq!(out, 0.4);
    }

    #[test]
    fn attenuates_alternating_input() {
        let mut state = 0.0;
        let mut sum = 0.0f32;
        for i in 0..1000 {
            let x = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += one_pole(&mut state, x, 0.02).abs();
        }
        assert!(sum / 1000.0 < 0.05, "Nyquist should be damped");
    }

    #[test]
    fn decay_never_goes_subnormal() {
        let mut state = 1.0;
        for _ in 0..100_000 {
            let out = one_pole(&mut state, 0.0, 0.2);
            assert!(out == 0.0 || out.abs() > f32::MIN_POSITIVE);
        }
        assert_eq!(state, 0.0);
    }
}
