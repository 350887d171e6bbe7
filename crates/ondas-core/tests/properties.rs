//! Property-based tests for ondas-core primitives.
//!
//! Covers sample-format round-trips, delay-line integrity across the wrap
//! boundary, allpass stability, and interpolated-read totality using
//! proptest for randomized input generation.

use ondas_core::{Arena, Lfo, Sample, one_pole};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For all x in [-1, 1], the 16-bit storage format round-trips within
    /// one quantization step (1/32768).
    #[test]
    fn compression_roundtrip_bounded(x in -1.0f32..=1.0f32) {
        let back = i16::compress(x).decompress();
        prop_assert!(
            (back - x).abs() <= 1.0 / 32768.0,
            "round-trip error for {}: {}", x, back
        );
    }

    /// Float storage round-trips exactly for any finite value.
    #[test]
    fn float_storage_is_identity(x in -1e6f32..=1e6f32) {
        prop_assert_eq!(f32::compress(x).decompress(), x);
    }

    /// Samples written to a delay line read back unchanged at their
    /// integer delay, including across the wrap boundary.
    #[test]
    fn delay_line_integrity(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 1..=64),
    ) {
        let mut buffer = [0.0f32; 64];
        let n = samples.len();
        let (mut arena, [mut line]) = Arena::partition(&mut buffer, [64]);

        for &s in &samples {
            arena.write(&mut line, s);
        }
        for (age, &expected) in samples.iter().rev().enumerate() {
            prop_assert_eq!(
                arena.read(&line, age),
                expected,
                "sample {} of {} corrupted", age, n
            );
        }
    }

    /// For any coefficient in the stable range and any bounded input, the
    /// allpass section's output stays bounded over 10,000 samples.
    #[test]
    fn allpass_output_bounded(
        coefficient in -0.98f32..=0.98f32,
        seed in 0u32..1000,
    ) {
        let mut buffer = [0.0f32; 128];
        let (mut arena, [mut line]) = Arena::partition(&mut buffer, [97]);

        // Cheap deterministic noise from the seed.
        let mut state = seed.wrapping_mul(2654435761).max(1);
        for i in 0..10_000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let x = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let out = arena.allpass(&mut line, x, coefficient);
            prop_assert!(
                out.is_finite() && out.abs() < 1e3,
                "allpass (c={}) grew to {} at sample {}", coefficient, out, i
            );
        }
    }

    /// Interpolated reads are total: any delay argument, however wild,
    /// clamps into the region and yields a finite value.
    #[test]
    fn interpolated_reads_are_total(
        delay in prop::num::f32::ANY,
        fill in -1.0f32..=1.0f32,
    ) {
        prop_assume!(!delay.is_nan());
        let mut buffer = [0.0f32; 32];
        let (mut arena, [mut line]) = Arena::partition(&mut buffer, [32]);
        for _ in 0..32 {
            arena.write(&mut line, fill);
        }

        prop_assert!(arena.read_linear(&line, delay).is_finite());
        prop_assert!(arena.read_cubic(&line, delay).is_finite());
        prop_assert!(arena.read_hermite(&line, delay).is_finite());
    }

    /// The one-pole smoother converges toward any target for any stable
    /// coefficient.
    #[test]
    fn one_pole_converges(
        target in -10.0f32..=10.0f32,
        coefficient in 0.01f32..=1.0f32,
    ) {
        let mut state = 0.0;
        for _ in 0..10_000 {
            one_pole(&mut state, target, coefficient);
        }
        prop_assert!(
            (state - target).abs() < 1e-2,
            "state {} never reached {}", state, target
        );
    }

    /// LFO phase stays in [0, 1) and output in [-1, 1] for any frequency
    /// in the modulation range.
    #[test]
    fn lfo_stays_in_range(freq in 0.0f32..=0.01f32) {
        let mut lfo = Lfo::new(freq);
        for _ in 0..5000 {
            let v = lfo.next();
            prop_assert!((-1.0..=1.0).contains(&v));
            prop_assert!((0.0..1.0).contains(&lfo.phase()));
        }
    }
}
