//! Property-based robustness tests: for any knob combination the
//! effects must stay finite and bounded, and every setter must land on
//! the same internal value when repeated.

use ondas_core::Effect;
use ondas_fx::{Chorus, Delay, Reverb, ReverbPreset};
use proptest::prelude::*;

fn preset_strategy() -> impl Strategy<Value = ReverbPreset> {
    prop_oneof![
        Just(ReverbPreset::Cavern),
        Just(ReverbPreset::Chamber),
        Just(ReverbPreset::Mist),
        Just(ReverbPreset::Glacial),
    ]
}

fn noise_block(seed: u32, n: usize) -> Vec<f32> {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any reverb knob combination over any preset renders noise to a
    /// finite, bounded block.
    #[test]
    fn reverb_output_bounded(
        preset in preset_strategy(),
        time in 0.0f32..=1.0,
        diffusion in 0.0f32..=1.0,
        lp in 0.0f32..=1.0,
        amount in 0.0f32..=1.0,
        seed in 0u32..1000,
    ) {
        let mut buffer = vec![0.0f32; Reverb::<f32>::BUFFER_SIZE];
        let mut fx = Reverb::new(&mut buffer);
        fx.set_preset(preset);
        fx.set_time(time);
        fx.set_diffusion(diffusion);
        fx.set_lp(lp);
        fx.set_amount(amount);

        let mut l = noise_block(seed, 4096);
        let mut r = noise_block(seed.wrapping_add(1), 4096);
        fx.process(&mut l, &mut r);

        for &x in l.iter().chain(&r) {
            prop_assert!(x.is_finite() && x.abs() < 100.0, "output {x}");
        }
    }

    /// Delay output stays bounded even with the feedback knob pinned.
    #[test]
    fn delay_output_bounded(
        time in 0.0f32..=1.0,
        feedback in 0.0f32..=1.0,
        amount in 0.0f32..=1.0,
        seed in 0u32..1000,
    ) {
        let mut buffer = vec![0.0f32; Delay::<f32>::BUFFER_SIZE];
        let mut fx = Delay::new(&mut buffer);
        fx.set_time(time);
        fx.set_feedback(feedback);
        fx.set_amount(amount);

        let mut l = noise_block(seed, 16_384);
        let mut r = noise_block(seed.wrapping_add(1), 16_384);
        fx.process(&mut l, &mut r);

        // Loop gain tops out at 0.85, so the echo sum converges below
        // 1 / (1 - 0.85) times the input ceiling.
        for &x in l.iter().chain(&r) {
            prop_assert!(x.is_finite() && x.abs() < 10.0, "output {x}");
        }
    }

    /// Both chorus tunings stay bounded across the knob space.
    #[test]
    fn chorus_output_bounded(
        ensemble in any::<bool>(),
        rate in 0.0f32..=1.0,
        depth in 0.0f32..=1.0,
        amount in 0.0f32..=1.0,
        seed in 0u32..1000,
    ) {
        let mut buffer = vec![0.0f32; Chorus::<f32>::BUFFER_SIZE];
        let mut fx = if ensemble {
            Chorus::ensemble(&mut buffer)
        } else {
            Chorus::chorus(&mut buffer)
        };
        fx.set_rate(rate);
        fx.set_depth(depth);
        fx.set_amount(amount);

        let mut l = noise_block(seed, 4096);
        let mut r = noise_block(seed.wrapping_add(1), 4096);
        fx.process(&mut l, &mut r);

        for &x in l.iter().chain(&r) {
            prop_assert!(x.is_finite() && x.abs() < 4.0, "output {x}");
        }
    }

    /// Re-sending the same knob value always lands on the same mapped
    /// parameter, for every reverb preset.
    #[test]
    fn reverb_setters_idempotent(
        preset in preset_strategy(),
        knob in 0.0f32..=1.0,
    ) {
        let mut buffer = vec![0.0f32; Reverb::<f32>::BUFFER_SIZE];
        let fx = Reverb::new(&mut buffer);
        fx.set_preset(preset);

        fx.set_time(knob);
        fx.set_lp(knob);
        fx.set_diffusion(knob);
        fx.set_amount(knob);
        let snapshot = (fx.time(), fx.lp(), fx.diffusion(), fx.amount());

        fx.set_time(knob);
        fx.set_lp(knob);
        fx.set_diffusion(knob);
        fx.set_amount(knob);
        prop_assert_eq!(
            snapshot,
            (fx.time(), fx.lp(), fx.diffusion(), fx.amount())
        );
    }

    /// Out-of-range knob values clamp to the same mapped parameter as
    /// the nearest in-range value.
    #[test]
    fn out_of_range_knobs_clamp(
        preset in preset_strategy(),
        excess in 1.0f32..=1e6,
    ) {
        let mut buffer = vec![0.0f32; Reverb::<f32>::BUFFER_SIZE];
        let fx = Reverb::new(&mut buffer);
        fx.set_preset(preset);

        fx.set_time(1.0);
        let top = fx.time();
        fx.set_time(excess);
        prop_assert_eq!(fx.time(), top);

        fx.set_time(0.0);
        let bottom = fx.time();
        fx.set_time(-excess);
        prop_assert_eq!(fx.time(), bottom);
    }
}
