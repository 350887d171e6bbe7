//! Small math helpers shared by the effect topologies.

/// Flush subnormal values to zero.
///
/// Feedback tails decay toward zero; once values drop into the IEEE 754
/// subnormal range (below ~1.2e-38) most CPUs take a severe per-operation
/// penalty. 1e-20 is far below any audible level.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - amount) + wet * amount` with one fewer
/// multiply: `dry + (wet - dry) * amount`. At `amount == 0` the output is
/// exactly the dry input.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, amount: f32) -> f32 {
    dry + (wet - dry) * amount
}

/// Sum stereo to mono.
#[inline]
pub fn mono_sum(left: f32, right: f32) -> f32 {
    (left + right) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_denormal_zeroes_tiny_values() {
        assert_eq!(flush_denormal(1e-30), 0.0);
        assert_eq!(flush_denormal(-1e-30), 0.0);
        assert_eq!(flush_denormal(1e-10), 1e-10);
        assert_eq!(flush_denormal(0.5), 0.5);
    }

    #[test]
    fn wet_dry_mix_endpoints() {
        assert_eq!(wet_dry_mix(0.25, -0.75, 0.0), 0.25);
        assert_eq!(wet_dry_mix(0.25, -0.75, 1.0), -0.75);
        assert_eq!(wet_dry_mix(1.0, 0.0, 0.5), 0.5);
    }

    #[test]
    fn mono_sum_averages() {
        assert_eq!(mono_sum(1.0, 0.0), 0.5);
        assert_eq!(mono_sum(-0.5, 0.5), 0.0);
    }
}
