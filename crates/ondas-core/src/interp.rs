//! Interpolation kernels for fractional delay reads.
//!
//! Each kernel takes neighboring integer-delay taps (newest first) and the
//! fractional position `t` in `[0, 1)` between the first two taps.
//!
//! | Kernel | Taps | Use |
//! |--------|------|-----|
//! | [`linear`] | 2 | cheap modulated reads (reverb loop shimmer) |
//! | [`cubic`] | 4 | smoother spectral response |
//! | [`hermite`] | 4 | modulated reads where linear zipper noise is audible (chorus/ensemble sweeps, modulated delay) |

/// Linear interpolation between two taps.
#[inline]
pub fn linear(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// 4-point cubic interpolation.
///
/// `y0..y3` are consecutive taps at delays `d-1, d, d+1, d+2`; `t` is the
/// fraction past `y1`. Exact at the knots and at `t = 0.5`; in between it
/// trades a small overshoot for a brighter top end than [`hermite`].
#[inline]
pub fn cubic(y0: f32, y1: f32, y2: f32, y3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a0 = y3 - y2 - y0 + y1;
    let a1 = y0 - y1 - a0;
    let a2 = y2 - y0;

    a0 * t3 + a1 * t2 + a2 * t + y1
}

/// 4-point, 3rd-order Hermite (Catmull-Rom) interpolation.
///
/// `xm1, x0, x1, x2` are consecutive taps at delays `d-1, d, d+1, d+2`;
/// `t` is the fraction past `x0`. Flatter passband than [`cubic`] under
/// continuous modulation.
#[inline]
pub fn hermite(xm1: f32, x0: f32, x1: f32, x2: f32, t: f32) -> f32 {
    let c = (x1 - xm1) * 0.5;
    let v = x0 - x1;
    let w = c + v;
    let a = w + v + (x2 - x0) * 0.5;
    let b_neg = w + a;

    (((a * t) - b_neg) * t + c) * t + x0
}
