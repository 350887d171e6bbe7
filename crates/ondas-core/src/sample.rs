//! Sample storage formats for delay-line memory.
//!
//! Delay lines store their contents in one shared buffer whose element type
//! decides the memory/quality trade-off:
//!
//! - `f32`: full-precision storage, 4 bytes per sample
//! - `i16`: quantized storage, 2 bytes per sample, round-trip error bounded
//!   by one quantization step (1/32768)
//!
//! The quantized format exists for SRAM-constrained targets where doubling
//! the usable delay length is worth the quantization floor; the bounded
//! error is a deliberate trade-off, not an accuracy bug.

/// Storage format for one audio sample inside a delay line.
///
/// Implementors convert between the internal storage representation and
/// the `f32` values flowing through the signal path. Both directions are
/// total: out-of-range inputs clip, they never fail.
pub trait Sample: Copy + Default {
    /// Convert a signal value to the storage representation.
    fn compress(value: f32) -> Self;

    /// Convert the storage representation back to a signal value.
    fn decompress(self) -> f32;
}

impl Sample for f32 {
    #[inline]
    fn compress(value: f32) -> Self {
        value
    }

    #[inline]
    fn decompress(self) -> f32 {
        self
    }
}

impl Sample for i16 {
    /// Scales by 32768 and clips to `[-32768, 32767]`.
    #[inline]
    fn compress(value: f32) -> Self {
        (value * 32768.0).clamp(-32768.0, 32767.0) as i16
    }

    /// Exact inverse scale of [`compress`](Sample::compress).
    #[inline]
    fn decompress(self) -> f32 {
        f32::from(self) / 32768.0
    }
}
