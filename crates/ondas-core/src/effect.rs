//! The stereo effect boundary.
//!
//! The host audio callback owns two caller-allocated channel buffers and
//! calls [`Effect::process`] once per block on the active effect. The
//! contract is hard-real-time: fixed work per sample, no allocation, no
//! blocking, no unbounded recursion, and nothing outside the two slices
//! and the effect's own arena is touched.

/// An in-place stereo block transform.
///
/// # Contract
///
/// - `left.len() == right.len()`; a zero-length block is a no-op.
/// - Parameters read during a block were stored by control-rate setters
///   through relaxed atomic cells; a torn block sees at most one block of
///   staleness.
/// - There is no error path: every operation is total over its clamped
///   parameter domain.
pub trait Effect {
    /// Processes one stereo block in place.
    fn process(&mut self, left: &mut [f32], right: &mut [f32]);

    /// Zeroes all delay-line contents and filter state.
    ///
    /// Idempotent. The host must call this when swapping this effect in,
    /// before its first `process`, or stale buffer content from the
    /// previous owner of the arena becomes an audible artifact.
    fn clear(&mut self);
}
