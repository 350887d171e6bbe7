//! Lock-free parameter cells for cross-rate control.
//!
//! Parameter setters run in a lower-rate control context (UI polling loop
//! or control-rate interrupt) while `process` runs in the audio callback.
//! A mutex here would risk priority inversion and audio dropouts, so the
//! cells are plain relaxed atomics: the audio side snapshots each cell
//! once per block, and the worst case is one block of staleness — below
//! audibility given the smoothing already in the signal path.
//!
//! Setters therefore take `&self`: a control context can hold a shared
//! reference to an effect's parameter surface while the audio context
//! owns the mutable half.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// An `f32` cell with relaxed atomic load/store.
///
/// Stored as raw bits in an `AtomicU32`; no read-modify-write operations
/// are offered because none are needed — single-writer, single-reader,
/// last-writer-wins.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Creates a cell holding `value`.
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Reads the current value (relaxed).
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Stores a new value (relaxed).
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A boolean cell with relaxed atomic load/store.
#[derive(Debug, Default)]
pub struct AtomicFlag(AtomicBool);

impl AtomicFlag {
    /// Creates a flag holding `value`.
    pub fn new(value: bool) -> Self {
        Self(AtomicBool::new(value))
    }

    /// Reads the flag (relaxed).
    #[inline]
    pub fn load(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Stores the flag (relaxed).
    #[inline]
    pub fn store(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }
}
