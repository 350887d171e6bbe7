//! Delay-line memory arena over one caller-owned buffer.
//!
//! Every effect topology declares a fixed list of delay-line capacities.
//! [`Arena::partition`] carves the caller's buffer into that many disjoint
//! contiguous regions by prefix sum, once, at initialization. Nothing is
//! allocated, regions never move, and no two delay lines ever alias.
//!
//! # Pointer convention
//!
//! Each [`DelayLine`] keeps its own write pointer, which pre-decrements on
//! every [`Arena::write`] and wraps modulo the region capacity. A read at
//! integer delay `d` returns the sample at `(write_ptr + d) % capacity`.
//!
//! Topologies read a line *before* writing it within the same sample, so a
//! read at delay 0 returns the previous sample's head — one sample "stale"
//! by construction. This is intentional: it lets an all-pass section read
//! the sample about to be overwritten before overwriting it, and makes a
//! read at `capacity - 1` span the full region.
//!
//! # Interpolation margins
//!
//! Fractional reads need neighboring taps, so the usable delay range is the
//! region capacity minus a small margin: 1 sample for linear, 3 for
//! cubic/Hermite (one tap below, two above). Out-of-range delays clamp.

use crate::interp;
use crate::math::flush_denormal;
use crate::sample::Sample;

/// Handle to one circular delay line inside an [`Arena`].
///
/// A plain value: region offset, capacity and write pointer. All sample
/// access goes through the owning arena, which keeps the borrow checker
/// happy without threading one mutable borrow per line.
#[derive(Debug, Clone)]
pub struct DelayLine {
    offset: usize,
    capacity: usize,
    write_ptr: usize,
}

impl DelayLine {
    /// Region capacity in samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The longest integer delay readable from this line, `capacity - 1`.
    ///
    /// Reading the tail before the current sample's write returns the
    /// sample about to be overwritten.
    #[inline]
    pub fn tail(&self) -> usize {
        self.capacity - 1
    }

    /// Returns the write pointer to its initial position.
    ///
    /// Call together with [`Arena::clear`] when swapping an effect in, so
    /// no stale buffer content is replayed.
    #[inline]
    pub fn reset(&mut self) {
        self.write_ptr = 0;
    }

    #[inline]
    fn slot(&self, delay: usize) -> usize {
        debug_assert!(delay < self.capacity, "delay {delay} out of region");
        self.offset + (self.write_ptr + delay) % self.capacity
    }
}

/// Partitions one externally owned buffer into disjoint delay-line regions.
///
/// The arena borrows the buffer for its lifetime; it never reallocates and
/// every operation is O(1). Region offsets are assigned once by
/// [`partition`](Arena::partition) and never change.
///
/// # Example
///
/// ```rust
/// use ondas_core::Arena;
///
/// let mut buffer = [0i16; 300];
/// let (mut arena, [mut ap, mut del]) = Arena::partition(&mut buffer, [100, 200]);
///
/// arena.write(&mut del, 0.25);
/// let out = arena.allpass(&mut ap, 0.5, 0.625);
/// assert!(out.is_finite());
/// ```
pub struct Arena<'a, S: Sample> {
    buffer: &'a mut [S],
}

impl<'a, S: Sample> Arena<'a, S> {
    /// Carves `buffer` into `N` regions with the given capacities, assigned
    /// by prefix sum in declaration order.
    ///
    /// Slack beyond the declared total is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the capacities do not fit in `buffer`, or if any declared
    /// capacity is below 4 samples — the smallest region whose cubic and
    /// Hermite interpolation margins still fit.
    pub fn partition<const N: usize>(
        buffer: &'a mut [S],
        capacities: [usize; N],
    ) -> (Self, [DelayLine; N]) {
        let total: usize = capacities.iter().sum();
        assert!(
            total <= buffer.len(),
            "arena buffer too small: layout needs {total} samples, got {}",
            buffer.len()
        );

        let mut offset = 0;
        let lines = capacities.map(|capacity| {
            assert!(capacity >= 4, "delay line capacity must be >= 4");
            let line = DelayLine {
                offset,
                capacity,
                write_ptr: 0,
            };
            offset += capacity;
            line
        });
        debug_assert!(offset == total, "regions must tile the declared total");

        #[cfg(feature = "tracing")]
        tracing::debug!(regions = N, total, "arena partitioned");

        (Self { buffer }, lines)
    }

    /// Reads the sample at integer delay `d`.
    ///
    /// `d` must be less than the line's capacity. See the module docs for
    /// the read-before-write staleness convention.
    #[inline]
    pub fn read(&self, line: &DelayLine, delay: usize) -> f32 {
        self.buffer[line.slot(delay)].decompress()
    }

    /// Reads at a fractional delay with linear interpolation.
    ///
    /// The delay clamps to `[0, capacity - 2]` so both taps stay inside
    /// the region.
    #[inline]
    pub fn read_linear(&self, line: &DelayLine, delay: f32) -> f32 {
        let d = delay.clamp(0.0, (line.capacity - 2) as f32);
        let i = d as usize;
        let t = d - i as f32;
        interp::linear(self.read(line, i), self.read(line, i + 1), t)
    }

    /// Reads at a fractional delay with 4-point cubic interpolation.
    ///
    /// The delay clamps to `[1, capacity - 3]` for the outer taps.
    #[inline]
    pub fn read_cubic(&self, line: &DelayLine, delay: f32) -> f32 {
        let d = delay.clamp(1.0, (line.capacity - 3) as f32);
        let i = d as usize;
        let t = d - i as f32;
        interp::cubic(
            self.read(line, i - 1),
            self.read(line, i),
            self.read(line, i + 1),
            self.read(line, i + 2),
            t,
        )
    }

    /// Reads at a fractional delay with 4-point Hermite interpolation.
    ///
    /// Smoother under continuous modulation than [`read_linear`]
    /// (chorus/ensemble sweeps). Same clamping as [`read_cubic`].
    ///
    /// [`read_linear`]: Arena::read_linear
    /// [`read_cubic`]: Arena::read_cubic
    #[inline]
    pub fn read_hermite(&self, line: &DelayLine, delay: f32) -> f32 {
        let d = delay.clamp(1.0, (line.capacity - 3) as f32);
        let i = d as usize;
        let t = d - i as f32;
        interp::hermite(
            self.read(line, i - 1),
            self.read(line, i),
            self.read(line, i + 1),
            self.read(line, i + 2),
            t,
        )
    }

    /// Writes a sample at the line's head, advancing the write pointer.
    #[inline]
    pub fn write(&mut self, line: &mut DelayLine, value: f32) {
        line.write_ptr = if line.write_ptr == 0 {
            line.capacity - 1
        } else {
            line.write_ptr - 1
        };
        self.buffer[line.offset + line.write_ptr] = S::compress(value);
    }

    /// Stores a sample at offset `delay` from the write pointer without
    /// advancing it.
    ///
    /// Used by the reverb's in-loop smear, which pokes a modulated read
    /// back into the middle of a diffuser line.
    #[inline]
    pub fn write_at(&mut self, line: &DelayLine, delay: usize, value: f32) {
        self.buffer[line.slot(delay)] = S::compress(value);
    }

    /// First-order all-pass section over `line`: reads at `delay`, writes
    /// `input + coefficient * read`, returns `read - coefficient * written`.
    ///
    /// Stable for `|coefficient| < 1`. This is the diffusion primitive
    /// every topology is built from.
    #[inline]
    pub fn allpass_at(
        &mut self,
        line: &mut DelayLine,
        input: f32,
        delay: usize,
        coefficient: f32,
    ) -> f32 {
        let read = self.read(line, delay);
        let written = input + coefficient * read;
        self.write(line, flush_denormal(written));
        read - coefficient * written
    }

    /// [`allpass_at`](Arena::allpass_at) spanning the full region
    /// (`delay = capacity - 1`), the common case for diffuser chains.
    #[inline]
    pub fn allpass(&mut self, line: &mut DelayLine, input: f32, coefficient: f32) -> f32 {
        self.allpass_at(line, input, line.capacity - 1, coefficient)
    }

    /// Zero-fills the whole buffer.
    ///
    /// Call [`DelayLine::reset`] on each line as well when swapping an
    /// effect in; leftover content is an audible artifact otherwise.
    pub fn clear(&mut self) {
        self.buffer.fill(S::default());
    }

    /// Total buffer length in samples (declared regions plus slack).
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
