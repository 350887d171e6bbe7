//! Mono-feedback stereo echo with a drifting read head.
//!
//! Both channels fold into one mono sum that feeds a single delay line;
//! the echo is added equally to both outputs. A very slow LFO wobbles
//! the read position by a couple of samples, and the Hermite read turns
//! that wobble into a subtle tape-style pitch drift instead of zipper
//! noise.

use ondas_core::{
    Arena, AtomicF32, DelayLine, Effect, Lfo, Sample, flush_denormal, mono_sum,
};

/// Headroom kept under unity so a fully open feedback knob still decays.
const FEEDBACK_SCALE: f32 = 0.85;

/// Read-head drift amplitude in samples.
const DRIFT_DEPTH: f32 = 2.0;

/// Stereo echo over one caller-owned buffer.
///
/// Construct with a buffer of at least [`Delay::BUFFER_SIZE`] samples.
/// Setters take `&self` and clamp to `[0, 1]`.
pub struct Delay<'a, S: Sample> {
    arena: Arena<'a, S>,
    line: DelayLine,
    lfo: Lfo,

    time: AtomicF32,
    feedback: AtomicF32,
    amount: AtomicF32,
}

impl<'a, S: Sample> Delay<'a, S> {
    /// Minimum buffer length accepted by [`new`](Delay::new): about a
    /// third of a second at 48 kHz.
    pub const BUFFER_SIZE: usize = 16_384;

    /// Borrows `buffer` for the delay memory. Starts silent: time and
    /// feedback at 0, amount at 0.5.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than [`Delay::BUFFER_SIZE`].
    pub fn new(buffer: &'a mut [S]) -> Self {
        let (arena, [line]) = Arena::partition(buffer, [Self::BUFFER_SIZE]);

        #[cfg(feature = "tracing")]
        tracing::debug!(buffer = arena.len(), "delay initialized");

        Self {
            arena,
            line,
            lfo: Lfo::new(0.2 / 48_000.0),
            time: AtomicF32::new(0.0),
            feedback: AtomicF32::new(0.0),
            amount: AtomicF32::new(0.5),
        }
    }

    /// Sets the delay time as a fraction of the line length.
    pub fn set_time(&self, time: f32) {
        self.time.store(time.clamp(0.0, 1.0));
    }

    /// Sets the feedback knob. Unity on the knob maps below unity in the
    /// loop, so repeats always decay.
    pub fn set_feedback(&self, feedback: f32) {
        self.feedback.store(feedback.clamp(0.0, 1.0));
    }

    /// Sets the echo level added onto both channels.
    pub fn set_amount(&self, amount: f32) {
        self.amount.store(amount.clamp(0.0, 1.0));
    }

    /// Current time knob value.
    pub fn time(&self) -> f32 {
        self.time.load()
    }

    /// Current feedback knob value.
    pub fn feedback(&self) -> f32 {
        self.feedback.load()
    }

    /// Current echo level.
    pub fn amount(&self) -> f32 {
        self.amount.load()
    }
}

impl<S: Sample> Effect for Delay<'_, S> {
    fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        let time = self.time.load();
        let feedback = self.feedback.load() * FEEDBACK_SCALE;
        let amount = self.amount.load();

        // Leave the Hermite margin plus the drift amplitude at the top.
        let max_delay = (self.line.capacity() - 4) as f32;
        let base = time * max_delay;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let position = (base + self.lfo.next() * DRIFT_DEPTH).clamp(1.0, max_delay);
            let echo = self.arena.read_hermite(&self.line, position);

            let head = mono_sum(*l, *r) + echo * feedback;
            self.arena.write(&mut self.line, flush_denormal(head));

            *l += echo * amount;
            *r += echo * amount;
        }
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.line.reset();
        self.lfo.reset();
    }
}
