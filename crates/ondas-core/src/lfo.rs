//! Free-running LFOs for delay-line modulation.
//!
//! The effect topologies use slow sine LFOs to sweep delay-line read
//! positions (chorus/ensemble voices, reverb shimmer, delay drift). They
//! are never used to scale audio amplitude in this crate; amplitude
//! modulation is a voice-layer concern.
//!
//! Frequencies are given in cycles per sample, the natural unit for a
//! phase accumulator driven from the audio callback: a 0.5 Hz sweep at a
//! 48 kHz sample rate is `0.5 / 48000.0`.

use core::f32::consts::TAU;
use libm::sinf;

/// Sine low-frequency oscillator: a bare phase accumulator.
///
/// Phase lives in `[0, 1)` and advances by the configured increment each
/// [`next`](Lfo::next); there is no other state.
#[derive(Debug, Clone, Default)]
pub struct Lfo {
    phase: f32,
    increment: f32,
}

impl Lfo {
    /// Creates an LFO at the given frequency in cycles per sample.
    pub fn new(cycles_per_sample: f32) -> Self {
        Self {
            phase: 0.0,
            increment: cycles_per_sample,
        }
    }

    /// Sets the frequency in cycles per sample.
    #[inline]
    pub fn set_frequency(&mut self, cycles_per_sample: f32) {
        self.increment = cycles_per_sample;
    }

    /// Syncs the phase to a value in `[0, 1)`.
    ///
    /// Used for phase-offset LFOs in multi-voice effects:
    /// 0.25 is a 90 degree offset.
    #[inline]
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.clamp(0.0, 1.0) % 1.0;
    }

    /// Current phase in `[0, 1)`.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Returns the sine value for the current phase and advances by one
    /// sample. Output is in `[-1, 1]`.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let out = sinf(self.phase * TAU);
        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }

    /// Re-seeds the phase to 0.
    #[inline]
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// A small bank of independent LFOs addressed by index.
///
/// Effects typically carry two (a slow one for shimmer, a faster one for
/// sweep); the chorus/ensemble carries one per voice.
#[derive(Debug, Clone)]
pub struct LfoBank<const N: usize> {
    lfos: [Lfo; N],
}

// Derived Default would bound on `[Lfo; N]: Default`, which std only
// provides for small concrete N.
impl<const N: usize> Default for LfoBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LfoBank<N> {
    /// Creates a bank with all LFOs at phase 0 and zero frequency.
    pub fn new() -> Self {
        Self {
            lfos: core::array::from_fn(|_| Lfo::new(0.0)),
        }
    }

    /// Sets LFO `id`'s frequency in cycles per sample.
    #[inline]
    pub fn set_frequency(&mut self, id: usize, cycles_per_sample: f32) {
        self.lfos[id].set_frequency(cycles_per_sample);
    }

    /// Syncs LFO `id`'s phase.
    #[inline]
    pub fn set_phase(&mut self, id: usize, phase: f32) {
        self.lfos[id].set_phase(phase);
    }

    /// Advances LFO `id` by one sample and returns its value.
    #[inline]
    pub fn next(&mut self, id: usize) -> f32 {
        self.lfos[id].next()
    }

    /// Re-seeds every phase to 0.
    pub fn reset(&mut self) {
        for lfo in &mut self.lfos {
            lfo.reset();
        }
    }
}
