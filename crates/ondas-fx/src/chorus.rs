//! Multi-voice chorus / ensemble detune.
//!
//! One topology, two tunings. Each voice is a Hermite-interpolated tap
//! on one of two per-channel delay lines, swept by its own LFO. The
//! voices run at slightly different rates and staggered phases so their
//! pitch deviations never line up, which is what turns one source into
//! a section. The two-voice [`chorus`](ChorusTuning::chorus) tuning
//! gives the classic subtle doubling; the four-voice
//! [`ensemble`](ChorusTuning::ensemble) tuning is deeper, faster and
//! thicker.

use ondas_core::{Arena, AtomicF32, DelayLine, Effect, LfoBank, Sample, wet_dry_mix};

/// Upper bound on voices per effect instance.
const MAX_VOICES: usize = 4;

/// Per-voice rate multipliers, spread so no two voices beat in sync.
const RATE_RATIOS: [f32; MAX_VOICES] = [1.0, 1.23, 0.81, 1.42];

/// Per-voice LFO phase offsets in cycles.
const PHASE_OFFSETS: [f32; MAX_VOICES] = [0.0, 0.25, 0.5, 0.75];

/// Per-channel capacity of each delay line in samples.
const LINE_CAPACITY: usize = 2048;

/// Static tuning for a [`Chorus`] instance.
///
/// All delay figures are in samples at the nominal 48 kHz rate; rates
/// are in cycles per sample.
#[derive(Debug, Clone, Copy)]
pub struct ChorusTuning {
    /// Number of modulated taps, 2 to 4. Even voices tap the left
    /// line, odd voices the right.
    pub voices: usize,
    /// Center read position of every voice, in samples.
    pub base_delay: f32,
    /// Sweep amplitude in samples when the depth knob is fully open.
    pub max_depth: f32,
    /// Sweep rate at depth knob 0, cycles per sample.
    pub min_rate: f32,
    /// Sweep rate at rate knob 1, cycles per sample.
    pub max_rate: f32,
}

impl ChorusTuning {
    /// Classic two-voice chorus: ~10 ms center delay, gentle sweep.
    pub fn chorus() -> Self {
        Self {
            voices: 2,
            base_delay: 480.0,
            max_depth: 180.0,
            min_rate: 0.1 / 48_000.0,
            max_rate: 2.0 / 48_000.0,
        }
    }

    /// Four-voice ensemble: longer center delay, deeper and faster
    /// sweep, for the string-machine shimmer.
    pub fn ensemble() -> Self {
        Self {
            voices: 4,
            base_delay: 720.0,
            max_depth: 320.0,
            min_rate: 0.5 / 48_000.0,
            max_rate: 5.0 / 48_000.0,
        }
    }

    fn clamped_voices(&self) -> usize {
        self.voices.clamp(2, MAX_VOICES)
    }
}

/// Stereo multi-voice detune over one caller-owned buffer.
///
/// Construct through [`Chorus::chorus`], [`Chorus::ensemble`], or
/// [`Chorus::with_tuning`] for a custom voice layout. Setters take
/// `&self` and clamp to `[0, 1]`.
pub struct Chorus<'a, S: Sample> {
    arena: Arena<'a, S>,
    line_l: DelayLine,
    line_r: DelayLine,
    lfos: LfoBank<MAX_VOICES>,
    tuning: ChorusTuning,

    rate: AtomicF32,
    depth: AtomicF32,
    amount: AtomicF32,
}

impl<'a, S: Sample> Chorus<'a, S> {
    /// Minimum buffer length accepted by the constructors.
    pub const BUFFER_SIZE: usize = 2 * LINE_CAPACITY;

    /// Two-voice chorus over `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than [`Chorus::BUFFER_SIZE`].
    pub fn chorus(buffer: &'a mut [S]) -> Self {
        Self::with_tuning(buffer, ChorusTuning::chorus())
    }

    /// Four-voice ensemble over `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than [`Chorus::BUFFER_SIZE`].
    pub fn ensemble(buffer: &'a mut [S]) -> Self {
        Self::with_tuning(buffer, ChorusTuning::ensemble())
    }

    /// Builds an instance with a caller-supplied tuning. The voice
    /// count clamps to `[2, 4]`; the base delay and depth must leave
    /// the interpolation margin inside the per-channel lines.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than [`Chorus::BUFFER_SIZE`], or
    /// if `base_delay + max_depth` does not fit in a line.
    pub fn with_tuning(buffer: &'a mut [S], tuning: ChorusTuning) -> Self {
        assert!(
            tuning.base_delay + tuning.max_depth <= (LINE_CAPACITY - 3) as f32,
            "tuning sweep exceeds line capacity"
        );
        let (arena, [line_l, line_r]) =
            Arena::partition(buffer, [LINE_CAPACITY, LINE_CAPACITY]);

        let mut chorus = Self {
            arena,
            line_l,
            line_r,
            lfos: LfoBank::new(),
            tuning,
            rate: AtomicF32::new(0.5),
            depth: AtomicF32::new(0.5),
            amount: AtomicF32::new(0.5),
        };
        chorus.seed_phases();

        #[cfg(feature = "tracing")]
        tracing::debug!(voices = tuning.clamped_voices(), "chorus initialized");

        chorus
    }

    /// Sets the sweep-rate knob, spanning the tuning's rate range.
    pub fn set_rate(&self, rate: f32) {
        self.rate.store(rate.clamp(0.0, 1.0));
    }

    /// Sets the sweep-depth knob.
    pub fn set_depth(&self, depth: f32) {
        self.depth.store(depth.clamp(0.0, 1.0));
    }

    /// Sets the wet/dry amount.
    pub fn set_amount(&self, amount: f32) {
        self.amount.store(amount.clamp(0.0, 1.0));
    }

    /// Current rate knob value.
    pub fn rate(&self) -> f32 {
        self.rate.load()
    }

    /// Current depth knob value.
    pub fn depth(&self) -> f32 {
        self.depth.load()
    }

    /// Current wet/dry amount.
    pub fn amount(&self) -> f32 {
        self.amount.load()
    }

    /// The active tuning.
    pub fn tuning(&self) -> ChorusTuning {
        self.tuning
    }

    fn seed_phases(&mut self) {
        for (voice, &offset) in PHASE_OFFSETS
            .iter()
            .enumerate()
            .take(self.tuning.clamped_voices())
        {
            self.lfos.set_phase(voice, offset);
        }
    }
}

impl<S: Sample> Effect for Chorus<'_, S> {
    fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        let voices = self.tuning.clamped_voices();
        let depth = self.depth.load() * self.tuning.max_depth;
        let amount = self.amount.load();
        let base_rate = self.tuning.min_rate
            + (self.tuning.max_rate - self.tuning.min_rate) * self.rate.load();
        // Two taps per line at most, so a fixed scale per channel keeps
        // the wet sum from clipping.
        let scale = if voices > 2 { 0.5 } else { 0.7 };

        for (voice, &ratio) in RATE_RATIOS.iter().enumerate().take(voices) {
            self.lfos.set_frequency(voice, base_rate * ratio);
        }

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let mut wet_l = 0.0;
            let mut wet_r = 0.0;
            for voice in 0..voices {
                let position = self.tuning.base_delay + self.lfos.next(voice) * depth;
                if voice % 2 == 0 {
                    wet_l += self.arena.read_hermite(&self.line_l, position);
                } else {
                    wet_r += self.arena.read_hermite(&self.line_r, position);
                }
            }

            self.arena.write(&mut self.line_l, *l);
            self.arena.write(&mut self.line_r, *r);

            *l = wet_dry_mix(*l, wet_l * scale, amount);
            *r = wet_dry_mix(*r, wet_r * scale, amount);
        }
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.line_l.reset();
        self.line_r.reset();
        self.lfos.reset();
        self.seed_phases();
    }
}
