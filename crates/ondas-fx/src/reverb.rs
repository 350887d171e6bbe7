//! Figure-eight plate reverb with four tonal presets.
//!
//! The topology is a Griesinger loop: both inputs pass through a shared
//! chain of four short all-pass diffusers, then feed two cross-coupled
//! recirculating branches. Each branch applies a modulated read of the
//! other branch's long delay, a one-pole damping filter and two more
//! diffusers before writing its own long delay. The left output taps
//! branch one, the right output branch two.
//!
//! The presets do not change the topology; they change how the four
//! unit-range knobs map onto the internal gains, and which delay reads
//! are modulated. [`ReverbPreset::Glacial`] adds a freeze mode: above a
//! time threshold the loop gain locks to 1, the input gain to 0, and the
//! stored sound circulates indefinitely.

use core::sync::atomic::{AtomicU8, Ordering};

use ondas_core::{
    Arena, AtomicF32, AtomicFlag, DelayLine, Effect, LfoBank, Sample, one_pole, wet_dry_mix,
};

/// Tonal character selector for [`Reverb`].
///
/// Each preset is a different mapping from the four knobs onto the loop
/// internals, tuned for a distinct register of the same topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ReverbPreset {
    /// Dark, mid-sized room. The neutral mapping: every knob controls
    /// exactly what its name says.
    #[default]
    Cavern = 0,
    /// Brighter chamber with a floor under both amount and brightness,
    /// so the reverb never fully disappears.
    Chamber = 1,
    /// Washed-out texture reverb. The brightness knob doubles as a
    /// feedback send into the wet amount, and the first diffuser is
    /// smeared by a slow LFO.
    Mist = 2,
    /// Long, freezable tail. The time knob crosses into an infinite
    /// sustain above 0.95; the amount knob drives input gain instead.
    Glacial = 3,
}

impl ReverbPreset {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Chamber,
            2 => Self::Mist,
            3 => Self::Glacial,
            _ => Self::Cavern,
        }
    }
}

/// Stereo figure-eight reverb over one caller-owned buffer.
///
/// Construct with a buffer of at least [`Reverb::BUFFER_SIZE`] samples,
/// in either storage format. All setters take `&self` and clamp their
/// argument to `[0, 1]`; the audio callback snapshots the parameter
/// cells once per block.
pub struct Reverb<'a, S: Sample> {
    arena: Arena<'a, S>,

    // Input diffuser chain, shared by both channels.
    ap1: DelayLine,
    ap2: DelayLine,
    ap3: DelayLine,
    ap4: DelayLine,

    // Branch one: two diffusers and the long delay tapped by the left
    // output.
    dap1a: DelayLine,
    dap1b: DelayLine,
    del1: DelayLine,

    // Branch two, tapped by the right output.
    dap2a: DelayLine,
    dap2b: DelayLine,
    del2: DelayLine,

    lfo: LfoBank<2>,
    lp_decay_1: f32,
    lp_decay_2: f32,

    preset: AtomicU8,
    amount: AtomicF32,
    input_gain: AtomicF32,
    reverb_time: AtomicF32,
    diffusion: AtomicF32,
    lp: AtomicF32,
    feedback: AtomicF32,
    frozen: AtomicFlag,
}

impl<'a, S: Sample> Reverb<'a, S> {
    /// Delay-line capacities in samples, in arena order: the four input
    /// diffusers, then branch one (two diffusers and the long delay),
    /// then branch two. Mutually prime-ish lengths keep the mode
    /// spacing irregular.
    pub const LAYOUT: [usize; 10] = [150, 214, 319, 527, 2182, 2690, 4501, 2525, 2197, 6312];

    /// Minimum buffer length accepted by [`new`](Reverb::new).
    pub const BUFFER_SIZE: usize = {
        let mut total = 0;
        let mut i = 0;
        while i < Self::LAYOUT.len() {
            total += Self::LAYOUT[i];
            i += 1;
        }
        total
    };

    /// Borrows `buffer` for the reverb's delay memory and starts in the
    /// [`ReverbPreset::Cavern`] preset with amount and time at 0.5.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than [`Reverb::BUFFER_SIZE`].
    pub fn new(buffer: &'a mut [S]) -> Self {
        let (arena, [ap1, ap2, ap3, ap4, dap1a, dap1b, del1, dap2a, dap2b, del2]) =
            Arena::partition(buffer, Self::LAYOUT);

        let mut lfo = LfoBank::new();
        lfo.set_frequency(0, 0.5 / 48_000.0);
        lfo.set_frequency(1, 0.3 / 48_000.0);

        let reverb = Self {
            arena,
            ap1,
            ap2,
            ap3,
            ap4,
            dap1a,
            dap1b,
            del1,
            dap2a,
            dap2b,
            del2,
            lfo,
            lp_decay_1: 0.0,
            lp_decay_2: 0.0,
            preset: AtomicU8::new(ReverbPreset::Cavern as u8),
            amount: AtomicF32::new(0.0),
            input_gain: AtomicF32::new(0.2),
            reverb_time: AtomicF32::new(0.0),
            diffusion: AtomicF32::new(0.625),
            lp: AtomicF32::new(0.7),
            feedback: AtomicF32::new(0.0),
            frozen: AtomicFlag::new(false),
        };
        reverb.set_amount(0.5);
        reverb.set_time(0.5);

        #[cfg(feature = "tracing")]
        tracing::debug!(buffer = reverb.arena.len(), "reverb initialized");

        reverb
    }

    /// Selects the active preset.
    ///
    /// Knob mappings only apply on the *next* setter call, so hosts
    /// should re-send the current knob values after switching.
    pub fn set_preset(&self, preset: ReverbPreset) {
        self.preset.store(preset as u8, Ordering::Relaxed);
    }

    /// The active preset.
    pub fn preset(&self) -> ReverbPreset {
        ReverbPreset::from_u8(self.preset.load(Ordering::Relaxed))
    }

    /// Sets the wet/dry amount knob.
    pub fn set_amount(&self, amount: f32) {
        let amount = amount.clamp(0.0, 1.0);
        match self.preset() {
            ReverbPreset::Cavern => self.amount.store(0.75 * amount),
            ReverbPreset::Chamber => self.amount.store(0.1 + amount * 0.5),
            ReverbPreset::Mist => {
                // Brightness doubles as a feedback send here; the send
                // curve peaks before full feedback to keep the sum sane.
                let feedback = self.feedback.load();
                let wet = (amount * 0.95 + feedback * (2.0 - feedback)).clamp(0.0, 1.0);
                self.amount.store(0.54 * wet);
            }
            ReverbPreset::Glacial => {
                self.set_input_gain(if amount <= 0.2 { 0.2 } else { amount });
            }
        }
    }

    /// Sets the decay-time knob. Always unfreezes first; only
    /// [`ReverbPreset::Glacial`] can re-freeze, at `time >= 0.95`.
    pub fn set_time(&self, time: f32) {
        let time = time.clamp(0.0, 1.0);
        self.frozen.store(false);
        match self.preset() {
            ReverbPreset::Cavern => self.reverb_time.store(0.5 + 0.49 * time),
            ReverbPreset::Chamber | ReverbPreset::Mist => {
                self.reverb_time.store(0.35 + 0.63 * time);
            }
            ReverbPreset::Glacial => {
                let frozen = time >= 0.95;
                self.frozen.store(frozen);
                let amount = time.min(0.4);
                self.amount.store(amount);
                self.reverb_time
                    .store(if frozen { 1.0 } else { 0.35 + 1.2 * amount });
            }
        }
    }

    /// Sets the diffusion knob, the coefficient of every all-pass
    /// section in the loop. Capped just below 1 for stability; pinned
    /// to the neutral 0.625 while frozen so a knob wiggle cannot bleed
    /// energy out of a held tail.
    pub fn set_diffusion(&self, diffusion: f32) {
        let diffusion = diffusion.clamp(0.0, 1.0).min(0.999);
        self.diffusion
            .store(if self.frozen.load() { 0.625 } else { diffusion });
    }

    /// Sets the brightness knob, the coefficient of the in-loop damping
    /// filters. 1 is no damping.
    pub fn set_lp(&self, lp: f32) {
        let lp = lp.clamp(0.0, 1.0);
        match self.preset() {
            ReverbPreset::Cavern => self.lp.store(lp),
            ReverbPreset::Chamber => self.lp.store(0.3 + lp * 0.6),
            ReverbPreset::Mist => {
                self.feedback.store(lp);
                self.lp.store(0.6 + 0.37 * lp);
            }
            ReverbPreset::Glacial => {
                self.lp.store(if self.frozen.load() { 1.0 } else { lp });
            }
        }
    }

    /// Sets the send gain into the diffuser chain. Forced to 0 while
    /// [`ReverbPreset::Glacial`] is frozen so new input cannot disturb
    /// the held tail.
    pub fn set_input_gain(&self, gain: f32) {
        let gain = gain.clamp(0.0, 1.0);
        let muted = self.frozen.load() && self.preset() == ReverbPreset::Glacial;
        self.input_gain.store(if muted { 0.0 } else { gain });
    }

    /// Effective wet/dry amount after the preset mapping.
    pub fn amount(&self) -> f32 {
        self.amount.load()
    }

    /// Effective loop gain after the preset mapping.
    pub fn time(&self) -> f32 {
        self.reverb_time.load()
    }

    /// Effective all-pass coefficient.
    pub fn diffusion(&self) -> f32 {
        self.diffusion.load()
    }

    /// Effective damping coefficient.
    pub fn lp(&self) -> f32 {
        self.lp.load()
    }

    /// Effective input send gain.
    pub fn input_gain(&self) -> f32 {
        self.input_gain.load()
    }

    /// Whether the tail is currently frozen.
    pub fn frozen(&self) -> bool {
        self.frozen.load()
    }
}

impl<S: Sample> Effect for Reverb<'_, S> {
    fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        let preset = self.preset();
        let kap = self.diffusion.load();
        let klp = self.lp.load();
        let krt = self.reverb_time.load();
        let amount = self.amount.load();
        let gain = self.input_gain.load();

        let mut lp_1 = self.lp_decay_1;
        let mut lp_2 = self.lp_decay_2;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let lfo_1 = self.lfo.next(0);
            let lfo_2 = self.lfo.next(1);

            // Texture presets smear the first diffuser: a slow modulated
            // read poked back into the middle of its region blurs the
            // early reflections into a wash.
            if matches!(preset, ReverbPreset::Mist | ReverbPreset::Glacial) {
                let depth = if preset == ReverbPreset::Mist {
                    60.0
                } else {
                    80.0
                };
                let smeared = self.arena.read_linear(&self.ap1, 10.0 + lfo_1 * depth);
                self.arena.write_at(&self.ap1, 100, smeared);
            }

            // Left input through the shared diffuser chain.
            let mut acc = *l * gain;
            acc = self.arena.allpass(&mut self.ap1, acc, kap);
            acc = self.arena.allpass(&mut self.ap2, acc, kap);
            acc = self.arena.allpass(&mut self.ap3, acc, kap);
            acc = self.arena.allpass(&mut self.ap4, acc, kap);
            let apout_l = acc;

            // Branch one: cross-feed from branch two's long delay, with
            // the tap position depending on the preset's character.
            let mut acc = apout_l;
            let cross = match preset {
                ReverbPreset::Mist => self.arena.read_linear(&self.del2, 4680.0 + lfo_2 * 100.0),
                ReverbPreset::Glacial => self.arena.read_linear(&self.del2, 6211.0 + lfo_2 * 100.0),
                _ => self.arena.read_linear(&self.del2, 6261.0 + lfo_2 * 50.0),
            };
            acc += cross * krt;
            acc = one_pole(&mut lp_1, acc, klp);
            acc = self.arena.allpass(&mut self.dap1a, acc, -kap);
            acc = self.arena.allpass(&mut self.dap1b, acc, kap);
            self.arena.write(&mut self.del1, acc);
            *l = wet_dry_mix(*l, acc * 2.0, amount);

            // Right input through the same diffusers.
            let mut acc = *r * gain;
            acc = self.arena.allpass(&mut self.ap1, acc, kap);
            acc = self.arena.allpass(&mut self.ap2, acc, kap);
            acc = self.arena.allpass(&mut self.ap3, acc, kap);
            acc = self.arena.allpass(&mut self.ap4, acc, kap);
            let apout_r = acc;

            // Branch two, cross-fed from branch one.
            let mut acc = apout_r;
            let cross = if matches!(preset, ReverbPreset::Mist | ReverbPreset::Glacial) {
                self.arena.read(&self.del1, self.del1.tail())
            } else {
                self.arena.read_linear(&self.del1, 4460.0 + lfo_1 * 40.0)
            };
            acc += cross * krt;
            acc = one_pole(&mut lp_2, acc, klp);
            acc = self.arena.allpass(&mut self.dap2a, acc, kap);
            acc = self.arena.allpass(&mut self.dap2b, acc, -kap);
            self.arena.write(&mut self.del2, acc);
            *r = wet_dry_mix(*r, acc * 2.0, amount);
        }

        self.lp_decay_1 = lp_1;
        self.lp_decay_2 = lp_2;
    }

    fn clear(&mut self) {
        self.arena.clear();
        for line in [
            &mut self.ap1,
            &mut self.ap2,
            &mut self.ap3,
            &mut self.ap4,
            &mut self.dap1a,
            &mut self.dap1b,
            &mut self.del1,
            &mut self.dap2a,
            &mut self.dap2b,
            &mut self.del2,
        ] {
            line.reset();
        }
        self.lp_decay_1 = 0.0;
        self.lp_decay_2 = 0.0;
        self.lfo.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!("reverb cleared");
    }
}
