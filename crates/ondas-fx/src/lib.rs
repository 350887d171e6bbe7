//! Effect topologies built on the `ondas-core` delay-line arena.
//!
//! Three stereo effects for the fixed-point render loop of a hardware
//! synth voice:
//!
//! - [`Reverb`]: a Griesinger-style figure-eight reverb with four tonal
//!   presets, including a freeze mode.
//! - [`Delay`]: a mono-feedback echo with a slow pitch drift on the read
//!   head.
//! - [`Chorus`]: a multi-voice detune effect; one tuning gives a classic
//!   two-voice chorus, another a thicker four-voice ensemble.
//!
//! Each effect borrows one caller-owned sample buffer for its entire
//! delay memory (`Reverb::BUFFER_SIZE` etc.), processes stereo blocks in
//! place through the [`Effect`](ondas_core::Effect) trait, and exposes
//! control-rate parameter setters through `&self` relaxed-atomic cells so
//! a UI context can poke parameters while the audio callback renders.
//!
//! All parameters are unit-range knobs; out-of-range values clamp. There
//! are no error paths anywhere in the render chain.
#![cfg_attr(not(feature = "std"), no_std)]

mod chorus;
mod delay;
mod reverb;

pub use chorus::{Chorus, ChorusTuning};
pub use delay::Delay;
pub use reverb::{Reverb, ReverbPreset};
