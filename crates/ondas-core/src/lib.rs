//! Ondas Core - delay-line arena and DSP primitives for the ondas FX engine
//!
//! This crate provides the building blocks the effect topologies in
//! `ondas-fx` are made of, designed for hard-real-time audio processing
//! with zero allocation in the audio path and no dynamic memory at all:
//! every delay line lives inside one externally owned buffer.
//!
//! # Core Abstractions
//!
//! ## Memory Arena & Delay Lines
//!
//! - [`Arena`] - partitions one caller-owned buffer into disjoint circular
//!   delay-line regions, assigned once and never moved
//! - [`DelayLine`] - a plain index handle into an arena region, with
//!   integer, linear, cubic and Hermite-interpolated reads
//!
//! ## Sample Storage
//!
//! - [`Sample`] - storage format for one sample inside a delay line:
//!   raw `f32`, or quantized `i16` for SRAM-constrained targets
//!
//! ## Modulation & Smoothing
//!
//! - [`Lfo`] / [`LfoBank`] - free-running sine phase accumulators that
//!   modulate delay-line read positions
//! - [`one_pole`] - one-pole lowpass over a caller-owned state cell
//!
//! ## Control-Rate Parameters
//!
//! - [`AtomicF32`] / [`AtomicFlag`] - relaxed-ordering parameter cells so
//!   a control-rate context can write coefficients while the audio path
//!   reads them, without locks in the audio path
//!
//! ## Effect Boundary
//!
//! - [`Effect`] - in-place stereo block processing trait implemented by
//!   every topology in `ondas-fx`
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded firmware. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ondas-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use ondas_core::Arena;
//!
//! // Two delay lines carved out of one caller-owned buffer.
//! let mut buffer = [0.0f32; 1024];
//! let (mut arena, [mut a, mut b]) = Arena::partition(&mut buffer, [512, 512]);
//!
//! arena.write(&mut a, 1.0);
//! arena.write(&mut b, -1.0);
//! assert_eq!(arena.read(&a, 0), 1.0);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: fixed work per sample, no allocation, no blocking
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//! - **Total operations**: parameters clamp; the audio path never fails

#![cfg_attr(not(feature = "std"), no_std)]

pub mod arena;
pub mod effect;
pub mod interp;
pub mod lfo;
pub mod math;
pub mod one_pole;
pub mod param;
pub mod sample;

// Re-export main types at crate root
pub use arena::{Arena, DelayLine};
pub use effect::Effect;
pub use interp::{cubic, hermite, linear};
pub use lfo::{Lfo, LfoBank};
pub use math::{flush_denormal, mono_sum, wet_dry_mix};
pub use one_pole::one_pole;
pub use param::{AtomicF32, AtomicFlag};
pub use sample::Sample;
