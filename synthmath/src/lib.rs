//! This crate contains the fixed-point fast-math primitives used by the
//! synthesis objects of an embedded audio engine.  It is `no_std`, does not
//! allocate, and every function runs in a small, bounded number of cycles so
//! it may be called from a hard real-time audio callback once per sample.
//!
//! The building blocks are:
//!
//!  - Rounding high-multiply primitives ([mul_high_rounded] and friends),
//!    mirroring the ARM `SMMULR`/`SMMLAR`/`SMMLSR` instructions, with an
//!    inline-assembly fast path on Cortex-M parts with the DSP extension.
//!  - A set of lookup tables ([Tables]) generated at compile time and obtained
//!    through [initialize_tables].
//!  - Table interpolators for a sine wave ([evaluate_sine]) and a Hanning
//!    window ([evaluate_window]) indexed by a 32 bit phase accumulator.
//!  - Pitch to frequency conversion ([pitch_to_frequency] and
//!    [pitch_to_frequency_extended]).
//!  - A single-lookup base 2 logarithm ([fast_log2]) and its inverse
//!    ([fast_exp2]).
//!  - Conversions between integers, floats, and [FracFxP] values.
//!  - A linear congruential noise source ([Lcg], and `next_random` for a
//!    process-wide generator on targets with atomics).
//!
//! Like the rest of the synthesizer, fixed point types carry the FxP suffix so
//! the location of the binary point is preserved within the type system.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

mod convert;
mod fastlog;
mod fixedmath;
mod interp;
mod pitch;
mod random;
mod tables;

pub mod context;
pub mod util;

/// A generic signed 32 bit fixed point value with 21 fractional bits.  Used
/// throughout the engine for control signals, and by the integer/float
/// conversion helpers in this crate.
pub type FracFxP = fixed::types::I11F21;
/// A pitch, in semitones, relative to E4 (MIDI note number 64).  The integral
/// part is the semitone offset, so the full representable range is -1024 to
/// +1024 semitones, though only a fraction of that is meaningful (see
/// [pitch_to_frequency]).
pub type PitchFxP = FracFxP;
/// A frequency expressed in cycles per sample.  This is directly usable as the
/// per-sample increment of a 32 bit phase accumulator (see [evaluate_sine]).
/// The Nyquist frequency is 0.5.
pub type FrequencyFxP = fixed::types::U0F32;
/// A signed amplitude in the range `[-1, 1)`, as output by the interpolators
pub type AmplitudeFxP = fixed::types::I1F31;
/// A base 2 logarithm with 23 fractional bits, as output by [fast_log2]
pub type LogFxP = fixed::types::I9F23;

pub use context::{Context, SampleRate};
pub use convert::{float_to_frac, frac_to_int, int_to_frac, FRAC_BITS};
pub use fastlog::{fast_exp2, fast_log2, LOG2_ZERO};
pub use fixedmath::{interpolate, mul_add_high_rounded, mul_high_rounded, mul_sub_high_rounded};
pub use interp::{evaluate_sine, evaluate_window};
pub use pitch::{pitch_to_frequency, pitch_to_frequency_extended, PITCH_BITS, PITCH_BITS_EXTENDED};
pub use random::{Lcg, DEFAULT_SEED};
#[cfg(target_has_atomic = "32")]
pub use random::{next_random, seed_random, SharedLcg};
pub use tables::{
    initialize_tables, Tables, EXPTSIZE, LOGTSIZE, LOGTSIZEN, PITCHTSIZE, PITCH_TABLE_CENTER,
    SINE2TSIZE, SINETSIZE, WINDOWSIZE,
};
