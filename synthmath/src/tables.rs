//! Lookup tables shared by the interpolators, pitch conversion, and the fast
//! log/exp approximations.
//!
//! Everything here is generated by `const fn`, so the tables are computed once
//! by the compiler and live in read-only memory (flash, on an MCU).  Sizes are
//! fixed protocol constants - the index shifts used by the interpolators are
//! derived from them and checked below at compile time.

use crate::context::SampleRate;
use core::f64::consts::{LN_2, PI, TAU};

/// Number of samples in one cycle of the 16 bit sine table
pub const SINETSIZE: usize = 1024;
/// Number of samples in one cycle of the 32 bit (double resolution) sine table
pub const SINE2TSIZE: usize = 4096;
/// Number of samples in the Hanning window table
pub const WINDOWSIZE: usize = 1024;
/// Number of entries in the pitch table, one per semitone
pub const PITCHTSIZE: usize = 257;
/// Index into the pitch table representing a pitch of zero (E4)
pub const PITCH_TABLE_CENTER: usize = 128;
/// Number of entries in the exponential table
pub const EXPTSIZE: usize = 256;
/// Number of entries in the logarithm table
pub const LOGTSIZE: usize = 256;
/// log2 of [LOGTSIZE]
pub const LOGTSIZEN: u32 = 8;

/// Phase bits dropped to index [Tables::sine2]
pub(crate) const SINE2T_SHIFT: u32 = 20;
/// Phase bits dropped to index [Tables::window]
pub(crate) const WINDOWT_SHIFT: u32 = 22;
/// Number of fractional bits in a pitch (one table step is one semitone)
pub(crate) const PITCHT_SHIFT: u32 = 21;

const _: () = assert!(SINE2TSIZE == 1 << (u32::BITS - SINE2T_SHIFT));
const _: () = assert!(WINDOWSIZE == 1 << (u32::BITS - WINDOWT_SHIFT));
const _: () = assert!(PITCHTSIZE == 2 * PITCH_TABLE_CENTER + 1);
const _: () = assert!(LOGTSIZE == 1 << LOGTSIZEN);
const _: () = assert!(EXPTSIZE == LOGTSIZE);

/// MIDI note number of the pitch table center
const CENTER_NOTE: f64 = 64.0;
/// A440
const A4_NOTE: f64 = 69.0;
const A4_FREQ: f64 = 440.0;
/// Series terms smaller than this are dropped
const EPSILON: f64 = 1e-18;

// The helpers below exist because the ones in std are not const evaluable

const fn f_abs(x: f64) -> f64 {
    if x < 0f64 {
        -x
    } else {
        x
    }
}

// Round half away from zero
const fn round(x: f64) -> f64 {
    if x < 0f64 {
        ((x - 0.5f64) as i64) as f64
    } else {
        ((x + 0.5f64) as i64) as f64
    }
}

// sin(x), range reduced to [-pi/2, pi/2] before summing the Taylor series
const fn sin(mut x: f64) -> f64 {
    while x > PI {
        x -= TAU;
    }
    while x < -PI {
        x += TAU;
    }
    if x > PI / 2f64 {
        x = PI - x;
    } else if x < -PI / 2f64 {
        x = -PI - x;
    }
    let x2 = x * x;
    let mut term = x;
    let mut acc = x;
    let mut n = 1u32;
    while f_abs(term) > EPSILON {
        term = -term * x2 / ((2 * n) * (2 * n + 1)) as f64;
        acc += term;
        n += 1;
    }
    acc
}

// 2^x, as 2^floor(x) * e^(frac(x)*ln(2))
const fn exp2(x: f64) -> f64 {
    let mut n = x as i64;
    if (n as f64) > x {
        n -= 1;
    }
    let r = (x - n as f64) * LN_2;
    let mut term = 1f64;
    let mut acc = 1f64;
    let mut k = 1u32;
    while term > EPSILON {
        term = term * r / k as f64;
        acc += term;
        k += 1;
    }
    while n > 0 {
        acc *= 2f64;
        n -= 1;
    }
    while n < 0 {
        acc /= 2f64;
        n += 1;
    }
    acc
}

// log2(1 + x) for x in [0, 1), using ln(1+x) = 2 atanh(x / (2 + x))
const fn log2_1p(x: f64) -> f64 {
    let t = x / (2f64 + x);
    let t2 = t * t;
    let mut power = t;
    let mut acc = 0f64;
    let mut k = 1u32;
    while power > EPSILON {
        acc += power / k as f64;
        power *= t2;
        k += 2;
    }
    2f64 * acc / LN_2
}

const fn sine_table() -> [i16; SINETSIZE + 1] {
    let mut table = [0i16; SINETSIZE + 1];
    let mut i = 0;
    while i < SINETSIZE {
        let theta = TAU * (i as f64) / (SINETSIZE as f64);
        table[i] = round(i16::MAX as f64 * sin(theta)) as i16;
        i += 1;
    }
    table[SINETSIZE] = table[0];
    table
}

const fn sine2_table() -> [i32; SINE2TSIZE + 1] {
    let mut table = [0i32; SINE2TSIZE + 1];
    let mut i = 0;
    while i < SINE2TSIZE {
        let theta = TAU * (i as f64) / (SINE2TSIZE as f64);
        table[i] = round(i32::MAX as f64 * sin(theta)) as i32;
        i += 1;
    }
    table[SINE2TSIZE] = table[0];
    table
}

// 0.5 - 0.5 cos(2 pi x) == sin^2(pi x)
const fn window_table() -> [i16; WINDOWSIZE + 1] {
    let mut table = [0i16; WINDOWSIZE + 1];
    let mut i = 0;
    while i < WINDOWSIZE {
        let s = sin(PI * (i as f64) / (WINDOWSIZE as f64));
        table[i] = round(i16::MAX as f64 * s * s) as i16;
        i += 1;
    }
    table[WINDOWSIZE] = table[0];
    table
}

// Phase increment per sample (as a fraction of 2^32) for each semitone,
// clipped to just below Nyquist
const fn pitch_table(sample_rate: f64) -> [u32; PITCHTSIZE] {
    const NYQUIST_PHASE: f64 = i32::MAX as f64;
    let mut table = [0u32; PITCHTSIZE];
    let mut i = 0;
    while i < PITCHTSIZE {
        let note = (i as f64) - (PITCH_TABLE_CENTER as f64) + CENTER_NOTE;
        let freq = A4_FREQ * exp2((note - A4_NOTE) / 12f64);
        let phase = 4294967296f64 * freq / sample_rate;
        table[i] = if phase > NYQUIST_PHASE {
            i32::MAX as u32
        } else {
            round(phase) as u32
        };
        i += 1;
    }
    table
}

// 2^(i/256) with 15 fractional bits
const fn exp_table() -> [u16; EXPTSIZE] {
    let mut table = [0u16; EXPTSIZE];
    let mut i = 0;
    while i < EXPTSIZE {
        let e = exp2((i as f64) / (EXPTSIZE as f64));
        table[i] = round(e * (1u32 << 15) as f64) as u16;
        i += 1;
    }
    table
}

// log2(1 + i/256) with 16 fractional bits
const fn log_table() -> [u16; LOGTSIZE] {
    let mut table = [0u16; LOGTSIZE];
    let mut i = 0;
    while i < LOGTSIZE {
        let l = log2_1p((i as f64) / (LOGTSIZE as f64));
        table[i] = round(l * (1u32 << 16) as f64) as u16;
        i += 1;
    }
    table
}

/// The complete set of lookup tables.
///
/// All sine and window tables carry a guard sample: entry `N` duplicates entry
/// `0`, so interpolating between `i` and `i + 1` never needs a wraparound
/// check.
#[derive(Clone, PartialEq, Eq)]
pub struct Tables {
    sinet: [i16; SINETSIZE + 1],
    sine2t: [i32; SINE2TSIZE + 1],
    windowt: [i16; WINDOWSIZE + 1],
    pitcht_480: [u32; PITCHTSIZE],
    pitcht_441: [u32; PITCHTSIZE],
    expt: [u16; EXPTSIZE],
    logt: [u16; LOGTSIZE],
}

static TABLES: Tables = Tables::generate();

impl Tables {
    /// Build every table.  This is a pure function of the size constants in
    /// this module, and is what the compiler evaluates to populate the tables
    /// returned by [initialize_tables].
    pub const fn generate() -> Self {
        Self {
            sinet: sine_table(),
            sine2t: sine2_table(),
            windowt: window_table(),
            pitcht_480: pitch_table(SampleRate::Khz48_0.value() as f64),
            pitcht_441: pitch_table(SampleRate::Khz44_1.value() as f64),
            expt: exp_table(),
            logt: log_table(),
        }
    }
    /// One cycle of a sine wave, full scale 16 bit, plus guard sample
    pub fn sine(&self) -> &[i16; SINETSIZE + 1] {
        &self.sinet
    }
    /// One cycle of a sine wave, full scale 32 bit, plus guard sample
    pub fn sine2(&self) -> &[i32; SINE2TSIZE + 1] {
        &self.sine2t
    }
    /// A Hanning window, 16 bit, plus guard sample
    pub fn window(&self) -> &[i16; WINDOWSIZE + 1] {
        &self.windowt
    }
    /// Phase increment per sample for each semitone, where entry
    /// [PITCH_TABLE_CENTER] is E4.  Entries are clipped at `i32::MAX` (just
    /// below the Nyquist frequency)
    pub fn pitch(&self, sample_rate: SampleRate) -> &[u32; PITCHTSIZE] {
        match sample_rate {
            SampleRate::Khz48_0 => &self.pitcht_480,
            SampleRate::Khz44_1 => &self.pitcht_441,
        }
    }
    /// `2^(i/256)` as an unsigned number with 15 fractional bits
    pub fn exp(&self) -> &[u16; EXPTSIZE] {
        &self.expt
    }
    /// `log2(1 + i/256)` as an unsigned number with 16 fractional bits
    pub fn log(&self) -> &[u16; LOGTSIZE] {
        &self.logt
    }
}

/// Get the lookup tables.
///
/// The tables are baked in at compile time, so this cannot fail and may be
/// called any number of times; each call returns the same tables.  The
/// firmware calls it once during startup before any audio processing.
pub fn initialize_tables() -> &'static Tables {
    log::debug!(
        "lookup tables ready ({} bytes)",
        core::mem::size_of::<Tables>()
    );
    &TABLES
}

pub(crate) fn tables() -> &'static Tables {
    &TABLES
}
