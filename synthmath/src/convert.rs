//! Conversions between integers, floats, and [FracFxP] values.
//!
//! None of these saturate: overflow is the caller's problem, and wraps.

use crate::FracFxP;

/// Number of fractional bits in a [FracFxP]
pub const FRAC_BITS: u32 = 21;

const _: () = assert!(FRAC_BITS == <FracFxP as fixed::traits::Fixed>::FRAC_NBITS);

/// Convert an integer to a [FracFxP].  Integers outside of `[-1024, 1024)` wrap.
#[inline(always)]
pub fn int_to_frac(i: i32) -> FracFxP {
    FracFxP::from_bits(i << FRAC_BITS)
}

/// Convert a [FracFxP] to an integer, rounding towards negative infinity.
#[inline(always)]
pub fn frac_to_int(x: FracFxP) -> i32 {
    x.to_bits() >> FRAC_BITS
}

/// Convert a float to a [FracFxP], truncating towards zero.
#[inline(always)]
pub fn float_to_frac(f: f32) -> FracFxP {
    FracFxP::from_bits((f * (1u32 << FRAC_BITS) as f32) as i32)
}
