//! Single-lookup base 2 logarithm and exponential.
//!
//! The integral part of the logarithm comes from the position of the most
//! significant set bit, and the fractional part from one table lookup indexed
//! by the next [LOGTSIZEN] bits.  No floating point is used.

use crate::tables::{tables, LOGTSIZEN};
use crate::LogFxP;

/// Fractional bits of a [LogFxP]
const LOG_FRAC_BITS: u32 = 23;
/// The log table has 16 fractional bits, we want [LOG_FRAC_BITS]
const LOGT_SHIFT: u32 = LOG_FRAC_BITS - 16;
/// The exp table has 15 fractional bits
const EXPT_FRAC_BITS: u32 = 15;

const _: () = assert!(LOG_FRAC_BITS == LogFxP::FRAC_NBITS);

/// Returned by [fast_log2] for an input of zero
pub const LOG2_ZERO: LogFxP = LogFxP::MIN;

/// Approximate `log2(value)`.
///
/// The error is under 0.006 (the width of one table step), and the result is
/// exact for powers of two.  The output is monotonically non-decreasing in the
/// input, and strictly increasing for inputs up to `2^LOGTSIZEN`.  The
/// logarithm of zero is undefined, so zero returns [LOG2_ZERO] which is below
/// any other output.
pub fn fast_log2(value: u32) -> LogFxP {
    if value == 0 {
        return LOG2_ZERO;
    }
    let lz = value.leading_zeros();
    let exponent = (u32::BITS - 1 - lz) as i32;
    // drop the leading one, leaving the mantissa in the top bits
    let mantissa = (value << lz) << 1;
    let index = (mantissa >> (u32::BITS - LOGTSIZEN)) as usize;
    let frac = (tables().log()[index] as i32) << LOGT_SHIFT;
    LogFxP::from_bits((exponent << LOG_FRAC_BITS) + frac)
}

/// Approximate `2^x`, truncated to an integer.
///
/// This is the inverse of [fast_log2], to within one table step (about 0.3%).
/// Negative exponents return zero, and anything that would not fit in a `u32`
/// saturates to `u32::MAX`.
pub fn fast_exp2(x: LogFxP) -> u32 {
    let bits = x.to_bits();
    let exponent = bits >> LOG_FRAC_BITS;
    if exponent < 0 {
        return 0;
    }
    if exponent >= u32::BITS as i32 {
        return u32::MAX;
    }
    let index = ((bits >> (LOG_FRAC_BITS - LOGTSIZEN)) & ((1 << LOGTSIZEN) - 1)) as usize;
    let mantissa = tables().exp()[index] as u64;
    let result = (mantissa << exponent) >> EXPT_FRAC_BITS;
    u32::try_from(result).unwrap_or(u32::MAX)
}
