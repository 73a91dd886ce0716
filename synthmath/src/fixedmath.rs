//! Rounding high-multiply primitives.
//!
//! These keep only the most significant 32 bits of a 64 bit signed product,
//! rounded to nearest, exactly like the ARMv7E-M `SMMULR`, `SMMLAR` and
//! `SMMLSR` instructions.  On Cortex-M parts with the DSP extension they
//! compile down to that single instruction; everywhere else (or with the
//! `portable` feature) a 64 bit reference implementation is used.  The two
//! are bit-for-bit identical, including wraparound of the accumulate forms.

/// Rounding constant added before discarding the low word
const ROUND: i64 = 1 << 31;

#[cfg_attr(
    all(target_arch = "arm", target_feature = "dsp", not(feature = "portable"), not(test)),
    allow(dead_code)
)]
mod portable {
    use super::ROUND;

    #[inline(always)]
    pub const fn smmulr(a: i32, b: i32) -> i32 {
        // |a*b| <= 2^62, so this cannot overflow
        ((a as i64 * b as i64 + ROUND) >> 32) as i32
    }

    #[inline(always)]
    pub const fn smmlar(acc: i32, a: i32, b: i32) -> i32 {
        let sum = ((acc as i64) << 32)
            .wrapping_add(a as i64 * b as i64)
            .wrapping_add(ROUND);
        (sum >> 32) as i32
    }

    #[inline(always)]
    pub const fn smmlsr(acc: i32, a: i32, b: i32) -> i32 {
        let diff = ((acc as i64) << 32)
            .wrapping_sub(a as i64 * b as i64)
            .wrapping_add(ROUND);
        (diff >> 32) as i32
    }
}

#[cfg(all(target_arch = "arm", target_feature = "dsp", not(feature = "portable")))]
mod dsp {
    use core::arch::asm;

    #[inline(always)]
    pub fn smmulr(a: i32, b: i32) -> i32 {
        let result: i32;
        unsafe {
            asm!(
                "smmulr {0}, {1}, {2}",
                out(reg) result,
                in(reg) a,
                in(reg) b,
                options(pure, nomem, nostack, preserves_flags),
            );
        }
        result
    }

    #[inline(always)]
    pub fn smmlar(acc: i32, a: i32, b: i32) -> i32 {
        let result: i32;
        unsafe {
            asm!(
                "smmlar {0}, {1}, {2}, {3}",
                out(reg) result,
                in(reg) a,
                in(reg) b,
                in(reg) acc,
                options(pure, nomem, nostack, preserves_flags),
            );
        }
        result
    }

    #[inline(always)]
    pub fn smmlsr(acc: i32, a: i32, b: i32) -> i32 {
        let result: i32;
        unsafe {
            asm!(
                "smmlsr {0}, {1}, {2}, {3}",
                out(reg) result,
                in(reg) a,
                in(reg) b,
                in(reg) acc,
                options(pure, nomem, nostack, preserves_flags),
            );
        }
        result
    }
}

#[cfg(all(target_arch = "arm", target_feature = "dsp", not(feature = "portable")))]
use dsp as imp;
#[cfg(not(all(target_arch = "arm", target_feature = "dsp", not(feature = "portable"))))]
use portable as imp;

/// Returns the high 32 bits of `a * b`, rounded to nearest.
///
/// Viewing both operands as `Q31` fractions, this is their product as a
/// `Q30` value, i.e. half of the "true" `Q31` product.
#[inline(always)]
pub fn mul_high_rounded(a: i32, b: i32) -> i32 {
    imp::smmulr(a, b)
}

/// Returns the high 32 bits of `(acc << 32) + a * b`, rounded to nearest.
/// The sum wraps on overflow, same as the hardware.
#[inline(always)]
pub fn mul_add_high_rounded(acc: i32, a: i32, b: i32) -> i32 {
    imp::smmlar(acc, a, b)
}

/// Returns the high 32 bits of `(acc << 32) - a * b`, rounded to nearest.
/// The difference wraps on overflow, same as the hardware.
#[inline(always)]
pub fn mul_sub_high_rounded(acc: i32, a: i32, b: i32) -> i32 {
    imp::smmlsr(acc, a, b)
}

/// Blend two table samples with a `Q31` weight.
///
/// Computes `y1 * (1 - pf) + y2 * pf` as
/// `(round_high(y1 * (MAX - pf)) + round_high(y2 * pf)) << 1`.  `pf` must be in
/// `[0, i32::MAX]`.  The weights sum to less than one, so the intermediate sum
/// fits in 31 bits for any `y1` and `y2` and the final shift never overflows.
#[inline(always)]
pub fn interpolate(y1: i32, y2: i32, pf: i32) -> i32 {
    let pfc = i32::MAX - pf;
    let r = mul_high_rounded(y1, pfc);
    mul_add_high_rounded(r, y2, pf) << 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, RngCore, SeedableRng};

    const EDGES: [i32; 9] = [
        i32::MIN,
        i32::MIN + 1,
        -(1 << 30),
        -1,
        0,
        1,
        1 << 30,
        i32::MAX - 1,
        i32::MAX,
    ];

    fn reference(acc: i32, a: i32, b: i32, subtract: bool) -> i32 {
        let prod = (a as i128) * (b as i128);
        let acc = (acc as i128) << 32;
        let sum = if subtract { acc - prod } else { acc + prod };
        ((sum + (1i128 << 31)) >> 32) as i32
    }

    fn check(acc: i32, a: i32, b: i32) {
        assert_eq!(mul_high_rounded(a, b), reference(0, a, b, false));
        assert_eq!(mul_add_high_rounded(acc, a, b), reference(acc, a, b, false));
        assert_eq!(mul_sub_high_rounded(acc, a, b), reference(acc, a, b, true));
        assert_eq!(portable::smmulr(a, b), mul_high_rounded(a, b));
        assert_eq!(portable::smmlar(acc, a, b), mul_add_high_rounded(acc, a, b));
        assert_eq!(portable::smmlsr(acc, a, b), mul_sub_high_rounded(acc, a, b));
    }

    #[test]
    fn primitives_match_wide_reference_at_edges() {
        for acc in EDGES {
            for a in EDGES {
                for b in EDGES {
                    check(acc, a, b);
                }
            }
        }
    }

    #[test]
    fn primitives_match_wide_reference_random() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..100_000 {
            let acc = rng.next_u32() as i32;
            let a = rng.next_u32() as i32;
            let b = rng.next_u32() as i32;
            check(acc, a, b);
        }
    }

    #[test]
    fn mul_high_rounds_to_nearest() {
        // 0.5 * 2^-32 rounds up, just below rounds down
        assert_eq!(mul_high_rounded(1 << 16, 1 << 15), 1);
        assert_eq!(mul_high_rounded((1 << 16) - 1, 1 << 15), 0);
        assert_eq!(mul_high_rounded(-(1 << 16), 1 << 15), 0);
        assert_eq!(mul_high_rounded(-(1 << 16) - 2, 1 << 15), -1);
    }

    #[test]
    fn interpolate_endpoints() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let y1 = rng.next_u32() as i32;
            let y2 = rng.next_u32() as i32;
            assert!((interpolate(y1, y2, 0) as i64 - y1 as i64).abs() <= 2);
            assert!((interpolate(y1, y2, i32::MAX) as i64 - y2 as i64).abs() <= 2);
            let mid = (y1 as i64 + y2 as i64) / 2;
            assert!((interpolate(y1, y2, 1 << 30) as i64 - mid).abs() <= 4);
        }
    }

    #[test]
    fn interpolate_does_not_overflow_at_extremes() {
        for y1 in [i32::MIN, i32::MAX] {
            for y2 in [i32::MIN, i32::MAX] {
                for pf in [0, 1, 1 << 30, i32::MAX - 1, i32::MAX] {
                    let exact = (y1 as f64) * (1.0 - pf as f64 / 2147483648.0)
                        + (y2 as f64) * (pf as f64 / 2147483648.0);
                    let got = interpolate(y1, y2, pf) as f64;
                    assert!((got - exact).abs() < 4.0, "{y1} {y2} {pf}: {got} vs {exact}");
                }
            }
        }
    }
}
