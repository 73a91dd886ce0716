//! Linearly interpolated table lookups driven by a 32 bit phase accumulator.
//!
//! The top bits of the phase index the table and the remaining bits become a
//! `Q31` interpolation weight.  Because every table has a guard sample, the
//! upper interpolation point `i + 1` is always in bounds and no wraparound
//! check is needed.

use crate::fixedmath::interpolate;
use crate::tables::{tables, SINE2T_SHIFT, WINDOWT_SHIFT};
use crate::AmplitudeFxP;

const SINE2T_FRAC_MASK: u32 = (1 << SINE2T_SHIFT) - 1;
const WINDOWT_FRAC_MASK: u32 = (1 << WINDOWT_SHIFT) - 1;

/// Evaluate a sine wave at the given phase, where the full `u32` range is one
/// cycle (`0` is 0 degrees, `1 << 30` is 90 degrees, and so on).
pub fn evaluate_sine(phase: u32) -> AmplitudeFxP {
    let table = tables().sine2();
    let pi = (phase >> SINE2T_SHIFT) as usize;
    let y1 = table[pi];
    let y2 = table[pi + 1];
    let pf = ((phase & SINE2T_FRAC_MASK) << (31 - SINE2T_SHIFT)) as i32;
    AmplitudeFxP::from_bits(interpolate(y1, y2, pf))
}

/// Evaluate a Hanning window at the given phase, where the full `u32` range
/// spans the window.  The output is zero at both ends and peaks just short of
/// one in the middle.
pub fn evaluate_window(phase: u32) -> AmplitudeFxP {
    let table = tables().window();
    let pi = (phase >> WINDOWT_SHIFT) as usize;
    // widen into the top half so the same Q31 blend applies
    let y1 = (table[pi] as i32) << 16;
    let y2 = (table[pi + 1] as i32) << 16;
    let pf = ((phase & WINDOWT_FRAC_MASK) << (31 - WINDOWT_SHIFT)) as i32;
    AmplitudeFxP::from_bits(interpolate(y1, y2, pf))
}
