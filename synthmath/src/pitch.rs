//! Pitch to frequency conversion by pitch table interpolation.

use crate::context::SampleRate;
use crate::fixedmath::interpolate;
use crate::tables::{tables, PITCHTSIZE, PITCHT_SHIFT, PITCH_TABLE_CENTER};
use crate::{FrequencyFxP, PitchFxP};

/// Significant bits of the pitch kept by [pitch_to_frequency].  This covers
/// +/- 64 semitones about E4, i.e. the full MIDI note range.
pub const PITCH_BITS: u32 = 28;
/// Significant bits of the pitch kept by [pitch_to_frequency_extended], for
/// +/- 128 semitones about E4.
pub const PITCH_BITS_EXTENDED: u32 = 29;

const PITCH_FRAC_MASK: i32 = (1 << PITCHT_SHIFT) - 1;

// Both saturated ranges must index inside the table, including the upper
// interpolation point
const _: () = assert!(PITCH_TABLE_CENTER >= (1 << (PITCH_BITS_EXTENDED - 1)) >> PITCHT_SHIFT);
const _: () = assert!(
    PITCH_TABLE_CENTER + ((1 << (PITCH_BITS_EXTENDED - 1)) >> PITCHT_SHIFT) < PITCHTSIZE
);
const _: () = assert!(PITCH_BITS < PITCH_BITS_EXTENDED);

/// Saturate a signed value to `bits` significant bits (like the ARM `SSAT`)
#[inline(always)]
fn saturate(x: i32, bits: u32) -> i32 {
    let max = (1i32 << (bits - 1)) - 1;
    x.clamp(-max - 1, max)
}

#[inline(always)]
pub(crate) fn mtof(sample_rate: SampleRate, pitch: PitchFxP, bits: u32) -> FrequencyFxP {
    let table = tables().pitch(sample_rate);
    let p = saturate(pitch.to_bits(), bits);
    let pi = (PITCH_TABLE_CENTER as i32 + (p >> PITCHT_SHIFT)) as usize;
    // entries are clipped at i32::MAX, so these are lossless
    let y1 = table[pi] as i32;
    let y2 = table[pi + 1] as i32;
    let pf = (p & PITCH_FRAC_MASK) << (31 - PITCHT_SHIFT);
    FrequencyFxP::from_bits(interpolate(y1, y2, pf) as u32)
}

/// Convert a pitch, in semitones relative to E4, to a frequency in cycles per
/// sample at the reference sample rate of 48kHz.
///
/// The pitch is first saturated to [PITCH_BITS] significant bits, so anything
/// outside of +/- 64 semitones is clamped rather than wrapped.  Between
/// semitones the frequency is linearly interpolated, which is accurate to
/// better than a cent.
///
/// Use [crate::Context::pitch_to_frequency] for other sample rates.
pub fn pitch_to_frequency(pitch: PitchFxP) -> FrequencyFxP {
    mtof(SampleRate::default(), pitch, PITCH_BITS)
}

/// Like [pitch_to_frequency], but saturating to [PITCH_BITS_EXTENDED]
/// significant bits instead.  This allows sweeping +/- 128 semitones about E4.
/// Frequencies above Nyquist are clipped to Nyquist.
pub fn pitch_to_frequency_extended(pitch: PitchFxP) -> FrequencyFxP {
    mtof(SampleRate::default(), pitch, PITCH_BITS_EXTENDED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::tables::initialize_tables;
    use crate::util::calculate_cents;

    fn pitch_bits(semitones: i32) -> PitchFxP {
        PitchFxP::from_bits(semitones << PITCHT_SHIFT)
    }

    #[test]
    fn center_is_e4() {
        let table = initialize_tables().pitch(SampleRate::Khz48_0);
        let center = table[PITCH_TABLE_CENTER];
        let out = pitch_to_frequency(PitchFxP::ZERO).to_bits();
        assert!(out.abs_diff(center) <= 1);
        let out = pitch_to_frequency_extended(PitchFxP::ZERO).to_bits();
        assert!(out.abs_diff(center) <= 1);
    }

    #[test]
    fn accurate_to_a_cent() {
        let ctx = Context::default();
        // every semitone and quarter tone of the MIDI range
        for quarter in (-64 * 4)..(64 * 4) {
            let semitones = quarter as f32 / 4.0;
            let expected = 440.0 * f32::powf(2.0, (semitones - 5.0) / 12.0);
            let pitch = PitchFxP::from_bits(quarter << (PITCHT_SHIFT - 2));
            let hz = ctx.frequency_to_hz(pitch_to_frequency(pitch));
            assert!(calculate_cents(expected, hz).abs() < 1.0, "{semitones}: {hz}");
        }
    }

    #[test]
    fn monotonic_over_standard_range() {
        let max = (1i32 << (PITCH_BITS - 1)) - 1;
        let mut last = pitch_to_frequency(PitchFxP::from_bits(-max - 1));
        let mut p = -max - 1;
        while p < max {
            p = p.saturating_add(1 << 12).min(max);
            let freq = pitch_to_frequency(PitchFxP::from_bits(p));
            assert!(freq >= last, "{p}");
            last = freq;
        }
    }

    #[test]
    fn saturates_at_extremes() {
        let table = initialize_tables().pitch(SampleRate::Khz48_0);
        let hi = pitch_to_frequency(PitchFxP::MAX);
        let lo = pitch_to_frequency(PitchFxP::MIN);
        assert_eq!(hi, pitch_to_frequency(PitchFxP::from_bits((1 << 27) - 1)));
        assert_eq!(lo, pitch_to_frequency(pitch_bits(-64)));
        assert!(hi.to_bits() <= table[PITCH_TABLE_CENTER + 64]);
        assert!(hi.to_bits() > table[PITCH_TABLE_CENTER + 63]);
        assert!(lo.to_bits().abs_diff(table[PITCH_TABLE_CENTER - 64]) <= 1);
        // +64 semitones is one past the top of the range
        assert!(pitch_to_frequency(pitch_bits(64)) == hi);

        let hi = pitch_to_frequency_extended(PitchFxP::MAX);
        let lo = pitch_to_frequency_extended(PitchFxP::MIN);
        assert!(hi <= FrequencyFxP::from_bits(1 << 31));
        assert!(hi >= pitch_to_frequency(PitchFxP::MAX));
        assert!(lo.to_bits().abs_diff(table[0]) <= 1);
        assert!(lo < pitch_to_frequency(PitchFxP::MIN));
    }

    #[test]
    fn extended_matches_standard_in_range() {
        for semitones in -64..64 {
            for frac in [0, 1, 1 << 10, 1 << 20, (1 << 21) - 1] {
                let pitch = PitchFxP::from_bits((semitones << PITCHT_SHIFT) + frac);
                assert_eq!(pitch_to_frequency(pitch), pitch_to_frequency_extended(pitch));
            }
        }
    }

    #[test]
    fn extended_clips_at_nyquist() {
        let nyquist = FrequencyFxP::from_bits(1 << 31);
        let freq = pitch_to_frequency_extended(pitch_bits(120));
        assert!(freq <= nyquist);
        assert!(nyquist - freq < FrequencyFxP::from_bits(4));
    }
}
