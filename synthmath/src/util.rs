//! Various utility functions and helpful constants

// only used by the pitch accuracy tests
#[cfg(test)]
pub fn calculate_cents(base: f32, freq: f32) -> f32 {
    1200.0 * f32::log2(freq / base)
}

/// The full phase of a 32 bit phase accumulator, i.e. one cycle, as a `u64`
pub const PHASE_CYCLE: u64 = 1 << 32;

/// Convert a phase in turns (`[0, 1)` is one cycle) into a 32 bit phase
/// accumulator value.  Values outside of one cycle wrap.
pub fn phase_from_turns(turns: f32) -> u32 {
    let frac = turns - (turns as i64) as f32;
    let frac = if frac < 0.0 { frac + 1.0 } else { frac };
    (frac as f64 * PHASE_CYCLE as f64) as u64 as u32
}

/// Convert a MIDI note number to a pitch relative to E4, as consumed by
/// [crate::pitch_to_frequency]
pub fn midi_note_to_pitch(note: u8) -> crate::PitchFxP {
    crate::int_to_frac(note as i32 - 64)
}
