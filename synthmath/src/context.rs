//! This module provides objects to reason about the processing context.
//! Currently, the only information wrapped is the audio sample rate, which
//! selects the pitch table used for pitch to frequency conversion.

use crate::{FrequencyFxP, PitchFxP};

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
/// An enum representing all of the supported sample rates.  The pitch tables
/// are precomputed for each of these, so arbitrary rates are not supported.
pub enum SampleRate {
    /// 44.1kHz sample rate
    Khz44_1,
    /// 48kHz sample rate, the reference rate of the engine
    #[default]
    Khz48_0,
}

impl SampleRate {
    /// Converts this sample rate to a u16
    pub const fn value(&self) -> u16 {
        match self {
            Self::Khz44_1 => 44100u16,
            Self::Khz48_0 => 48000u16,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = &'static str;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            44100 => Ok(Self::Khz44_1),
            48000 => Ok(Self::Khz48_0),
            _ => Err("Unsupported Sample Rate"),
        }
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
/// A fixed-point processing context.  The free functions in this crate
/// ([crate::pitch_to_frequency] and friends) use the default context, which
/// runs at 48kHz.
pub struct Context {
    /// The sample rate, as one of the supported [SampleRate]s
    pub sample_rate: SampleRate,
}

impl Context {
    /// Create a new context with a sample rate of 44.1kHz
    pub const fn new_441() -> Self {
        Self {
            sample_rate: SampleRate::Khz44_1,
        }
    }
    /// Create a new context with a sample rate of 48kHz
    pub const fn new_480() -> Self {
        Self {
            sample_rate: SampleRate::Khz48_0,
        }
    }
    /// Create a processing context if the sample rate provided is a supported
    /// sample rate, or return `None` otherwise.
    pub fn maybe_create(value: u32) -> Option<Self> {
        match SampleRate::try_from(value) {
            Ok(sample_rate) => Some(Self { sample_rate }),
            Err(e) => {
                log::warn!("{e}: {value}Hz");
                None
            }
        }
    }
    /// The sample rate, in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.value() as u32
    }
    /// Convert a pitch to a frequency at this context's sample rate.  See
    /// [crate::pitch_to_frequency]
    pub fn pitch_to_frequency(&self, pitch: PitchFxP) -> FrequencyFxP {
        crate::pitch::mtof(self.sample_rate, pitch, crate::PITCH_BITS)
    }
    /// Convert a pitch to a frequency at this context's sample rate, over the
    /// extended pitch range.  See [crate::pitch_to_frequency_extended]
    pub fn pitch_to_frequency_extended(&self, pitch: PitchFxP) -> FrequencyFxP {
        crate::pitch::mtof(self.sample_rate, pitch, crate::PITCH_BITS_EXTENDED)
    }
    /// Convert a frequency in cycles per sample back to Hertz.  This uses
    /// floating point and is intended for display and testing, not the audio
    /// path.
    pub fn frequency_to_hz(&self, freq: FrequencyFxP) -> f32 {
        freq.to_num::<f32>() * self.sample_rate() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_rates() {
        assert_eq!(SampleRate::try_from(48000), Ok(SampleRate::Khz48_0));
        assert_eq!(SampleRate::try_from(44100), Ok(SampleRate::Khz44_1));
        assert!(SampleRate::try_from(96000).is_err());
        assert_eq!(Context::maybe_create(44100), Some(Context::new_441()));
        assert_eq!(Context::maybe_create(22050), None);
        assert_eq!(Context::default(), Context::new_480());
        assert_eq!(Context::new_441().sample_rate(), 44100);
    }

    #[test]
    fn a440_at_both_rates() {
        let a4 = PitchFxP::from_num(5);
        for ctx in [Context::new_441(), Context::new_480()] {
            let hz = ctx.frequency_to_hz(ctx.pitch_to_frequency(a4));
            assert!((hz - 440.0).abs() < 0.01);
        }
    }
}
