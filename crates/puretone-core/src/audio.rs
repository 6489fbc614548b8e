//! Platform-agnostic audio output.
//!
//! A platform provides an [`AudioOutput`] that can build a [`ToneVoice`]: one
//! oscillator feeding one gain stage, connected to the output. The playback
//! coordinator only ever talks to these two traits.

use alloc::string::String;

use thiserror::Error;

use crate::settings::Frequency;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("audio output not supported: {0}")]
    Unsupported(String),

    #[error("no audio output device available")]
    NoDevice,

    #[error("failed to build tone: {0}")]
    Build(String),

    #[error("audio output closed")]
    Closed,
}

/// The output side of the audio graph (the destination plus the means to
/// construct nodes in front of it).
pub trait AudioOutput {
    type Voice: ToneVoice;

    /// Brings the output into a running state. Outputs may start suspended and
    /// only acquire the device on the first call.
    fn resume(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    /// Builds an oscillator → gain chain, applies the given values, connects it
    /// to the output and starts it.
    fn create_voice(&mut self, frequency: Frequency, gain: f32)
    -> Result<Self::Voice, AudioError>;
}

/// A sounding oscillator + gain pair.
pub trait ToneVoice {
    fn set_frequency(&mut self, frequency: Frequency) -> Result<(), AudioError>;

    fn set_gain(&mut self, gain: f32) -> Result<(), AudioError>;

    /// Stops the oscillator and disconnects the pair. Consumes the voice, so
    /// the platform stop runs at most once.
    fn stop(self) -> Result<(), AudioError>;

    /// True once the oscillator finished on its own.
    fn has_ended(&self) -> bool;
}
