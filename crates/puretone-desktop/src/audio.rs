use std::f32::consts::TAU;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use puretone_core::audio::{AudioError, AudioOutput, ToneVoice};
use puretone_core::settings::Frequency;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, StreamError};

// Sine oscillator; frequency is shared with the voice so it can be retuned while playing
struct SineWave {
    frequency: Arc<AtomicU32>,
    sample_rate: u32,
    phase: f32,
    num_samples: usize,
    current_sample: usize,
}

impl SineWave {
    fn new(frequency: Arc<AtomicU32>, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate,
            phase: 0.0,
            num_samples: 0,
            current_sample: 0,
        }
    }

    fn with_duration(mut self, duration: Duration) -> Self {
        // at least one sample, zero means endless
        self.num_samples = ((duration.as_secs_f32() * self.sample_rate as f32) as usize).max(1);
        self
    }
}

impl Iterator for SineWave {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_samples > 0 && self.current_sample >= self.num_samples {
            return None;
        }

        let sample = (self.phase * TAU).sin();

        // Phase accumulates, so a frequency change never jumps the waveform
        let frequency = self.frequency.load(Ordering::Relaxed) as f32;
        self.phase += frequency / self.sample_rate as f32;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        self.current_sample += 1;
        Some(sample)
    }
}

impl Source for SineWave {
    fn current_frame_len(&self) -> Option<usize> {
        if self.num_samples > 0 {
            Some(self.num_samples - self.current_sample)
        } else {
            None
        }
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        if self.num_samples > 0 {
            Some(Duration::from_secs_f32(
                self.num_samples as f32 / self.sample_rate as f32,
            ))
        } else {
            None
        }
    }
}

/// Default output device through rodio. The device is opened on the first
/// `resume`, so a machine without audio still gets a working page.
pub struct DesktopOutput {
    sample_rate: u32,
    tone_duration: Option<Duration>,
    stream: Option<(OutputStream, OutputStreamHandle)>,
}

impl DesktopOutput {
    pub fn new(sample_rate: u32, tone_duration: Option<Duration>) -> Self {
        Self {
            sample_rate,
            tone_duration,
            stream: None,
        }
    }
}

impl AudioOutput for DesktopOutput {
    type Voice = DesktopVoice;

    fn resume(&mut self) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = OutputStream::try_default().map_err(|e| match e {
            StreamError::NoDevice => AudioError::NoDevice,
            other => AudioError::Unsupported(other.to_string()),
        })?;
        log::info!("audio output opened at {} Hz", self.sample_rate);
        self.stream = Some(stream);
        Ok(())
    }

    fn create_voice(&mut self, frequency: Frequency, gain: f32) -> Result<DesktopVoice, AudioError> {
        let Some((_, handle)) = &self.stream else {
            return Err(AudioError::Closed);
        };

        // The sink's volume is the gain stage in front of the output
        let sink = Sink::try_new(handle).map_err(|e| AudioError::Build(e.to_string()))?;
        sink.set_volume(gain);

        let shared_frequency = Arc::new(AtomicU32::new(frequency.hz()));
        let oscillator = SineWave::new(Arc::clone(&shared_frequency), self.sample_rate);
        match self.tone_duration {
            Some(duration) => sink.append(oscillator.with_duration(duration)),
            None => sink.append(oscillator),
        }
        sink.play();

        log::debug!("voice built: {} at gain {gain:.4}", frequency);
        Ok(DesktopVoice {
            sink,
            frequency: shared_frequency,
        })
    }
}

pub struct DesktopVoice {
    sink: Sink,
    frequency: Arc<AtomicU32>,
}

impl ToneVoice for DesktopVoice {
    fn set_frequency(&mut self, frequency: Frequency) -> Result<(), AudioError> {
        self.frequency.store(frequency.hz(), Ordering::Relaxed);
        Ok(())
    }

    fn set_gain(&mut self, gain: f32) -> Result<(), AudioError> {
        self.sink.set_volume(gain);
        Ok(())
    }

    fn stop(self) -> Result<(), AudioError> {
        self.sink.stop();
        Ok(())
    }

    fn has_ended(&self) -> bool {
        self.sink.empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(hz: u32, sample_rate: u32) -> (SineWave, Arc<AtomicU32>) {
        let frequency = Arc::new(AtomicU32::new(hz));
        (SineWave::new(Arc::clone(&frequency), sample_rate), frequency)
    }

    #[test]
    fn test_sine_starts_at_zero_and_stays_in_range() {
        let (wave, _) = sine(1000, 48000);
        let samples: Vec<f32> = wave.take(4800).collect();
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(samples.iter().any(|s| *s > 0.99));
    }

    #[test]
    fn test_quarter_period_peaks() {
        // 1 kHz at 4 kHz sample rate: 0, 1, 0, -1, ...
        let (wave, _) = sine(1000, 4000);
        let samples: Vec<f32> = wave.take(4).collect();
        assert!((samples[1] - 1.0).abs() < 1e-5);
        assert!((samples[3] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_retune_takes_effect_on_next_sample() {
        let (mut wave, frequency) = sine(1000, 4000);
        wave.next();
        frequency.store(2000, Ordering::Relaxed);
        wave.next();
        // phase advanced a quarter, then a half: three quarters of a cycle
        let sample = wave.next().unwrap();
        assert!((sample + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_duration_limits_samples() {
        let (wave, _) = sine(440, 48000);
        let wave = wave.with_duration(Duration::from_millis(500));
        assert_eq!(wave.total_duration(), Some(Duration::from_millis(500)));
        assert_eq!(wave.current_frame_len(), Some(24000));
        assert_eq!(wave.count(), 24000);
    }

    #[test]
    fn test_endless_without_duration() {
        let (wave, _) = sine(440, 48000);
        assert_eq!(wave.total_duration(), None);
        assert_eq!(wave.channels(), 1);
        assert_eq!(wave.sample_rate(), 48000);
    }

    #[test]
    fn test_voice_needs_resumed_output() {
        let mut output = DesktopOutput::new(48000, None);
        assert_eq!(
            output.create_voice(Frequency::default(), 0.5).err(),
            Some(AudioError::Closed)
        );
    }
}
