//! Playback coordinator. Owns the audio output and the single live voice,
//! and keeps the status line in step with what is sounding.

use core::mem;

use crate::audio::{AudioError, AudioOutput, ToneVoice};
use crate::settings::{Frequency, ToneSettings, Volume};
use crate::status::Status;

pub enum PlaybackState<V> {
    Idle,
    Playing(V),
}

impl<V> PlaybackState<V> {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }
}

pub struct TonePlayer<A: AudioOutput> {
    output: A,
    settings: ToneSettings,
    state: PlaybackState<A::Voice>,
    status: Status,
}

impl<A: AudioOutput> TonePlayer<A> {
    pub fn new(output: A, settings: ToneSettings) -> Self {
        Self {
            output,
            settings,
            state: PlaybackState::Idle,
            status: Status::info(format_args!(
                "Ready. Adjust frequency and volume, then press Play Audio."
            )),
        }
    }

    pub fn settings(&self) -> ToneSettings {
        self.settings
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn output(&self) -> &A {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut A {
        &mut self.output
    }

    /// Starts the tone. Does nothing if a tone is already sounding.
    pub fn start(&mut self) {
        if self.is_playing() {
            return;
        }

        match self.build_voice() {
            Ok(voice) => {
                self.state = PlaybackState::Playing(voice);
                log::info!(
                    "playback started at {} / {}",
                    self.settings.frequency,
                    self.settings.volume
                );
                self.status = Status::info(format_args!(
                    "Playing: {} Hz at {:.1} dB",
                    self.settings.frequency.hz(),
                    self.settings.volume.db()
                ));
            }
            Err(e) => {
                log::error!("error starting playback: {e}");
                self.status = Status::error(format_args!("Error starting playback: {e}"));
            }
        }
    }

    fn build_voice(&mut self) -> Result<A::Voice, AudioError> {
        self.output.resume()?;
        self.output
            .create_voice(self.settings.frequency, self.settings.volume.gain())
    }

    /// Stops the tone. Does nothing while idle.
    pub fn stop(&mut self) {
        let PlaybackState::Playing(voice) = mem::replace(&mut self.state, PlaybackState::Idle)
        else {
            return;
        };

        // The voice is gone either way; a failed stop only leaves a trace in the log.
        if let Err(e) = voice.stop() {
            log::error!("error stopping playback: {e}");
        }
        log::info!("playback stopped");
        self.status = Status::info(format_args!("Playback stopped."));
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Stores the new frequency and retunes the live voice, if any.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.settings.frequency = frequency;
        if let PlaybackState::Playing(voice) = &mut self.state
            && let Err(e) = voice.set_frequency(frequency)
        {
            log::error!("error updating frequency: {e}");
        }
        self.report_settings();
    }

    /// Stores the new volume and pushes its gain into the live voice, if any.
    pub fn set_volume(&mut self, volume: Volume) {
        self.settings.volume = volume;
        if let PlaybackState::Playing(voice) = &mut self.state
            && let Err(e) = voice.set_gain(volume.gain())
        {
            log::error!("error updating volume: {e}");
        }
        self.report_settings();
    }

    /// Returns to idle when the voice finished on its own. Returns true on that
    /// transition.
    pub fn poll(&mut self) -> bool {
        let ended = match &self.state {
            PlaybackState::Playing(voice) => voice.has_ended(),
            PlaybackState::Idle => false,
        };
        if ended {
            // already silent, nothing left to stop
            self.state = PlaybackState::Idle;
            log::info!("playback ended");
            self.status = Status::info(format_args!("Playback stopped."));
        }
        ended
    }

    fn report_settings(&mut self) {
        log::debug!("settings now {} / {}", self.settings.frequency, self.settings.volume);
        self.status = Status::info(format_args!(
            "Frequency: {} Hz, Volume: {:.1} dB",
            self.settings.frequency.hz(),
            self.settings.volume.db()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusKind;
    use crate::testing::{GraphCall, MockOutput};

    fn player() -> TonePlayer<MockOutput> {
        TonePlayer::new(MockOutput::default(), ToneSettings::default())
    }

    #[test]
    fn test_starts_idle_with_ready_status() {
        let player = player();
        assert!(!player.is_playing());
        assert!(player.status().message().starts_with("Ready."));
        assert!(player.output().calls().is_empty());
    }

    #[test]
    fn test_start_builds_voice_with_current_settings() {
        let mut player = player();
        player.set_frequency(Frequency::new(440));
        player.set_volume(Volume::new(55.0));
        player.start();

        assert!(player.is_playing());
        assert_eq!(
            player.output().calls(),
            &[
                GraphCall::Resume,
                GraphCall::CreateVoice {
                    frequency_hz: 440,
                    gain: 0.125
                },
            ]
        );
        assert_eq!(player.status().message(), "Playing: 440 Hz at 55.0 dB");
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut player = player();
        player.start();
        let calls = player.output().calls().len();
        player.start();
        assert!(player.is_playing());
        assert_eq!(player.output().calls().len(), calls);
        assert_eq!(player.output().voices_created(), 1);
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut player = player();
        let status = player.status().clone();
        player.stop();
        assert!(!player.is_playing());
        assert!(player.output().calls().is_empty());
        assert_eq!(player.status(), &status);
    }

    #[test]
    fn test_stop_tears_down_voice_once() {
        let mut player = player();
        player.start();
        player.stop();
        player.stop();

        assert!(!player.is_playing());
        let stops = player
            .output()
            .calls()
            .iter()
            .filter(|c| **c == GraphCall::Stop)
            .count();
        assert_eq!(stops, 1);
        assert_eq!(player.status().message(), "Playback stopped.");
    }

    #[test]
    fn test_changes_while_idle_do_not_touch_graph() {
        let mut player = player();
        player.set_frequency(Frequency::new(2000));
        player.set_volume(Volume::new(30.0));

        assert!(player.output().calls().is_empty());
        assert_eq!(player.settings().frequency.hz(), 2000);
        assert_eq!(player.settings().volume.db(), 30.0);
        assert_eq!(
            player.status().message(),
            "Frequency: 2000 Hz, Volume: 30.0 dB"
        );
    }

    #[test]
    fn test_changes_while_playing_update_graph_immediately() {
        let mut player = player();
        player.start();
        player.set_frequency(Frequency::new(3000));
        player.set_volume(Volume::new(120.0));

        let calls = player.output().calls();
        assert_eq!(calls[calls.len() - 2], GraphCall::SetFrequency(3000));
        assert_eq!(
            calls[calls.len() - 1],
            GraphCall::SetGain(Volume::MAX.gain())
        );
    }

    #[test]
    fn test_start_failure_reports_error_and_stays_idle() {
        let mut player = TonePlayer::new(MockOutput::failing_resume(), ToneSettings::default());
        player.start();

        assert!(!player.is_playing());
        assert_eq!(player.status().kind(), StatusKind::Error);
        assert_eq!(
            player.status().message(),
            "Error starting playback: no audio output device available"
        );

        // a later attempt can still succeed once the device shows up
        player.output_mut().set_fail_resume(false);
        player.start();
        assert!(player.is_playing());
    }

    #[test]
    fn test_voice_build_failure_reports_error() {
        let mut output = MockOutput::default();
        output.set_fail_create(true);
        let mut player = TonePlayer::new(output, ToneSettings::default());
        player.start();

        assert!(!player.is_playing());
        assert!(player.status().is_error());
        assert!(player.status().message().contains("failed to build tone"));
    }

    #[test]
    fn test_live_update_error_keeps_playing() {
        let mut player = player();
        player.start();
        player.output().fail_live_updates();
        player.set_frequency(Frequency::new(500));

        assert!(player.is_playing());
        assert_eq!(player.settings().frequency.hz(), 500);
        assert!(!player.status().is_error());
    }

    #[test]
    fn test_natural_end_returns_to_idle() {
        let mut player = player();
        player.start();
        assert!(!player.poll());

        player.output().end_playback();
        assert!(player.poll());
        assert!(!player.is_playing());
        assert_eq!(player.status().message(), "Playback stopped.");

        // ended voices are not stopped again
        assert!(!player.output().calls().contains(&GraphCall::Stop));
        assert!(!player.poll());
    }

    #[test]
    fn test_toggle() {
        let mut player = player();
        player.toggle();
        assert!(player.is_playing());
        player.toggle();
        assert!(!player.is_playing());
        assert_eq!(player.output().voices_created(), 1);
    }
}
