use embedded_graphics::{prelude::DrawTarget, text::Alignment};

use crate::{
    audio::AudioOutput,
    consts,
    controls::{
        Control as _, ControlEvent, ControlWrapper, frequency_slider::FrequencySlider,
        play_button::PlayButton, volume_slider::VolumeSlider,
    },
    gfx,
    input::{Button, Input},
    layout::{self, ElementId},
    player::TonePlayer,
    settings::ToneSettings,
    status::Status,
};

const FREQUENCY: usize = 0;
const VOLUME: usize = 1;
const PLAY: usize = 2;

/// Slider step sizes, fine and coarse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSizes {
    pub frequency_fine_hz: u32,
    pub frequency_coarse_hz: u32,
    pub volume_fine_db: f32,
    pub volume_coarse_db: f32,
}

impl Default for StepSizes {
    fn default() -> Self {
        Self {
            frequency_fine_hz: consts::FREQUENCY_FINE_STEP_HZ,
            frequency_coarse_hz: consts::FREQUENCY_COARSE_STEP_HZ,
            volume_fine_db: consts::VOLUME_FINE_STEP_DB,
            volume_coarse_db: consts::VOLUME_COARSE_STEP_DB,
        }
    }
}

/// The page: three controls wired to the playback coordinator.
pub struct Engine<A: AudioOutput> {
    controls: [ControlWrapper; 3],
    focus: usize,
    player: TonePlayer<A>,
    input: Input,
}

impl<A: AudioOutput> Engine<A> {
    pub fn new(output: A, settings: ToneSettings) -> Self {
        Self::with_steps(output, settings, StepSizes::default())
    }

    pub fn with_steps(output: A, settings: ToneSettings, steps: StepSizes) -> Self {
        let frequency = FrequencySlider::new(settings.frequency)
            .with_steps(steps.frequency_fine_hz, steps.frequency_coarse_hz);
        let volume = VolumeSlider::new(settings.volume)
            .with_steps(steps.volume_fine_db, steps.volume_coarse_db);

        log::info!("page ready: {} / {}", settings.frequency, settings.volume);

        Self {
            controls: [frequency.into(), volume.into(), PlayButton::new().into()],
            focus: FREQUENCY,
            player: TonePlayer::new(output, settings),
            input: Input::new(),
        }
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn player(&self) -> &TonePlayer<A> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut TonePlayer<A> {
        &mut self.player
    }

    pub fn status(&self) -> &Status {
        self.player.status()
    }

    pub fn controls(&self) -> &[ControlWrapper] {
        &self.controls
    }

    pub fn focused(&self) -> ElementId {
        self.controls[self.focus].element_id()
    }

    pub fn focus(&mut self, id: ElementId) {
        if let Some(index) = self.controls.iter().position(|c| c.element_id() == id) {
            self.focus = index;
        }
    }

    /// Consumes the current input state: moves focus, feeds the focused
    /// control, applies what it reports and picks up a tone that ended by
    /// itself.
    pub fn update(&mut self) {
        if self.input.is_just_pressed(Button::Up) {
            self.focus = self.focus.saturating_sub(1);
        }
        if self.input.is_just_pressed(Button::Down) {
            self.focus = (self.focus + 1).min(self.controls.len() - 1);
        }

        if let Some(event) = self.controls[self.focus].handle_input(&self.input) {
            self.apply(event);
        }
        // A toggles playback from any control, after the slider's own move
        if self.focus != PLAY && self.input.is_just_pressed(Button::A) {
            self.apply(ControlEvent::PlayPressed);
        }

        self.player.poll();
        self.sync_play_button();
    }

    /// Applies a control event as if it came from the widget itself.
    pub fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::FrequencyChanged(frequency) => {
                if let ControlWrapper::FrequencySlider(slider) = &mut self.controls[FREQUENCY] {
                    slider.set_value(frequency);
                }
                self.player.set_frequency(frequency);
            }
            ControlEvent::VolumeChanged(volume) => {
                if let ControlWrapper::VolumeSlider(slider) = &mut self.controls[VOLUME] {
                    slider.set_value(volume);
                }
                self.player.set_volume(volume);
            }
            ControlEvent::PlayPressed => self.player.toggle(),
        }
        self.sync_play_button();
    }

    fn sync_play_button(&mut self) {
        let playing = self.player.is_playing();
        if let ControlWrapper::PlayButton(button) = &mut self.controls[PLAY] {
            button.set_playing(playing);
        }
    }

    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        target.clear(gfx::BACKGROUND)?;

        let title = layout::title_area();
        gfx::draw_text(
            target,
            "Pure Tone Generator",
            title.top_left,
            Alignment::Left,
            gfx::FOREGROUND,
            false,
        )?;

        for (index, control) in self.controls.iter().enumerate() {
            control.draw(target, index == self.focus)?;
        }

        self.render_status(target)
    }

    fn render_status<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        let status = self.player.status();
        let color = if status.is_error() { gfx::ERROR } else { gfx::FOREGROUND };
        let area = ElementId::Status.area();

        // one line in the regular font if it fits, otherwise wrapped small
        let wide_chars = (area.size.width / 6) as usize;
        let message = status.message();
        if message.chars().count() <= wide_chars {
            return gfx::draw_text(target, message, area.top_left, Alignment::Left, color, false);
        }

        let small_chars = (area.size.width / 4) as usize;
        let max_lines = (area.size.height / 6) as usize;
        let mut rest = message;
        let mut position = area.top_left;
        for _ in 0..max_lines {
            if rest.is_empty() {
                break;
            }
            let split = rest
                .char_indices()
                .nth(small_chars)
                .map_or(rest.len(), |(i, _)| i);
            let (line, tail) = rest.split_at(split);
            gfx::draw_text(target, line, position, Alignment::Left, color, true)?;
            rest = tail;
            position.y += 7;
        }
        Ok(())
    }
}
