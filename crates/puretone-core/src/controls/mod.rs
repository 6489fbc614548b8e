//! The page's widgets. Each one owns its value, reacts to input while it has
//! focus and reports changes as [`ControlEvent`]s.

use embedded_graphics::prelude::DrawTarget;
use enum_dispatch::enum_dispatch;

use crate::{
    consts,
    controls::{
        frequency_slider::FrequencySlider, play_button::PlayButton, volume_slider::VolumeSlider,
    },
    input::Input,
    layout::ElementId,
    settings::{Frequency, Volume},
};

pub mod frequency_slider;
pub mod play_button;
pub mod volume_slider;

pub const LABEL_MAX_LEN: usize = 32;

pub type Label = heapless::String<LABEL_MAX_LEN>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    FrequencyChanged(Frequency),
    VolumeChanged(Volume),
    PlayPressed,
}

#[enum_dispatch]
pub trait Control {
    fn element_id(&self) -> ElementId;

    /// Text shown with the control, including its live value.
    fn label(&self) -> Label;

    /// Bound labels for range controls.
    fn range_labels(&self) -> Option<(Label, Label)>;

    /// Position of the value within its range, for range controls.
    fn ratio(&self) -> Option<f32>;

    fn handle_input(&mut self, input: &Input) -> Option<ControlEvent>;

    fn draw<D>(&self, target: &mut D, focused: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>;
}

#[enum_dispatch(Control)]
pub enum ControlWrapper {
    FrequencySlider,
    VolumeSlider,
    PlayButton,
}

/// Direction of a slider move requested by the input, if any: `(steps, coarse)`.
pub(crate) fn slider_motion(input: &Input) -> Option<(i32, bool)> {
    use crate::input::Button;

    let steps = if input.is_repeating(Button::Right, consts::REPEAT_DELAY_FRAMES) {
        1
    } else if input.is_repeating(Button::Left, consts::REPEAT_DELAY_FRAMES) {
        -1
    } else {
        return None;
    };
    Some((steps, input.is_pressed(Button::B)))
}

pub(crate) fn label(args: core::fmt::Arguments<'_>) -> Label {
    use core::fmt::Write as _;

    let mut label = Label::new();
    let _ = label.write_fmt(args);
    label
}
