use embedded_graphics::{Drawable as _, prelude::DrawTarget};

use crate::{
    consts,
    controls::{Control, ControlEvent, Label, label},
    gfx::ButtonView,
    input::{Button, Input},
    layout::ElementId,
};

pub struct PlayButton {
    playing: bool,
}

impl Default for PlayButton {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayButton {
    pub fn new() -> Self {
        Self { playing: false }
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn text(&self) -> &'static str {
        if self.playing { "Playing..." } else { "Play Audio" }
    }
}

impl Control for PlayButton {
    fn element_id(&self) -> ElementId {
        ElementId::PlayButtonContainer
    }

    fn label(&self) -> Label {
        label(format_args!("{}", self.text()))
    }

    fn range_labels(&self) -> Option<(Label, Label)> {
        None
    }

    fn ratio(&self) -> Option<f32> {
        None
    }

    fn handle_input(&mut self, input: &Input) -> Option<ControlEvent> {
        input
            .is_just_pressed(Button::A)
            .then_some(ControlEvent::PlayPressed)
    }

    fn draw<D>(&self, target: &mut D, focused: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        ButtonView {
            area: self.element_id().area(),
            text: self.text(),
            active: self.playing,
            focused,
        }
        .draw(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonState;

    #[test]
    fn test_label_follows_playing_flag() {
        let mut button = PlayButton::new();
        assert_eq!(button.label().as_str(), "Play Audio");
        button.set_playing(true);
        assert_eq!(button.label().as_str(), "Playing...");
        assert!(button.is_playing());
        button.set_playing(false);
        assert_eq!(button.text(), "Play Audio");
    }

    #[test]
    fn test_press_only_on_activate() {
        let mut button = PlayButton::new();
        let mut input = Input::new();
        input.set_button(Button::Right, ButtonState::JustPressed);
        assert_eq!(button.handle_input(&input), None);

        input.set_button(Button::A, ButtonState::JustPressed);
        assert_eq!(button.handle_input(&input), Some(ControlEvent::PlayPressed));

        input.end_frame(true);
        assert_eq!(button.handle_input(&input), None);
    }
}
