use embedded_graphics::{Drawable as _, prelude::DrawTarget};

use crate::{
    consts,
    controls::{Control, ControlEvent, Label, label, slider_motion},
    gfx::SliderView,
    input::Input,
    layout::ElementId,
    settings::Volume,
};

pub struct VolumeSlider {
    value: Volume,
    fine_step: f32,
    coarse_step: f32,
}

impl VolumeSlider {
    pub fn new(initial: Volume) -> Self {
        Self {
            value: initial,
            fine_step: consts::VOLUME_FINE_STEP_DB,
            coarse_step: consts::VOLUME_COARSE_STEP_DB,
        }
    }

    /// Steps below a tenth of a dB are raised to it, the control's resolution.
    pub fn with_steps(mut self, fine_step: f32, coarse_step: f32) -> Self {
        self.fine_step = fine_step.max(0.1);
        self.coarse_step = coarse_step.max(self.fine_step);
        self
    }

    pub fn value(&self) -> Volume {
        self.value
    }

    pub fn set_value(&mut self, value: Volume) {
        self.value = value;
    }

    pub fn adjust(&mut self, steps: i32, coarse: bool) -> Option<ControlEvent> {
        let step = if coarse { self.coarse_step } else { self.fine_step };
        let next = self.value.offset(steps as f32 * step);
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(ControlEvent::VolumeChanged(next))
    }
}

impl Control for VolumeSlider {
    fn element_id(&self) -> ElementId {
        ElementId::VolumeSliderContainer
    }

    fn label(&self) -> Label {
        label(format_args!("Volume: {:.1} dB", self.value.db()))
    }

    fn range_labels(&self) -> Option<(Label, Label)> {
        Some((
            label(format_args!("{} dB", Volume::MIN.db())),
            label(format_args!("{} dB", Volume::MAX.db())),
        ))
    }

    fn ratio(&self) -> Option<f32> {
        let span = Volume::MAX.db() - Volume::MIN.db();
        Some((self.value.db() - Volume::MIN.db()) / span)
    }

    fn handle_input(&mut self, input: &Input) -> Option<ControlEvent> {
        let (steps, coarse) = slider_motion(input)?;
        self.adjust(steps, coarse)
    }

    fn draw<D>(&self, target: &mut D, focused: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        let text = self.label();
        let (min_label, max_label) = self.range_labels().unwrap_or_default();
        SliderView {
            area: self.element_id().area(),
            label: &text,
            min_label: &min_label,
            max_label: &max_label,
            ratio: self.ratio().unwrap_or_default(),
            focused,
        }
        .draw(target)
    }
}
