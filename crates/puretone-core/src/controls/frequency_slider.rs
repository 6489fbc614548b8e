use embedded_graphics::{Drawable as _, prelude::DrawTarget};

use crate::{
    consts,
    controls::{Control, ControlEvent, Label, label, slider_motion},
    gfx::SliderView,
    input::Input,
    layout::ElementId,
    settings::Frequency,
};

pub struct FrequencySlider {
    value: Frequency,
    fine_step: u32,
    coarse_step: u32,
}

impl FrequencySlider {
    pub fn new(initial: Frequency) -> Self {
        Self {
            value: initial,
            fine_step: consts::FREQUENCY_FINE_STEP_HZ,
            coarse_step: consts::FREQUENCY_COARSE_STEP_HZ,
        }
    }

    pub fn with_steps(mut self, fine_step: u32, coarse_step: u32) -> Self {
        self.fine_step = fine_step.max(1);
        self.coarse_step = coarse_step.max(self.fine_step);
        self
    }

    pub fn value(&self) -> Frequency {
        self.value
    }

    /// Replaces the value without reporting a change.
    pub fn set_value(&mut self, value: Frequency) {
        self.value = value;
    }

    /// Moves the value by `steps` fine (or coarse) steps. Reports a change only
    /// if the clamped value actually moved.
    pub fn adjust(&mut self, steps: i32, coarse: bool) -> Option<ControlEvent> {
        let step = if coarse { self.coarse_step } else { self.fine_step };
        let delta = steps.saturating_mul(step.min(i32::MAX as u32) as i32);
        let next = self.value.offset(delta);
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(ControlEvent::FrequencyChanged(next))
    }
}

impl Control for FrequencySlider {
    fn element_id(&self) -> ElementId {
        ElementId::FrequencySliderContainer
    }

    fn label(&self) -> Label {
        label(format_args!("Frequency: {} Hz", self.value.hz()))
    }

    fn range_labels(&self) -> Option<(Label, Label)> {
        Some((
            label(format_args!("{}", Frequency::MIN)),
            label(format_args!("{}", Frequency::MAX)),
        ))
    }

    fn ratio(&self) -> Option<f32> {
        let span = (Frequency::MAX.hz() - Frequency::MIN.hz()) as f32;
        Some((self.value.hz() - Frequency::MIN.hz()) as f32 / span)
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
