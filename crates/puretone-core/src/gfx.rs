use embedded_graphics::{
    Drawable,
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_4X6, FONT_6X10},
    },
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point, Primitive, RgbColor, Size},
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::consts::ColorType;

pub const BACKGROUND: ColorType = Rgb565::WHITE;
pub const FOREGROUND: ColorType = Rgb565::BLACK;
pub const ACCENT: ColorType = Rgb565::BLUE;
pub const TRACK: ColorType = Rgb565::new(24, 48, 24);
pub const PLAYING: ColorType = Rgb565::new(4, 44, 8);
pub const ERROR: ColorType = Rgb565::RED;

const TRACK_HEIGHT: u32 = 8;

/// Draws `text` with its top edge at `position`.
pub fn draw_text<D>(
    target: &mut D,
    text: &str,
    position: Point,
    alignment: Alignment,
    color: ColorType,
    small: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorType>,
{
    let font = if small { &FONT_4X6 } else { &FONT_6X10 };
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();

    Text::with_text_style(text, position, MonoTextStyle::new(font, color), text_style)
        .draw(target)?;
    Ok(())
}

/// A labelled horizontal slider: value label on top, track in the middle,
/// range labels underneath.
pub struct SliderView<'a> {
    pub area: Rectangle,
    pub label: &'a str,
    pub min_label: &'a str,
    pub max_label: &'a str,
    pub ratio: f32,
    pub focused: bool,
}

impl Drawable for SliderView<'_> {
    type Color = ColorType;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let Rectangle { top_left, size } = self.area;
        let label_color = if self.focused { ACCENT } else { FOREGROUND };
        draw_text(target, self.label, top_left, Alignment::Left, label_color, false)?;

        let track_top = top_left + Point::new(0, 12);
        let track = Rectangle::new(track_top, Size::new(size.width, TRACK_HEIGHT));
        let border = if self.focused { ACCENT } else { FOREGROUND };
        track
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .fill_color(TRACK)
                    .stroke_color(border)
                    .stroke_width(1)
                    .build(),
            )
            .draw(target)?;

        let ratio = self.ratio.clamp(0.0, 1.0);
        let filled = ((size.width.saturating_sub(2)) as f32 * ratio) as u32;
        if filled > 0 {
            Rectangle::new(
                track_top + Point::new(1, 1),
                Size::new(filled, TRACK_HEIGHT - 2),
            )
            .into_styled(PrimitiveStyle::with_fill(ACCENT))
            .draw(target)?;
        }

        let labels_top = track_top + Point::new(0, TRACK_HEIGHT as i32 + 3);
        draw_text(target, self.min_label, labels_top, Alignment::Left, FOREGROUND, true)?;
        draw_text(
            target,
            self.max_label,
            labels_top + Point::new(size.width as i32 - 1, 0),
            Alignment::Right,
            FOREGROUND,
            true,
        )?;

        Ok(())
    }
}

pub struct ButtonView<'a> {
    pub area: Rectangle,
    pub text: &'a str,
    pub active: bool,
    pub focused: bool,
}

impl Drawable for ButtonView<'_> {
    type Color = ColorType;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let fill = if self.active { PLAYING } else { ACCENT };
        let stroke_width = if self.focused { 2 } else { 0 };
        self.area
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .fill_color(fill)
                    .stroke_color(FOREGROUND)
                    .stroke_width(stroke_width)
                    .build(),
            )
            .draw(target)?;

        let center = self.area.center();
        draw_text(
            target,
            self.text,
            Point::new(center.x, center.y - 5),
            Alignment::Center,
            Rgb565::WHITE,
            false,
        )
    }
}
