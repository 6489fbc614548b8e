use embedded_graphics::prelude::{DrawTarget, Point, Size};
use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle};
use embedded_graphics::Drawable;
use embedded_graphics::text::Alignment;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use puretone_core::audio::AudioOutput;
use puretone_core::consts::{self, ColorType};
use puretone_core::engine::Engine;
use puretone_core::gfx;
use puretone_core::input::{Button, ButtonState, Input};
use puretone_core::log_buffer::LogLevel;

use crate::log_capture;

const FOOTER_LINES: usize = 4;
const FOOTER_LINE_HEIGHT: u32 = 7;
const FOOTER_HEIGHT: u32 = FOOTER_LINES as u32 * FOOTER_LINE_HEIGHT + 4;

fn map_key(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::W => Some(Button::Up),
        Keycode::A => Some(Button::Left),
        Keycode::S => Some(Button::Down),
        Keycode::D => Some(Button::Right),
        Keycode::J => Some(Button::A),
        Keycode::K => Some(Button::B),
        _ => None,
    }
}

/// Key events of one frame. A release of a key pressed in the same frame is
/// held back until the engine has seen the press.
#[derive(Default)]
struct KeyBatch {
    deferred: Vec<Button>,
}

impl KeyBatch {
    fn key_down(&mut self, input: &mut Input, button: Button) {
        self.deferred.retain(|b| *b != button);
        input.set_button(button, ButtonState::JustPressed);
    }

    fn key_up(&mut self, input: &mut Input, button: Button) {
        if input.is_just_pressed(button) {
            self.deferred.push(button);
        } else {
            input.set_button(button, ButtonState::JustReleased);
        }
    }

    /// Applies held-back releases; call after the engine update.
    fn flush(&mut self, input: &mut Input) {
        for button in self.deferred.drain(..) {
            input.set_button(button, ButtonState::JustReleased);
        }
    }
}

/// Runs the page in a simulated display window until it is closed.
///
/// W/S move between controls, A/D adjust the focused slider (hold K for
/// coarse steps) and J plays or stops.
pub fn run<A: AudioOutput>(mut engine: Engine<A>, scale: u32) -> anyhow::Result<()> {
    let mut display = SimulatorDisplay::<ColorType>::new(Size::new(
        consts::WIDTH,
        consts::HEIGHT + FOOTER_HEIGHT,
    ));
    let settings = OutputSettingsBuilder::new()
        .scale(scale.max(1))
        .pixel_spacing(0)
        .build();

    let mut window = Window::new("Pure Tone Generator", &settings);
    window.set_max_fps(30);
    engine.render(&mut display)?;
    draw_log_footer(&mut display)?;
    window.update(&display);

    let mut keys = KeyBatch::default();
    'running: loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat: false, .. } => {
                    if let Some(button) = map_key(keycode) {
                        keys.key_down(engine.input_mut(), button);
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(button) = map_key(keycode) {
                        keys.key_up(engine.input_mut(), button);
                    }
                }
                _ => (),
            }
        }

        engine.update();
        keys.flush(engine.input_mut());
        engine.input_mut().end_frame(true);

        engine.render(&mut display)?;
        draw_log_footer(&mut display)?;
        window.update(&display);
    }

    engine.player_mut().stop();
    log::info!("window closed");
    Ok(())
}

/// Recent warnings and errors under the page.
fn draw_log_footer<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorType>,
{
    let top = consts::HEIGHT as i32;
    Line::new(Point::new(0, top), Point::new(consts::WIDTH as i32 - 1, top))
        .into_styled(PrimitiveStyle::with_stroke(gfx::TRACK, 1))
        .draw(target)?;

    for (row, entry) in log_capture::recent_log_entries(FOOTER_LINES).iter().enumerate() {
        let color = match entry.level {
            LogLevel::Error => gfx::ERROR,
            _ => gfx::FOREGROUND,
        };
        let text = format!("{} {}", entry.level.prefix(), entry.message);
        let y = top + 3 + (row as u32 * FOOTER_LINE_HEIGHT) as i32;
        gfx::draw_text(target, &text, Point::new(2, y), Alignment::Left, color, true)?;
    }
    Ok(())
}
