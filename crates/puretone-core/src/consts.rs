use embedded_graphics::pixelcolor::Rgb565;

pub type ColorType = Rgb565;

// Page geometry, in pixels.
pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 160;

pub const MIN_FREQUENCY_HZ: u32 = 250;
pub const MAX_FREQUENCY_HZ: u32 = 8000;
pub const DEFAULT_FREQUENCY_HZ: u32 = 1000;

/// Bounds of the volume control.
pub const MIN_VOLUME_DB: f32 = -10.0;
pub const MAX_VOLUME_DB: f32 = 100.0;
/// Starts at the minimum, which is silent.
pub const DEFAULT_VOLUME_DB: f32 = MIN_VOLUME_DB;

/// Range the gain curve is normalized over. Wider than the control on purpose:
/// the loudest slider position stays below unity gain.
pub const GAIN_CURVE_MIN_DB: f32 = -10.0;
pub const GAIN_CURVE_MAX_DB: f32 = 120.0;

pub const FREQUENCY_FINE_STEP_HZ: u32 = 10;
pub const FREQUENCY_COARSE_STEP_HZ: u32 = 100;
pub const VOLUME_FINE_STEP_DB: f32 = 0.5;
pub const VOLUME_COARSE_STEP_DB: f32 = 5.0;

/// Frames a direction button must be held before it starts repeating.
pub const REPEAT_DELAY_FRAMES: u32 = 10;
