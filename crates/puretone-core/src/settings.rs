//! Tone settings: the two scalar values the page controls.

use core::fmt;

use crate::consts::{
    DEFAULT_FREQUENCY_HZ, DEFAULT_VOLUME_DB, MAX_FREQUENCY_HZ, MAX_VOLUME_DB, MIN_FREQUENCY_HZ,
    MIN_VOLUME_DB,
};
use crate::gain::db_to_gain;

/// Tone frequency in Hz, always within `MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    pub const MIN: Frequency = Frequency(MIN_FREQUENCY_HZ);
    pub const MAX: Frequency = Frequency(MAX_FREQUENCY_HZ);

    /// Creates a frequency, clamping out-of-range values.
    pub fn new(hz: u32) -> Self {
        Self(hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ))
    }

    pub fn hz(self) -> u32 {
        self.0
    }

    /// Moves by `delta` Hz, saturating at the bounds.
    pub fn offset(self, delta: i32) -> Self {
        Self::new(self.0.saturating_add_signed(delta))
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self(DEFAULT_FREQUENCY_HZ)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

/// Tone loudness in dB, always within `MIN_VOLUME_DB..=MAX_VOLUME_DB`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f32);

impl Volume {
    pub const MIN: Volume = Volume(MIN_VOLUME_DB);
    pub const MAX: Volume = Volume(MAX_VOLUME_DB);

    /// Creates a volume, clamping out-of-range values. NaN maps to the minimum.
    pub fn new(db: f32) -> Self {
        if db.is_nan() {
            return Self::MIN;
        }
        Self(db.clamp(MIN_VOLUME_DB, MAX_VOLUME_DB))
    }

    pub fn db(self) -> f32 {
        self.0
    }

    /// Moves by `delta` dB and snaps to a tenth of a dB so repeated steps
    /// don't accumulate float drift.
    pub fn offset(self, delta: f32) -> Self {
        let stepped = self.0 + delta;
        let tenths = stepped * 10.0;
        // core has no f32::round; round half away from zero by hand
        let rounded = if tenths >= 0.0 {
            (tenths + 0.5) as i32
        } else {
            (tenths - 0.5) as i32
        };
        Self::new(rounded as f32 / 10.0)
    }

    /// Linear gain for this volume.
    pub fn gain(self) -> f32 {
        db_to_gain(self.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME_DB)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} dB", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToneSettings {
    pub frequency: Frequency,
    pub volume: Volume,
}

impl ToneSettings {
    pub fn new(frequency: Frequency, volume: Volume) -> Self {
        Self { frequency, volume }
    }
}
