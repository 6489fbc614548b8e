//! Loudness curve mapping the volume control onto a linear gain.

use crate::consts::{GAIN_CURVE_MAX_DB, GAIN_CURVE_MIN_DB};

/// Converts a volume in dB to a linear amplitude gain in `[0, 1]`.
///
/// The input is clamped to the curve range, normalized to `[0, 1]` and cubed,
/// which tracks perceived loudness better than a linear ramp. The minimum of
/// the range (and anything below it, NaN included) is exact silence.
pub fn db_to_gain(db: f32) -> f32 {
    if db.is_nan() {
        return 0.0;
    }

    let clamped = db.clamp(GAIN_CURVE_MIN_DB, GAIN_CURVE_MAX_DB);
    if clamped <= GAIN_CURVE_MIN_DB {
        return 0.0;
    }

    let normalized = (clamped - GAIN_CURVE_MIN_DB) / (GAIN_CURVE_MAX_DB - GAIN_CURVE_MIN_DB);
    normalized * normalized * normalized
}
