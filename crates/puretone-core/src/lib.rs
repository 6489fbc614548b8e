#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod audio;
pub mod consts;
pub mod controls;
pub mod engine;
pub mod gain;
pub mod gfx;
pub mod input;
pub mod layout;
pub mod log_buffer;
pub mod player;
pub mod settings;
pub mod status;

#[cfg(test)]
mod testing;

pub use audio::{AudioError, AudioOutput, ToneVoice};
pub use engine::{Engine, StepSizes};
pub use gain::db_to_gain;
pub use player::{PlaybackState, TonePlayer};
pub use settings::{Frequency, ToneSettings, Volume};
