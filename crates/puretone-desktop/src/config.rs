use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use puretone_core::consts;
use puretone_core::engine::StepSizes;
use puretone_core::settings::{Frequency, ToneSettings, Volume};
use serde::Deserialize;
use thiserror::Error;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "puretone.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown log level {0:?}")]
    LogLevel(String),

    #[error("Sample rate {0} Hz is too low, it must be above {min} Hz", min = MIN_SAMPLE_RATE)]
    SampleRate(u32),
}

/// Rates at or below this can't carry the top of the frequency range.
pub const MIN_SAMPLE_RATE: u32 = 2 * consts::MAX_FREQUENCY_HZ;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    /// Simulated display window
    #[default]
    Window,
    /// Terminal control panel
    Tui,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    pub frequency_fine_hz: u32,
    pub frequency_coarse_hz: u32,
    pub volume_fine_db: f32,
    pub volume_coarse_db: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            frequency_fine_hz: consts::FREQUENCY_FINE_STEP_HZ,
            frequency_coarse_hz: consts::FREQUENCY_COARSE_STEP_HZ,
            volume_fine_db: consts::VOLUME_FINE_STEP_DB,
            volume_coarse_db: consts::VOLUME_COARSE_STEP_DB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub frequency_hz: u32,
    pub volume_db: f32,
    /// Each tone stops by itself after this long. Unset plays until stopped.
    pub tone_duration_ms: Option<u64>,
    pub sample_rate: u32,
    pub frontend: Frontend,
    pub log_level: String,
    pub window_scale: u32,
    pub steps: StepConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frequency_hz: consts::DEFAULT_FREQUENCY_HZ,
            volume_db: consts::DEFAULT_VOLUME_DB,
            tone_duration_ms: None,
            sample_rate: 48000,
            frontend: Frontend::default(),
            log_level: "info".to_string(),
            window_scale: 2,
            steps: StepConfig::default(),
        }
    }
}

impl Config {
    /// Reads `path`, or `puretone.toml` from the working directory if it
    /// exists, or falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("loading config from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The oscillator needs more than two samples per period of the highest
    /// frequency the slider allows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate <= MIN_SAMPLE_RATE {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Initial slider values; out-of-range numbers are clamped.
    pub fn tone_settings(&self) -> ToneSettings {
        ToneSettings::new(Frequency::new(self.frequency_hz), Volume::new(self.volume_db))
    }

    pub fn tone_duration(&self) -> Option<Duration> {
        self.tone_duration_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn step_sizes(&self) -> StepSizes {
        StepSizes {
            frequency_fine_hz: self.steps.frequency_fine_hz,
            frequency_coarse_hz: self.steps.frequency_coarse_hz,
            volume_fine_db: self.steps.volume_fine_db,
            volume_coarse_db: self.steps.volume_coarse_db,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tone_settings(), ToneSettings::default());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config.tone_duration(), None);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str(
            r#"
            frequency_hz = 4000
            volume_db = 35.5
            tone_duration_ms = 1500
            frontend = "tui"

            [steps]
            frequency_fine_hz = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.frontend, Frontend::Tui);
        assert_eq!(config.tone_settings().frequency.hz(), 4000);
        assert_eq!(config.tone_settings().volume.db(), 35.5);
        assert_eq!(config.tone_duration(), Some(Duration::from_millis(1500)));
        assert_eq!(config.step_sizes().frequency_fine_hz, 1);
        assert_eq!(
            config.step_sizes().frequency_coarse_hz,
            consts::FREQUENCY_COARSE_STEP_HZ
        );
    }

    #[test]
    fn test_out_of_range_settings_are_clamped() {
        let config = Config::from_toml_str("frequency_hz = 20\nvolume_db = 140.0").unwrap();
        let settings = config.tone_settings();
        assert_eq!(settings.frequency, Frequency::MIN);
        assert_eq!(settings.volume, Volume::MAX);
    }

    #[test]
    fn test_sample_rate_must_exceed_twice_top_frequency() {
        assert!(matches!(
            Config::from_toml_str("sample_rate = 0\ntone_duration_ms = 500"),
            Err(ConfigError::SampleRate(0))
        ));
        assert!(matches!(
            Config::from_toml_str("sample_rate = 16000"),
            Err(ConfigError::SampleRate(16000))
        ));
        assert_eq!(
            Config::from_toml_str("sample_rate = 16001").unwrap().sample_rate,
            16001
        );
        assert!(Config::from_toml_str("sample_rate = 44100").is_ok());
    }

    #[test]
    fn test_zero_duration_means_endless() {
        let config = Config::from_toml_str("tone_duration_ms = 0").unwrap();
        assert_eq!(config.tone_duration(), None);
    }

    #[test]
    fn test_bad_input_is_reported() {
        assert!(matches!(
            Config::from_toml_str("frequency_hz = \"loud\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml_str("frontend = \"web\""),
            Err(ConfigError::Parse(_))
        ));

        let config = Config::from_toml_str("log_level = \"chatty\"").unwrap();
        assert!(matches!(config.level_filter(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = Config::from_toml_str(include_str!("../puretone.example.toml")).unwrap();
        assert_eq!(config.tone_settings(), ToneSettings::default());
        assert_eq!(config.tone_duration(), None);
        assert_eq!(config.step_sizes(), StepSizes::default());
        assert_eq!(config.frontend, Frontend::Window);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/puretone.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
