use std::path::PathBuf;

use clap::Parser;
use puretone_core::engine::Engine;

use crate::audio::DesktopOutput;
use crate::config::{Config, Frontend};

mod audio;
mod config;
mod log_capture;
mod tui;
mod window;

/// Pure tone generator: pick a frequency and a volume, then play.
#[derive(Parser, Debug)]
#[command(name = "puretone", version, about)]
struct Cli {
    /// Config file; defaults to ./puretone.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Front end to run
    #[arg(short, long, value_enum)]
    frontend: Option<Frontend>,

    /// Initial frequency in Hz
    #[arg(long)]
    frequency: Option<u32>,

    /// Initial volume in dB
    #[arg(long, allow_hyphen_values = true)]
    volume: Option<f32>,

    /// Stop each tone after this many milliseconds (0 plays until stopped)
    #[arg(long)]
    duration_ms: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(frontend) = self.frontend {
            config.frontend = frontend;
        }
        if let Some(hz) = self.frequency {
            config.frequency_hz = hz;
        }
        if let Some(db) = self.volume {
            config.volume_db = db;
        }
        if let Some(ms) = self.duration_ms {
            config.tone_duration_ms = Some(ms);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    let level = config.level_filter()?;

    let output = DesktopOutput::new(config.sample_rate, config.tone_duration());
    match config.frontend {
        Frontend::Window => {
            log_capture::init(level);
            let engine = Engine::with_steps(output, config.tone_settings(), config.step_sizes());
            window::run(engine, config.window_scale)
        }
        Frontend::Tui => {
            let rx = tui::init_logger(level);
            let engine = Engine::with_steps(output, config.tone_settings(), config.step_sizes());
            tui::run(engine, rx)
        }
    }
}
