//! Log capture for the window front end: every record goes to the console,
//! and warnings and errors are also kept in a ring buffer that the window
//! shows under the page.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use puretone_core::log_buffer::{LogBuffer, LogEntry, LogLevel};

static LOG_BUFFER: Mutex<LogBuffer> = Mutex::new(LogBuffer::new(LogLevel::Warn));

pub struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Ok(mut buffer) = LOG_BUFFER.lock() {
            buffer.push(LogLevel::from(record.level()), &record.args().to_string());
        }

        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        println!("[{}] {}: {}", level, record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Installs the capture logger. A logger that is already set stays in place.
pub fn init(max_level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}

/// The last `count` captured entries, oldest first.
pub fn recent_log_entries(count: usize) -> Vec<LogEntry> {
    LOG_BUFFER
        .lock()
        .map(|buffer| buffer.tail(count).cloned().collect())
        .unwrap_or_default()
}
