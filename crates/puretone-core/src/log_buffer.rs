//! Ring buffer of recent log lines, so front ends can show what the player
//! has been reporting next to the page.

use heapless::Deque;

/// Default number of lines kept
pub const LOG_BUFFER_CAPACITY: usize = 32;

/// Longest line kept; the rest is cut off
pub const LOG_LINE_MAX_LEN: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Trace => "T",
            LogLevel::Debug => "D",
            LogLevel::Info => "I",
            LogLevel::Warn => "W",
            LogLevel::Error => "E",
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: heapless::String<LOG_LINE_MAX_LEN>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: &str) -> Self {
        let mut msg = heapless::String::new();
        for c in message.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        Self { level, message: msg }
    }
}

/// Fixed-size log ring; the oldest entry is dropped when a new one arrives
/// on a full buffer.
pub struct LogBuffer<const N: usize = LOG_BUFFER_CAPACITY> {
    entries: Deque<LogEntry, N>,
    min_level: LogLevel,
}

impl<const N: usize> LogBuffer<N> {
    pub const fn new(min_level: LogLevel) -> Self {
        Self {
            entries: Deque::new(),
            min_level,
        }
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn push(&mut self, level: LogLevel, message: &str) {
        self.push_entry(LogEntry::new(level, message));
    }

    pub fn push_entry(&mut self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // room was made above
        let _ = self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The last `count` entries, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.len().saturating_sub(count))
    }
}

impl<const N: usize> Default for LogBuffer<N> {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec::Vec};

    #[test]
    fn test_push_and_iterate() {
        let mut buffer: LogBuffer = LogBuffer::default();
        buffer.push(LogLevel::Info, "playback started");
        buffer.push(LogLevel::Warn, "output underrun");

        let messages: Vec<_> = buffer.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["playback started", "output underrun"]);
    }

    #[test]
    fn test_level_filtering() {
        let mut buffer: LogBuffer = LogBuffer::new(LogLevel::Warn);
        buffer.push(LogLevel::Info, "ignored");
        buffer.push(LogLevel::Error, "captured");
        assert_eq!(buffer.len(), 1);

        buffer.set_min_level(LogLevel::Trace);
        buffer.push(LogLevel::Debug, "now captured");
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_full_buffer_drops_oldest() {
        let mut buffer: LogBuffer<4> = LogBuffer::default();
        for i in 0..6 {
            buffer.push(LogLevel::Info, &format!("line {i}"));
        }
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.iter().next().unwrap().message.as_str(), "line 2");

        let tail: Vec<_> = buffer.tail(2).map(|e| e.message.as_str()).collect();
        assert_eq!(tail, ["line 4", "line 5"]);
    }

    #[test]
    fn test_long_line_is_cut() {
        let long = "x".repeat(LOG_LINE_MAX_LEN + 20);
        let entry = LogEntry::new(LogLevel::Error, &long);
        assert_eq!(entry.message.len(), LOG_LINE_MAX_LEN);
    }

    #[test]
    fn test_level_conversion() {
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert!(LogLevel::Error > LogLevel::Info);
        assert_eq!(LogLevel::Debug.prefix(), "D");
    }
}
