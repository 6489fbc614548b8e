use core::fmt::{self, Write as _};

/// Maximum length of the status line
pub const STATUS_MAX_LEN: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// The text shown in the `status` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    kind: StatusKind,
    message: heapless::String<STATUS_MAX_LEN>,
}

impl Status {
    pub fn info(args: fmt::Arguments<'_>) -> Self {
        Self::with_kind(StatusKind::Info, args)
    }

    pub fn error(args: fmt::Arguments<'_>) -> Self {
        Self::with_kind(StatusKind::Error, args)
    }

    fn with_kind(kind: StatusKind, args: fmt::Arguments<'_>) -> Self {
        let mut message = Truncating(heapless::String::new());
        let _ = message.write_fmt(args);
        Self {
            kind,
            message: message.0,
        }
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// Writes as much as fits instead of dropping a whole fragment on overflow.
struct Truncating(heapless::String<STATUS_MAX_LEN>);

impl fmt::Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}
