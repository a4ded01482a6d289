//! Conventional log severities and the fallback level.
//!
//! Resolution hands back plain strings so that downstream loggers can use
//! whatever vocabulary they understand. `LogLevel` names the eight levels
//! almost every logging abstraction agrees on, ordered from least to most
//! severe, and is the easiest way to produce those strings from a factory.
//!
//! # Example
//!
//! ```rust
//! use error_levels::{LogLevel, DEFAULT_LEVEL};
//!
//! assert_eq!(LogLevel::Warning.as_str(), "warning");
//! assert_eq!("CRITICAL".parse::<LogLevel>(), Ok(LogLevel::Critical));
//! assert_eq!(DEFAULT_LEVEL, LogLevel::Error.as_str());
//! assert!(LogLevel::Alert > LogLevel::Error);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Level returned for any error whose type has no registered factory.
pub const DEFAULT_LEVEL: &str = LogLevel::Error.as_str();

/// Maximum bytes of rejected input echoed back by [`LevelParseError`].
const MAX_ECHOED_INPUT_LEN: usize = 64;

/// Standard log severities, ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Detailed debug information.
    Debug,
    /// Interesting events.
    Info,
    /// Normal but significant events.
    Notice,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Runtime errors that do not require immediate action.
    #[default]
    Error,
    /// Critical conditions.
    Critical,
    /// Action must be taken immediately.
    Alert,
    /// System is unusable.
    Emergency,
}

impl LogLevel {
    /// Every level, least severe first.
    pub const ALL: [LogLevel; 8] = [
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::Alert,
        Self::Emergency,
    ];

    /// Lowercase name understood by logging backends.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Alert => "alert",
            Self::Emergency => "emergency",
        }
    }

    /// Whether this level is at least as severe as [`LogLevel::Error`].
    #[inline]
    pub const fn is_error_or_worse(self) -> bool {
        self as u8 >= Self::Error as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for Cow<'static, str> {
    #[inline]
    fn from(level: LogLevel) -> Self {
        Cow::Borrowed(level.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LevelParseError::Empty);
        }

        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LevelParseError::Unknown {
                value: echo_bounded(trimmed),
            })
    }
}

/// Error type for level parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelParseError {
    /// Input was empty or whitespace only.
    Empty,
    /// Input is not one of the eight level names.
    Unknown { value: String },
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Log level must not be empty"),
            Self::Unknown { value } => {
                write!(f, "Unknown log level '{}'", value)
            }
        }
    }
}

impl std::error::Error for LevelParseError {}

/// Copy at most `MAX_ECHOED_INPUT_LEN` bytes of rejected input, on a char boundary.
fn echo_bounded(s: &str) -> String {
    if s.len() <= MAX_ECHOED_INPUT_LEN {
        return s.to_owned();
    }

    let mut idx = MAX_ECHOED_INPUT_LEN;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    s[..idx].to_owned()
}
