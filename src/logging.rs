//! Structured record of a single level resolution.
//!
//! `ResolutionLog` borrows from the resolver and from the resolved level, so
//! it lives only for the duration of the `resolve_with_log` callback. The
//! logging pipeline reads the fields it needs and lets it go.
//!
//! Level strings come from user-supplied factories and are not validated.
//! `write_to` bounds their length so a misbehaving factory cannot flood the
//! log line.

use crate::TypeKey;
use std::borrow::Cow;
use std::fmt;

/// Maximum length for the level field in formatted output.
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Where a resolved level came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelSource {
    /// A factory was registered for the exact type and produced the level.
    Registered,
    /// No factory matched; the level is `DEFAULT_LEVEL`.
    Default,
}

impl LevelSource {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for LevelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured log entry for one resolution.
///
/// # Example
///
/// ```rust
/// use error_levels::{LevelResolver, LevelSource, LogLevel};
/// use std::io;
///
/// let mut resolver = LevelResolver::new();
/// resolver.register_level::<io::Error>(LogLevel::Warning);
///
/// let err = io::Error::other("disk busy");
/// let line = resolver.resolve_with_log(&err, |log| {
///     assert_eq!(log.source(), LevelSource::Registered);
///     let mut buffer = String::new();
///     log.write_to(&mut buffer).unwrap();
///     buffer
/// });
/// assert!(line.starts_with("level='warning' source=registered"));
/// ```
#[derive(Debug)]
pub struct ResolutionLog<'a> {
    pub type_key: &'a TypeKey,
    pub level: &'a str,
    pub source: LevelSource,
}

impl<'a> ResolutionLog<'a> {
    /// Write the entry to a formatter without allocating (unless the level
    /// needs truncation).
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "level='{}' source={} type='{}'",
            truncate_with_indicator(self.level),
            self.source,
            self.type_key.name()
        )
    }

    #[inline]
    pub const fn type_key(&self) -> &TypeKey {
        self.type_key
    }

    #[inline]
    pub const fn level(&self) -> &str {
        self.level
    }

    #[inline]
    pub const fn source(&self) -> LevelSource {
        self.source
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.source == LevelSource::Default
    }
}

impl fmt::Display for ResolutionLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Truncate a string for display, keeping the cut on a UTF-8 boundary.
///
/// Returns a Cow<str> to avoid allocation when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
