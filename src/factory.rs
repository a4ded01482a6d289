//! Level factories: "error in, level out" callbacks.
//!
//! A `LevelFactory` is a shared, type-erased closure. Cloning one clones an
//! `Arc`, so the same factory can back several registrations.
//!
//! A typed factory only answers for its own error type. Handed anything else
//! it declines, and the resolver reports the fallback level as a default.
//!
//! Factories are trusted. Whatever string they return is handed to the caller
//! unmodified, recognised level name or not, and a panicking factory panics
//! the caller of `resolve_level`.

use crate::level::{DEFAULT_LEVEL, LogLevel};
use crate::type_key::Exception;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Returns `None` when the factory declines the error (typed factory, foreign type).
type FactoryFn = dyn Fn(&dyn Exception) -> Option<Cow<'static, str>> + Send + Sync;

/// Callback producing a level string for an error value.
///
/// # Example
///
/// ```rust
/// use error_levels::{LevelFactory, LogLevel};
/// use std::io;
///
/// let by_kind = LevelFactory::typed(|e: &io::Error| match e.kind() {
///     io::ErrorKind::TimedOut => LogLevel::Warning,
///     _ => LogLevel::Error,
/// });
///
/// let err = io::Error::from(io::ErrorKind::TimedOut);
/// assert_eq!(by_kind.create(&err), "warning");
/// ```
#[derive(Clone)]
pub struct LevelFactory {
    inner: Arc<FactoryFn>,
}

impl LevelFactory {
    /// Factory over any error value.
    ///
    /// The closure receives the error as `&dyn Exception` and may downcast it
    /// itself.
    pub fn new<F, L>(factory: F) -> Self
    where
        F: Fn(&dyn Exception) -> L + Send + Sync + 'static,
        L: Into<Cow<'static, str>>,
    {
        Self {
            inner: Arc::new(move |exception: &dyn Exception| -> Option<Cow<'static, str>> {
                Some(factory(exception).into())
            }),
        }
    }

    /// Factory over errors of the concrete type `E`.
    ///
    /// If invoked with an error of any other type the closure is not called
    /// and the factory declines: [`try_create`](Self::try_create) returns
    /// `None` and [`create`](Self::create) returns [`DEFAULT_LEVEL`]. Through
    /// `LevelResolver` this only happens when the factory was registered under
    /// another type's key, and the resolution is then reported as a default.
    pub fn typed<E, F, L>(factory: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> L + Send + Sync + 'static,
        L: Into<Cow<'static, str>>,
    {
        Self {
            inner: Arc::new(move |exception: &dyn Exception| -> Option<Cow<'static, str>> {
                exception.downcast_ref::<E>().map(|error| factory(error).into())
            }),
        }
    }

    /// Factory that ignores the error and always returns `level`.
    pub fn fixed(level: impl Into<Cow<'static, str>>) -> Self {
        let level = level.into();
        Self::new(move |_: &dyn Exception| level.clone())
    }

    /// Invoke the factory, falling back to [`DEFAULT_LEVEL`] if it declines.
    #[inline]
    pub fn create(&self, exception: &dyn Exception) -> Cow<'static, str> {
        self.try_create(exception)
            .unwrap_or(Cow::Borrowed(DEFAULT_LEVEL))
    }

    /// Invoke the factory; `None` if it does not handle this error's type.
    #[inline]
    pub fn try_create(&self, exception: &dyn Exception) -> Option<Cow<'static, str>> {
        (self.inner)(exception)
    }

    /// Whether both handles share the same underlying closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<LogLevel> for LevelFactory {
    fn from(level: LogLevel) -> Self {
        Self::fixed(level)
    }
}

impl fmt::Debug for LevelFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LevelFactory(..)")
    }
}
