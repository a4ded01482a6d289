//! The level registry.
//!
//! `LevelResolver` maps concrete error types to [`LevelFactory`] callbacks.
//! It is filled during application bootstrap and then read on every logged
//! error, so lookups are a single hash probe keyed by `TypeId`.
//!
//! # Exact-Match Dispatch
//!
//! Only the concrete type of the error is consulted. Wrappers, boxes, and
//! errors exposing a registered type through `source()` all resolve to
//! [`DEFAULT_LEVEL`] unless registered themselves. Pass `&*boxed` rather than
//! `&boxed` when the error sits in a `Box<E>`, or use [`LevelResolver::resolve_error`]
//! for `Box<dyn Error>`.
//!
//! # Sharing
//!
//! Registration takes `&mut self` and the resolver carries no lock of its own.
//! Once bootstrap is over, share it by reference or `Arc`; if registration must
//! continue while other threads resolve, wrap it in `RwLock` at the call site.
//!
//! # Example
//!
//! ```rust
//! use error_levels::{LevelResolver, LogLevel, DEFAULT_LEVEL};
//! use std::{fmt, io};
//!
//! #[derive(Debug)]
//! struct Corruption;
//!
//! impl fmt::Display for Corruption {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("checksum mismatch")
//!     }
//! }
//!
//! impl std::error::Error for Corruption {}
//!
//! let mut resolver = LevelResolver::new();
//! resolver.register_level::<Corruption>(LogLevel::Critical);
//! resolver.register(|e: &io::Error| match e.kind() {
//!     io::ErrorKind::TimedOut => LogLevel::Warning,
//!     _ => LogLevel::Error,
//! });
//!
//! assert_eq!(resolver.resolve_level(&Corruption), "critical");
//! assert_eq!(resolver.resolve_level(&io::Error::from(io::ErrorKind::TimedOut)), "warning");
//! assert_eq!(resolver.resolve_level(&fmt::Error), DEFAULT_LEVEL);
//! ```

use crate::factory::LevelFactory;
use crate::level::DEFAULT_LEVEL;
use crate::logging::{LevelSource, ResolutionLog};
use crate::type_key::{Exception, TypeKey};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use tracing::{debug, trace};

/// Registry of level factories keyed by concrete error type.
#[derive(Default)]
pub struct LevelResolver {
    factories: HashMap<TypeKey, LevelFactory>,
    overwrites: u64,
}

impl LevelResolver {
    /// Create an empty resolver. Every error resolves to [`DEFAULT_LEVEL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for the type identified by `type_key`.
    ///
    /// Replaces any factory already registered for that type and returns it.
    pub fn register_factory(&mut self, type_key: TypeKey, factory: LevelFactory) -> Option<LevelFactory> {
        let previous = self.factories.insert(type_key, factory);
        if previous.is_some() {
            self.overwrites += 1;
        }

        debug!(
            error_type = type_key.name(),
            overwritten = previous.is_some(),
            "registered log level factory"
        );

        previous
    }

    /// Register every `(TypeKey, LevelFactory)` pair, in iteration order.
    ///
    /// Equivalent to calling [`register_factory`](Self::register_factory) once
    /// per pair; a key seen again overwrites the earlier factory.
    pub fn register_many_factories<I>(&mut self, factories: I)
    where
        I: IntoIterator<Item = (TypeKey, LevelFactory)>,
    {
        for (type_key, factory) in factories {
            self.register_factory(type_key, factory);
        }
    }

    /// Register a closure over the concrete error type `E`.
    pub fn register<E, F, L>(&mut self, factory: F) -> Option<LevelFactory>
    where
        E: Error + 'static,
        F: Fn(&E) -> L + Send + Sync + 'static,
        L: Into<Cow<'static, str>>,
    {
        self.register_factory(TypeKey::of::<E>(), LevelFactory::typed(factory))
    }

    /// Register a fixed level for the concrete error type `E`.
    pub fn register_level<E>(&mut self, level: impl Into<Cow<'static, str>>) -> Option<LevelFactory>
    where
        E: Error + 'static,
    {
        self.register_factory(TypeKey::of::<E>(), LevelFactory::fixed(level))
    }

    /// Resolve the log level for `exception`.
    ///
    /// Returns the output of the factory registered for the exact concrete
    /// type of `exception`, unmodified, or [`DEFAULT_LEVEL`] when there is
    /// none. Never fails; a panic inside the factory propagates to the caller.
    pub fn resolve_level(&self, exception: &dyn Exception) -> Cow<'static, str> {
        let type_key = exception.type_key();
        let (level, _) = self.lookup(&type_key, exception);
        level
    }

    /// Resolve the log level for an error whose concrete type is erased.
    ///
    /// Same semantics as [`resolve_level`](Self::resolve_level), but the
    /// concrete type can only be recovered by trying each registered type in
    /// turn, so this is linear in the number of registrations.
    ///
    /// ```rust
    /// use error_levels::{LevelResolver, LogLevel};
    /// use std::error::Error;
    /// use std::io;
    ///
    /// let mut resolver = LevelResolver::new();
    /// resolver.register_level::<io::Error>(LogLevel::Notice);
    ///
    /// let err: Box<dyn Error + Send + Sync> = Box::new(io::Error::other("gone"));
    /// assert_eq!(resolver.resolve_error(&*err), "notice");
    /// ```
    pub fn resolve_error(&self, error: &(dyn Error + 'static)) -> Cow<'static, str> {
        let matched = self
            .factories
            .keys()
            .find_map(|type_key| type_key.downcast(error).map(|exception| (type_key, exception)));

        match matched {
            Some((type_key, exception)) => self.lookup(type_key, exception).0,
            None => {
                trace!(source = %LevelSource::Default, "resolved log level for unregistered error");
                Cow::Borrowed(DEFAULT_LEVEL)
            }
        }
    }

    /// Resolve the level and hand a structured record of the resolution to `f`.
    ///
    /// The record borrows from this call and cannot be kept past `f`.
    pub fn resolve_with_log<F, R>(&self, exception: &dyn Exception, f: F) -> R
    where
        F: FnOnce(&ResolutionLog<'_>) -> R,
    {
        let type_key = exception.type_key();
        let (level, source) = self.lookup(&type_key, exception);

        let log = ResolutionLog {
            type_key: &type_key,
            level: level.as_ref(),
            source,
        };
        f(&log)
    }

    /// A factory that declines the error counts as no factory at all.
    fn lookup(&self, type_key: &TypeKey, exception: &dyn Exception) -> (Cow<'static, str>, LevelSource) {
        let (level, source) = match self
            .factories
            .get(type_key)
            .and_then(|factory| factory.try_create(exception))
        {
            Some(level) => (level, LevelSource::Registered),
            None => (Cow::Borrowed(DEFAULT_LEVEL), LevelSource::Default),
        };

        trace!(
            error_type = type_key.name(),
            level = %level,
            source = %source,
            "resolved log level"
        );

        (level, source)
    }

    /// Remove the factory for `type_key`, returning it.
    pub fn unregister(&mut self, type_key: &TypeKey) -> Option<LevelFactory> {
        self.factories.remove(type_key)
    }

    /// Remove every factory. The overwrite counter is kept.
    pub fn clear(&mut self) {
        self.factories.clear();
    }

    /// Factory registered for `type_key`, if any.
    #[inline]
    pub fn factory(&self, type_key: &TypeKey) -> Option<&LevelFactory> {
        self.factories.get(type_key)
    }

    #[inline]
    pub fn contains(&self, type_key: &TypeKey) -> bool {
        self.factories.contains_key(type_key)
    }

    #[inline]
    pub fn contains_type<E: Error + 'static>(&self) -> bool {
        self.contains(&TypeKey::of::<E>())
    }

    /// Keys of all registered types, in no particular order.
    pub fn registered_types(&self) -> SmallVec<[TypeKey; 8]> {
        self.factories.keys().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Number of registrations that replaced an existing factory.
    #[inline]
    pub const fn overwrite_count(&self) -> u64 {
        self.overwrites
    }
}

impl Extend<(TypeKey, LevelFactory)> for LevelResolver {
    fn extend<I: IntoIterator<Item = (TypeKey, LevelFactory)>>(&mut self, iter: I) {
        self.register_many_factories(iter);
    }
}

impl FromIterator<(TypeKey, LevelFactory)> for LevelResolver {
    fn from_iter<I: IntoIterator<Item = (TypeKey, LevelFactory)>>(iter: I) -> Self {
        let mut resolver = Self::new();
        resolver.register_many_factories(iter);
        resolver
    }
}

impl fmt::Debug for LevelResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelResolver")
            .field("types", &self.factories.keys().map(TypeKey::name).collect::<Vec<_>>())
            .field("overwrites", &self.overwrites)
            .finish()
    }
}
