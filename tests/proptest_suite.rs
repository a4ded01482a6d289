//! Property-based tests for error_levels
//!
//! These tests use proptest to generate random registration sequences and
//! check resolution against a plain `HashMap` model.

use error_levels::{DEFAULT_LEVEL, Exception, LevelFactory, LevelResolver, LogLevel, TypeKey};
use proptest::prelude::*;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Distinct error type per `N`.
#[derive(Debug)]
struct Kind<const N: u8>;

impl<const N: u8> fmt::Display for Kind<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind {}", N)
    }
}

impl<const N: u8> Error for Kind<N> {}

/// Number of distinct error types available to the tests.
const KINDS: u8 = 8;

/// Registrations only ever target the first `REGISTRABLE` kinds, so the rest
/// always resolve to the default.
const REGISTRABLE: u8 = 6;

fn key(i: u8) -> TypeKey {
    match i % KINDS {
        0 => TypeKey::of::<Kind<0>>(),
        1 => TypeKey::of::<Kind<1>>(),
        2 => TypeKey::of::<Kind<2>>(),
        3 => TypeKey::of::<Kind<3>>(),
        4 => TypeKey::of::<Kind<4>>(),
        5 => TypeKey::of::<Kind<5>>(),
        6 => TypeKey::of::<Kind<6>>(),
        _ => TypeKey::of::<Kind<7>>(),
    }
}

fn instance(i: u8) -> Box<dyn Error + Send + Sync> {
    match i % KINDS {
        0 => Box::new(Kind::<0>),
        1 => Box::new(Kind::<1>),
        2 => Box::new(Kind::<2>),
        3 => Box::new(Kind::<3>),
        4 => Box::new(Kind::<4>),
        5 => Box::new(Kind::<5>),
        6 => Box::new(Kind::<6>),
        _ => Box::new(Kind::<7>),
    }
}

fn exception(i: u8) -> Box<dyn Exception> {
    match i % KINDS {
        0 => Box::new(Kind::<0>),
        1 => Box::new(Kind::<1>),
        2 => Box::new(Kind::<2>),
        3 => Box::new(Kind::<3>),
        4 => Box::new(Kind::<4>),
        5 => Box::new(Kind::<5>),
        6 => Box::new(Kind::<6>),
        _ => Box::new(Kind::<7>),
    }
}

fn registrations() -> impl Strategy<Value = Vec<(u8, String)>> {
    prop::collection::vec((0..REGISTRABLE, "[a-z]{1,12}"), 0..40)
}

// ============================================================================
// RESOLUTION PROPERTIES
// ============================================================================

proptest! {
    /// Resolution agrees with a last-write-wins map, defaulting to "error"
    #[test]
    fn resolution_matches_model(ops in registrations()) {
        let mut resolver = LevelResolver::new();
        let mut model: HashMap<u8, String> = HashMap::new();

        for (i, level) in &ops {
            resolver.register_factory(key(*i), LevelFactory::fixed(level.clone()));
            model.insert(*i, level.clone());
        }

        for i in 0..KINDS {
            let expected = model.get(&i).map(String::as_str).unwrap_or(DEFAULT_LEVEL);
            prop_assert_eq!(resolver.resolve_level(&*exception(i)), expected);
        }

        prop_assert_eq!(resolver.len(), model.len());
        prop_assert_eq!(resolver.overwrite_count() as usize, ops.len() - model.len());
    }

    /// Bulk registration is indistinguishable from one-by-one registration
    #[test]
    fn bulk_equals_sequential(ops in registrations(), split in 0usize..40) {
        let pairs: Vec<_> = ops
            .iter()
            .map(|(i, level)| (key(*i), LevelFactory::fixed(level.clone())))
            .collect();
        let split = split.min(pairs.len());

        let mut bulk = LevelResolver::new();
        bulk.register_many_factories(pairs[..split].iter().cloned());
        bulk.register_many_factories(pairs[split..].iter().cloned());

        let mut sequential = LevelResolver::new();
        for (type_key, factory) in pairs {
            sequential.register_factory(type_key, factory);
        }

        for i in 0..KINDS {
            let err = exception(i);
            prop_assert_eq!(bulk.resolve_level(&*err), sequential.resolve_level(&*err));
        }
    }

    /// Erased resolution agrees with typed resolution
    #[test]
    fn erased_matches_typed(ops in registrations()) {
        let mut resolver = LevelResolver::new();
        for (i, level) in ops {
            resolver.register_factory(key(i), LevelFactory::fixed(level));
        }

        for i in 0..KINDS {
            let erased = instance(i);
            let typed = exception(i);
            prop_assert_eq!(
                resolver.resolve_error(&*erased),
                resolver.resolve_level(&*typed)
            );
        }
    }

    /// Types never registered always resolve to the default
    #[test]
    fn unregistered_types_default(ops in registrations()) {
        let mut resolver = LevelResolver::new();
        for (i, level) in ops {
            resolver.register_factory(key(i), LevelFactory::fixed(level));
        }

        for i in REGISTRABLE..KINDS {
            prop_assert_eq!(resolver.resolve_level(&*exception(i)), DEFAULT_LEVEL);
        }
    }

    /// Factory output is passed through verbatim
    #[test]
    fn factory_output_unmodified(level in "\\PC*") {
        let mut resolver = LevelResolver::new();
        let expected = level.clone();
        resolver.register(move |_: &Kind<0>| level.clone());

        prop_assert_eq!(resolver.resolve_level(&Kind::<0>), expected);
    }
}

// ============================================================================
// LOGGING PROPERTIES
// ============================================================================

proptest! {
    /// Formatted resolution logs stay bounded and valid UTF-8
    #[test]
    fn resolution_log_is_bounded(level in "\\PC{0,5000}") {
        let mut resolver = LevelResolver::new();
        resolver.register_level::<Kind<1>>(level);

        let buffer = resolver.resolve_with_log(&Kind::<1>, |log| {
            let mut buffer = String::new();
            log.write_to(&mut buffer).unwrap();
            buffer
        });

        assert!(std::str::from_utf8(buffer.as_bytes()).is_ok());
        assert!(buffer.len() < 2048);
    }
}

// ============================================================================
// LEVEL PARSING PROPERTIES
// ============================================================================

proptest! {
    /// Level names parse regardless of ASCII case
    #[test]
    fn level_parse_ignores_case(
        level in prop::sample::select(LogLevel::ALL.to_vec()),
        mask in prop::collection::vec(any::<bool>(), 9),
    ) {
        let mixed: String = level
            .as_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();

        prop_assert_eq!(mixed.parse::<LogLevel>(), Ok(level));
    }

    /// Parsing arbitrary input never panics
    #[test]
    fn level_parse_never_panics(s in "\\PC*") {
        let _ = s.parse::<LogLevel>();
    }
}
