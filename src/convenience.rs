//! Convenience macro for bootstrap-time registration.
//!
//! `register_levels!` expands to a single `register_many_factories` call, so
//! entries are registered in the order written and a type listed twice keeps
//! its last factory. An empty entry list registers nothing.
//!
//! # Usage
//!
//! ```rust
//! use error_levels::{LevelResolver, LogLevel, register_levels};
//! use std::{fmt, io};
//!
//! let mut resolver = LevelResolver::new();
//! register_levels!(resolver, {
//!     io::Error => |e| match e.kind() {
//!         io::ErrorKind::TimedOut => LogLevel::Warning,
//!         _ => LogLevel::Error,
//!     },
//!     fmt::Error => |_| LogLevel::Debug,
//! });
//!
//! assert_eq!(resolver.resolve_level(&fmt::Error), "debug");
//! assert_eq!(resolver.len(), 2);
//! ```
//!
//! The closure parameter is inferred from the type on the left, so `|e|`
//! receives `&io::Error` above.

/// Register one typed factory per `Type => closure` entry.
///
/// # Arguments
/// - `$resolver`: a `LevelResolver` place expression (borrowed mutably)
/// - `$ty`: concrete error type
/// - `$factory`: closure taking `&$ty` and returning anything convertible
///   into `Cow<'static, str>` (`LogLevel`, `&'static str`, `String`)
#[macro_export]
macro_rules! register_levels {
    ($resolver:expr, { $($ty:ty => $factory:expr),* $(,)? }) => {
        {
            let entries: ::std::vec::Vec<($crate::TypeKey, $crate::LevelFactory)> = ::std::vec![
                $(
                    (
                        $crate::TypeKey::of::<$ty>(),
                        $crate::LevelFactory::typed::<$ty, _, _>($factory),
                    )
                ),*
            ];
            $resolver.register_many_factories(entries)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{DEFAULT_LEVEL, LevelResolver, LogLevel};
    use std::fmt;
    use std::io;

    #[test]
    fn registers_every_entry() {
        let mut resolver = LevelResolver::new();
        register_levels!(resolver, {
            io::Error => |_| LogLevel::Warning,
            fmt::Error => |_| "debug",
        });

        assert_eq!(resolver.resolve_level(&io::Error::other("x")), "warning");
        assert_eq!(resolver.resolve_level(&fmt::Error), "debug");
    }

    #[test]
    fn last_entry_for_a_type_wins() {
        let mut resolver = LevelResolver::new();
        register_levels!(resolver, {
            fmt::Error => |_| LogLevel::Warning,
            fmt::Error => |_| LogLevel::Notice,
        });

        assert_eq!(resolver.resolve_level(&fmt::Error), "notice");
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.overwrite_count(), 1);
    }

    #[test]
    fn empty_entry_list_is_a_no_op() {
        let mut resolver = LevelResolver::new();
        register_levels!(resolver, {});

        assert!(resolver.is_empty());
        assert_eq!(resolver.resolve_level(&fmt::Error), DEFAULT_LEVEL);
    }

    #[test]
    fn closure_sees_typed_value() {
        let mut resolver = LevelResolver::new();
        register_levels!(resolver, {
            io::Error => |e| format!("io:{:?}", e.kind()).to_lowercase(),
        });

        let err = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(resolver.resolve_level(&err), "io:notfound");
        assert_eq!(resolver.resolve_level(&fmt::Error), DEFAULT_LEVEL);
    }
}
