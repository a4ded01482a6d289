//! # Error Levels
//!
//! Central registry mapping concrete error types to log severity levels.
//!
//! ## Design Philosophy
//!
//! 1. **Severity is decided in one place**, at bootstrap, not at every `match` on an error
//! 2. **Lookup is exact**: only the concrete type of an error selects its factory
//! 3. **Resolution never fails**: unknown types get [`DEFAULT_LEVEL`] (`"error"`)
//! 4. **Factories are trusted**: their output is returned as-is, and their panics are the caller's
//! 5. **No logging on the caller's behalf**: the crate produces a level string, nothing more
//!
//! ## Quick Start
//!
//! ```rust
//! use error_levels::{LevelResolver, LogLevel, register_levels};
//! use std::{fmt, io};
//!
//! #[derive(Debug)]
//! struct Timeout;
//!
//! impl fmt::Display for Timeout {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("upstream timed out")
//!     }
//! }
//!
//! impl std::error::Error for Timeout {}
//!
//! let mut resolver = LevelResolver::new();
//! register_levels!(resolver, {
//!     Timeout => |_| LogLevel::Warning,
//!     io::Error => |e| if e.kind() == io::ErrorKind::PermissionDenied {
//!         LogLevel::Alert
//!     } else {
//!         LogLevel::Error
//!     },
//! });
//!
//! assert_eq!(resolver.resolve_level(&Timeout), "warning");
//! assert_eq!(resolver.resolve_level(&io::Error::from(io::ErrorKind::PermissionDenied)), "alert");
//! assert_eq!(resolver.resolve_level(&fmt::Error), "error");
//! ```
//!
//! ## Erased Errors
//!
//! Errors travelling as `Box<dyn Error + Send + Sync>` have lost their static
//! type. [`LevelResolver::resolve_error`] recovers it by downcasting against the
//! registered types:
//!
//! ```rust
//! use error_levels::{LevelResolver, LogLevel};
//! use std::error::Error;
//! use std::io;
//!
//! let mut resolver = LevelResolver::new();
//! resolver.register_level::<io::Error>(LogLevel::Critical);
//!
//! let err: Box<dyn Error + Send + Sync> = Box::new(io::Error::other("disk failure"));
//! assert_eq!(resolver.resolve_error(&*err), "critical");
//! ```
//!
//! ## Diagnostics
//!
//! Registration and resolution emit `tracing` events at `debug` and `trace`
//! level under this crate's target. Install a subscriber to see them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod convenience;
pub mod factory;
pub mod level;
pub mod logging;
pub mod resolver;
pub mod type_key;

pub use factory::*;
pub use level::*;
pub use logging::*;
pub use resolver::*;
pub use type_key::*;
