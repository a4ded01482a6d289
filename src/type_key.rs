//! Type identity for error values.
//!
//! A `TypeKey` names one concrete error type. Two keys are equal exactly when
//! they were built for the same type; the type name is carried along for
//! diagnostics only and never takes part in comparisons.
//!
//! The [`Exception`] trait is how a value reports its own key. It is
//! implemented for every `Error + 'static` type, so any `&E` coerces to
//! `&dyn Exception` and still reports the key of `E`, not of the reference or
//! trait object it travels through.
//!
//! # Exact Match
//!
//! Keys do not know about wrappers or conversions. `TypeKey::of::<Box<E>>()`
//! and `TypeKey::of::<E>()` are different keys, as are the keys of an error
//! and of another error wrapping it as its `source()`.
//!
//! ```rust
//! use error_levels::{Exception, TypeKey};
//! use std::fmt;
//!
//! #[derive(Debug)]
//! struct Timeout;
//!
//! impl fmt::Display for Timeout {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("timed out")
//!     }
//! }
//!
//! impl std::error::Error for Timeout {}
//!
//! let err: &dyn Exception = &Timeout;
//! assert_eq!(err.type_key(), TypeKey::of::<Timeout>());
//! assert_ne!(TypeKey::of::<Box<Timeout>>(), TypeKey::of::<Timeout>());
//! ```

use std::any::{Any, TypeId, type_name};
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Recovers a concrete error from an erased `dyn Error`, if the types match.
type Downcaster = for<'a> fn(&'a (dyn Error + 'static)) -> Option<&'a dyn Exception>;

/// Identifier of a concrete error type, usable as a map key.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    downcast: Downcaster,
}

impl TypeKey {
    /// Key for the concrete error type `E`.
    #[inline]
    pub fn of<E: Error + 'static>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
            downcast: downcast_exception::<E>,
        }
    }

    /// Key of the concrete type behind `exception`.
    #[inline]
    pub fn of_val(exception: &dyn Exception) -> Self {
        exception.type_key()
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by `std::any::type_name`.
    ///
    /// Not guaranteed stable across compiler versions; use it for display only.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this key was built for `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// View `error` as the keyed type, if that is its concrete type.
    #[inline]
    pub(crate) fn downcast<'a>(&self, error: &'a (dyn Error + 'static)) -> Option<&'a dyn Exception> {
        (self.downcast)(error)
    }
}

fn downcast_exception<'a, E: Error + 'static>(error: &'a (dyn Error + 'static)) -> Option<&'a dyn Exception> {
    error.downcast_ref::<E>().map(|e| e as &dyn Exception)
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An error value that can report its concrete type.
///
/// Blanket-implemented for every `E: Error + 'static`; there is no need (and
/// no way) to implement it by hand.
pub trait Exception: Error + 'static {
    /// Key of the concrete type of `self`.
    fn type_key(&self) -> TypeKey;

    /// `self` as `Any`, for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl<E: Error + 'static> Exception for E {
    #[inline]
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<E>()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Exception {
    /// Downcast to the concrete type `E`.
    #[inline]
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    /// Whether the concrete type is exactly `E`.
    #[inline]
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.as_any().is::<E>()
    }
}
