//! The capability every castable type provides.

use crate::payload::Payload;
use std::any::{Any, TypeId};
use std::fmt;

/// Upcast helper so `dyn Morph` can be downcast to its concrete type.
///
/// Blanket-implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Convert a box into `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A constructed instance, as seen by the caller of a cast.
///
/// Object safe. Ownership of the instance passes to the caller; the caster
/// keeps no reference to it.
pub trait Morph: AsAny + fmt::Debug + Send + Sync {
    /// Canonical name of the concrete type.
    fn type_name(&self) -> &'static str;

    /// Externalized representation: the instance's fields as a payload.
    fn to_payload(&self) -> Payload;
}

impl dyn Morph {
    /// [`TypeId`] of the concrete type behind the trait object.
    pub fn morph_type_id(&self) -> TypeId {
        Any::type_id(AsAny::as_any(self))
    }

    /// Whether the instance is a `T`.
    pub fn is<T: Morph>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    /// Borrow the instance as a `T`, if it is one.
    pub fn downcast_ref<T: Morph>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    /// Take the instance as a `T`. Returns `None` (dropping the instance)
    /// if it is some other type; check with [`is`](Self::is) first when the
    /// instance must survive a mismatch.
    pub fn downcast<T: Morph>(self: Box<Self>) -> Option<Box<T>> {
        AsAny::into_any(self).downcast::<T>().ok()
    }
}

/// Construction from a payload: the single-argument constructor contract.
///
/// Every type that can be registered under a symbolic key implements this.
/// The payload is the only input; failure is the type's own error and is
/// handed back to the caller of the cast unchanged.
pub trait FromPayload: Morph + Sized {
    /// Canonical name, as reported by [`Morph::type_name`].
    const TYPE_NAME: &'static str;

    /// The type's construction error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build an instance from `payload`.
    fn from_payload(payload: Payload) -> Result<Self, Self::Error>;
}
