//! Type descriptors and the registry protocol.

use crate::error::BoxError;
use crate::morph::{FromPayload, Morph};
use crate::payload::Payload;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Suffix appended to a property name to find its symbolic type key.
///
/// Part of the wire contract with callers: the key for property `owner`
/// is read from the field `owner_type`.
pub const TYPE_KEY_SUFFIX: &str = "_type";

/// The container field holding the type key for `property`.
pub fn type_key_field(property: &str) -> String {
    format!("{property}{TYPE_KEY_SUFFIX}")
}

/// Factory signature shared by every registered type.
pub type Factory = fn(Payload) -> Result<Box<dyn Morph>, BoxError>;

/// A concrete, constructible type: identity, canonical name and factory.
///
/// Identity is the built type's [`TypeId`]; the name is for display and
/// lookup only, and two types may share one. Cheap to copy; registries
/// hand these out by value.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    type_id: TypeId,
    name: &'static str,
    factory: Factory,
}

impl TypeDescriptor {
    /// Descriptor for a [`FromPayload`] type.
    pub fn of<T: FromPayload>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::TYPE_NAME,
            factory: construct_boxed::<T>,
        }
    }

    /// Descriptor from an explicit factory function that builds a `T`.
    pub fn from_factory<T: Morph>(name: &'static str, factory: Factory) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name,
            factory,
        }
    }

    /// Canonical type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// [`TypeId`] of the type this descriptor builds.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether this descriptor builds instances like `instance`.
    pub fn builds(&self, instance: &dyn Morph) -> bool {
        self.type_id == instance.morph_type_id()
    }

    /// Build an instance from `payload`. Errors come from the type itself.
    pub fn construct(&self, payload: Payload) -> Result<Box<dyn Morph>, BoxError> {
        (self.factory)(payload)
    }
}

fn construct_boxed<T: FromPayload>(payload: Payload) -> Result<Box<dyn Morph>, BoxError> {
    T::from_payload(payload)
        .map(|v| Box::new(v) as Box<dyn Morph>)
        .map_err(|e| Box::new(e) as BoxError)
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl Eq for TypeDescriptor {}

/// Resolve a symbolic type key to a concrete type.
///
/// Implementations must be pure lookups. Absence is an expected outcome,
/// not a bug; the caster turns it into
/// [`CastError::UnresolvedType`](crate::CastError::UnresolvedType).
pub trait TypeRegistry: Send + Sync {
    /// Look up `key`.
    fn resolve(&self, key: &str) -> Option<TypeDescriptor>;
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for Arc<R> {
    fn resolve(&self, key: &str) -> Option<TypeDescriptor> {
        (**self).resolve(key)
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn resolve(&self, key: &str) -> Option<TypeDescriptor> {
        (**self).resolve(key)
    }
}
