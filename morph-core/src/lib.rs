//! # morph-core — Protocol types for polymorphic value casting
//!
//! This crate defines the vocabulary shared by every piece of a morph cast:
//! a symbolic type key stored next to a property, a registry that resolves
//! the key to a concrete type, and the construction contract every
//! registered type follows.
//!
//! ## The Pieces
//!
//! | Concept | Type | What it does |
//! |---------|------|-------------|
//! | Payload | [`Payload`] | Ordered field/value mapping used to build an instance |
//! | Instance | [`Morph`] | Object-safe view of a constructed value |
//! | Construction | [`FromPayload`], [`TypeDescriptor`] | Payload in, instance out |
//! | Registry | [`TypeRegistry`] | Symbolic key to [`TypeDescriptor`] |
//! | Envelope | [`ContainerData`] | Where the `{property}_type` key is read from |
//!
//! ## Construction Without Reflection
//!
//! A registered type is represented by a [`TypeDescriptor`]: its canonical
//! name and a plain function pointer that takes the payload as its only
//! argument. Resolution is a data lookup followed by a direct call, so the
//! "one mapping argument" contract is enforced by the signature of
//! [`FromPayload::from_payload`].
//!
//! ## Wire Contract
//!
//! The key for property `P` lives in the field `P_type` (see
//! [`TYPE_KEY_SUFFIX`]). Callers depend on this exact spelling.

#![deny(missing_docs)]

pub mod container;
pub mod error;
pub mod morph;
pub mod payload;
pub mod registry;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use container::ContainerData;
pub use error::{BoxError, CastError};
pub use morph::{FromPayload, Morph};
pub use payload::{Payload, payload_from_value};
pub use registry::{TYPE_KEY_SUFFIX, TypeDescriptor, TypeRegistry, type_key_field};
