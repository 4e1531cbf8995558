#![deny(missing_docs)]
//! # morphcast — umbrella crate
//!
//! Single import surface for polymorphic property casting. Re-exports the
//! protocol crate and the implementations behind feature flags, plus a
//! `prelude` for the happy path.

pub use morph_core;
#[cfg(feature = "cast")]
pub use morph_cast;
#[cfg(feature = "map")]
pub use morph_map;

/// Happy-path imports for casting DTO properties.
pub mod prelude {
    pub use morph_core::{
        CastError, ContainerData, FromPayload, Morph, Payload, TYPE_KEY_SUFFIX, TypeDescriptor,
        TypeRegistry,
    };

    #[cfg(feature = "cast")]
    pub use morph_cast::{MorphCastConfig, MorphCaster, SensitiveFields};

    #[cfg(feature = "map")]
    pub use morph_map::{MorphMap, SharedMorphMap};
}
