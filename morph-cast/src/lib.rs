#![deny(missing_docs)]
//! Polymorphic property casting.
//!
//! A [`MorphCaster`] turns a raw mapping into an instance of whatever type
//! the surrounding data names. For a property `owner`, the caster:
//!
//! 1. reads the symbolic key from the container field `owner_type`,
//! 2. resolves it through an injected [`TypeRegistry`](morph_core::TypeRegistry),
//! 3. removes the configured [`SensitiveFields`] from a copy of the payload,
//! 4. constructs the resolved type from that payload.
//!
//! ```
//! use morph_cast::MorphCaster;
//! use morph_core::test_utils::ModelInstance;
//! use morph_map::MorphMap;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(MorphMap::new().with::<ModelInstance>("model_instance"));
//! let caster = MorphCaster::new(registry).with_sensitive_fields(["password"]);
//!
//! let dto = json!({"owner_type": "model_instance"});
//! let owner = caster
//!     .cast_value(&dto, "owner", &json!({"name": "Jane Doe", "password": "hunter2"}))
//!     .unwrap();
//! assert_eq!(json!(owner.to_payload()), json!({"name": "Jane Doe"}));
//! ```
//!
//! Casting is synchronous and keeps no per-call state, so one caster can be
//! shared across threads.

pub mod caster;
pub mod config;
pub mod sensitive;

pub use caster::MorphCaster;
pub use config::{ConfigError, MorphCastConfig};
pub use sensitive::SensitiveFields;
