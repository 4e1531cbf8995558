//! Test utilities: fake types and a fixed registry.
//!
//! Enabled by the `test-utils` feature. Not for production use.

mod fixed_registry;
mod model_instance;
mod strict_model;

pub use fixed_registry::FixedRegistry;
pub use model_instance::ModelInstance;
pub use strict_model::{StrictModel, StrictModelError};
