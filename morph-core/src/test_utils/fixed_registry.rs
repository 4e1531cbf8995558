//! FixedRegistry — HashMap-backed TypeRegistry for testing.

use crate::morph::FromPayload;
use crate::registry::{TypeDescriptor, TypeRegistry};
use std::collections::HashMap;

/// A registry whose entries are fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct FixedRegistry {
    entries: HashMap<String, TypeDescriptor>,
}

impl FixedRegistry {
    /// Create an empty registry. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `T` under `key`.
    pub fn with<T: FromPayload>(mut self, key: impl Into<String>) -> Self {
        self.entries.insert(key.into(), TypeDescriptor::of::<T>());
        self
    }
}

impl TypeRegistry for FixedRegistry {
    fn resolve(&self, key: &str) -> Option<TypeDescriptor> {
        self.entries.get(key).copied()
    }
}
