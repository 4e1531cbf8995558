#![deny(missing_docs)]
//! In-memory morph map for morph-core's [`TypeRegistry`] trait.
//!
//! [`MorphMap`] is an owned alias table, usually built once at startup and
//! shared behind an `Arc`. [`SharedMorphMap`] is a cloneable handle over a
//! `RwLock` for hosts that keep one process-wide map and populate or merge
//! it after other components already hold a reference.
//!
//! Lookups resolve the alias first. Unless [`MorphMap::enforce_aliases`]
//! is set, a key that matches the canonical name of a registered type
//! resolves to that type too, so callers may store either form in the
//! `_type` field. A canonical name claimed by two distinct types resolves
//! to neither; register an alias for each.

use morph_core::{FromPayload, Morph, TypeDescriptor, TypeRegistry};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Alias table from symbolic key to [`TypeDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct MorphMap {
    entries: BTreeMap<String, TypeDescriptor>,
    enforce_aliases: bool,
}

impl MorphMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T: FromPayload>(mut self, alias: impl Into<String>) -> Self {
        self.register::<T>(alias);
        self
    }

    /// Only resolve registered aliases, never canonical type names.
    pub fn enforce_aliases(mut self) -> Self {
        self.enforce_aliases = true;
        self
    }

    /// Register `T` under `alias`. Returns the descriptor it replaced.
    pub fn register<T: FromPayload>(&mut self, alias: impl Into<String>) -> Option<TypeDescriptor> {
        self.register_descriptor(alias, TypeDescriptor::of::<T>())
    }

    /// Register an explicit descriptor under `alias`. Returns the descriptor it replaced.
    pub fn register_descriptor(
        &mut self,
        alias: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Option<TypeDescriptor> {
        let alias = alias.into();
        if let Some((other, _)) = self.entries.iter().find(|(other, d)| {
            other.as_str() != alias
                && d.name() == descriptor.name()
                && d.type_id() != descriptor.type_id()
        }) {
            tracing::warn!(
                alias = %alias,
                other_alias = %other,
                type_name = descriptor.name(),
                "morph type name shared by distinct types"
            );
        }
        let previous = self.entries.insert(alias.clone(), descriptor);
        if let Some(prev) = &previous {
            tracing::warn!(
                alias = %alias,
                previous = prev.name(),
                replacement = descriptor.name(),
                "morph alias replaced"
            );
        }
        previous
    }

    /// Copy every entry of `other` into this map. Entries from `other` win.
    pub fn merge(&mut self, other: &MorphMap) {
        for (alias, descriptor) in &other.entries {
            self.register_descriptor(alias.clone(), *descriptor);
        }
    }

    /// Remove `alias`. Returns its descriptor, if it was registered.
    pub fn remove(&mut self, alias: &str) -> Option<TypeDescriptor> {
        self.entries.remove(alias)
    }

    /// The descriptor registered under `alias`, ignoring canonical names.
    pub fn get(&self, alias: &str) -> Option<TypeDescriptor> {
        self.entries.get(alias).copied()
    }

    /// Whether `alias` is registered.
    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    /// First alias (in sorted order) registered for a type named `type_name`.
    ///
    /// Names are not unique; prefer [`alias_for`](Self::alias_for) when an
    /// instance is at hand.
    pub fn alias_of(&self, type_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, d)| d.name() == type_name)
            .map(|(alias, _)| alias.as_str())
    }

    /// The alias to write into a `_type` field for `instance`.
    ///
    /// Matches on the instance's concrete type, not its name.
    pub fn alias_for(&self, instance: &dyn Morph) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, d)| d.builds(instance))
            .map(|(alias, _)| alias.as_str())
    }

    /// Registered aliases in sorted order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> Extend<(S, TypeDescriptor)> for MorphMap {
    fn extend<I: IntoIterator<Item = (S, TypeDescriptor)>>(&mut self, iter: I) {
        for (alias, descriptor) in iter {
            self.register_descriptor(alias, descriptor);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, TypeDescriptor)> for MorphMap {
    fn from_iter<I: IntoIterator<Item = (S, TypeDescriptor)>>(iter: I) -> Self {
        let mut map = MorphMap::new();
        map.extend(iter);
        map
    }
}

impl TypeRegistry for MorphMap {
    fn resolve(&self, key: &str) -> Option<TypeDescriptor> {
        if let Some(descriptor) = self.entries.get(key) {
            return Some(*descriptor);
        }
        if self.enforce_aliases {
            return None;
        }
        let mut named = self.entries.values().filter(|d| d.name() == key);
        let found = *named.next()?;
        if named.any(|d| d.type_id() != found.type_id()) {
            tracing::debug!(key, "morph type name is ambiguous");
            return None;
        }
        tracing::debug!(key, "morph key resolved by canonical type name");
        Some(found)
    }
}

/// Cloneable handle over a process-wide [`MorphMap`].
///
/// Clones share the same map. Lookups take a read lock; registration takes
/// a write lock. A poisoned lock is recovered and the map stays usable,
/// holding whatever the panicking writer had applied; a `merge` that
/// panics partway leaves the map partly merged.
#[derive(Debug, Clone, Default)]
pub struct SharedMorphMap {
    inner: Arc<RwLock<MorphMap>>,
}

impl SharedMorphMap {
    /// Create a handle over an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle over an existing map.
    pub fn from_map(map: MorphMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Register `T` under `alias`. Returns the descriptor it replaced.
    pub fn register<T: FromPayload>(&self, alias: impl Into<String>) -> Option<TypeDescriptor> {
        self.write(|map| map.register::<T>(alias))
    }

    /// Register an explicit descriptor under `alias`.
    pub fn register_descriptor(
        &self,
        alias: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Option<TypeDescriptor> {
        self.write(|map| map.register_descriptor(alias, descriptor))
    }

    /// Merge `other` into the shared map. Entries from `other` win.
    pub fn merge(&self, other: &MorphMap) {
        self.write(|map| map.merge(other));
    }

    /// Replace the shared map's contents with `map`.
    pub fn replace(&self, map: MorphMap) -> MorphMap {
        self.write(|current| std::mem::replace(current, map))
    }

    /// Copy of the current map.
    pub fn snapshot(&self) -> MorphMap {
        self.read(MorphMap::clone)
    }

    /// Alias registered for a type named `type_name`.
    pub fn alias_of(&self, type_name: &str) -> Option<String> {
        self.read(|map| map.alias_of(type_name).map(str::to_owned))
    }

    /// The alias to write into a `_type` field for `instance`.
    pub fn alias_for(&self, instance: &dyn Morph) -> Option<String> {
        self.read(|map| map.alias_for(instance).map(str::to_owned))
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.read(MorphMap::len)
    }

    /// Whether no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.read(MorphMap::is_empty)
    }

    fn read<R>(&self, f: impl FnOnce(&MorphMap) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut MorphMap) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

impl From<MorphMap> for SharedMorphMap {
    fn from(map: MorphMap) -> Self {
        Self::from_map(map)
    }
}

impl TypeRegistry for SharedMorphMap {
    fn resolve(&self, key: &str) -> Option<TypeDescriptor> {
        self.read(|map| map.resolve(key))
    }
}
