//! ContainerData — the envelope the type key is read from.

use crate::payload::Payload;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Read-only view of the data surrounding a property.
///
/// Usually the full input of a data-transfer object: the type key for
/// property `P` is found under `P_type`. The caster only ever reads.
pub trait ContainerData: Send + Sync {
    /// The value stored under `field`, if any.
    fn get(&self, field: &str) -> Option<&Value>;
}

impl ContainerData for Payload {
    fn get(&self, field: &str) -> Option<&Value> {
        serde_json::Map::get(self, field)
    }
}

impl ContainerData for HashMap<String, Value> {
    fn get(&self, field: &str) -> Option<&Value> {
        HashMap::get(self, field)
    }
}

impl ContainerData for BTreeMap<String, Value> {
    fn get(&self, field: &str) -> Option<&Value> {
        BTreeMap::get(self, field)
    }
}

/// Objects expose their fields; every other value has none.
impl ContainerData for Value {
    fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|m| serde_json::Map::get(m, field))
    }
}

impl<C: ContainerData + ?Sized> ContainerData for &C {
    fn get(&self, field: &str) -> Option<&Value> {
        (**self).get(field)
    }
}
