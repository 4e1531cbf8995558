//! SensitiveFields — payload keys stripped before construction.

use morph_core::Payload;
use std::collections::BTreeSet;
use std::fmt;

/// Field names excluded from every constructed instance.
///
/// Fixed once built. Names that do not occur in a payload are ignored.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SensitiveFields {
    names: BTreeSet<String>,
}

impl SensitiveFields {
    /// An empty set: payloads pass through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `field` is sensitive.
    pub fn contains(&self, field: &str) -> bool {
        self.names.contains(field)
    }

    /// Whether no field is sensitive.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of sensitive names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Sensitive names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// A copy of `payload` without sensitive keys. Order of the remaining
    /// keys is kept; `payload` itself is not touched.
    pub fn filter(&self, payload: &Payload) -> Payload {
        payload
            .iter()
            .filter(|(key, _)| !self.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SensitiveFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Debug for SensitiveFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.names).finish()
    }
}
