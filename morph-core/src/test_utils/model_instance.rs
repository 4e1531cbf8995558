//! ModelInstance — accepts any attributes and externalizes them unchanged.

use crate::morph::{FromPayload, Morph};
use crate::payload::Payload;
use std::convert::Infallible;

/// A record type that stores whatever attributes it is given.
///
/// `to_payload` returns the attributes in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInstance {
    attributes: Payload,
}

impl ModelInstance {
    /// Borrow the stored attributes.
    pub fn attributes(&self) -> &Payload {
        &self.attributes
    }
}

impl Morph for ModelInstance {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn to_payload(&self) -> Payload {
        self.attributes.clone()
    }
}

impl FromPayload for ModelInstance {
    const TYPE_NAME: &'static str = "ModelInstance";
    type Error = Infallible;

    fn from_payload(payload: Payload) -> Result<Self, Infallible> {
        Ok(Self {
            attributes: payload,
        })
    }
}
