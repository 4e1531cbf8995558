//! StrictModel — rejects payloads without a string `name`.

use crate::morph::{FromPayload, Morph};
use crate::payload::{self, Payload};
use serde::{Deserialize, Serialize};

/// A typed record whose constructor can fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrictModel {
    /// Required.
    pub name: String,
    /// Optional age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Construction error of [`StrictModel`].
#[derive(Debug, thiserror::Error)]
#[error("StrictModel rejected payload: {0}")]
pub struct StrictModelError(#[from] serde_json::Error);

impl Morph for StrictModel {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn to_payload(&self) -> Payload {
        payload::serialize(self)
    }
}

impl FromPayload for StrictModel {
    const TYPE_NAME: &'static str = "StrictModel";
    type Error = StrictModelError;

    fn from_payload(payload: Payload) -> Result<Self, StrictModelError> {
        Ok(payload::deserialize(payload)?)
    }
}
