//! Caster configuration.

use crate::sensitive::SensitiveFields;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a [`MorphCastConfig`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid morph cast config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A sensitive field name is empty.
    #[error("sensitive field names must not be empty")]
    EmptyFieldName,
}

/// Static configuration of a [`MorphCaster`](crate::MorphCaster).
///
/// ```json
/// { "sensitive_fields": ["password", "secret_token"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorphCastConfig {
    /// Payload keys removed before construction.
    pub sensitive_fields: Vec<String>,
}

impl MorphCastConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty field names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensitive_fields.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyFieldName);
        }
        Ok(())
    }

    /// The configured fields as a set.
    pub fn sensitive_fields(&self) -> SensitiveFields {
        self.sensitive_fields.iter().cloned().collect()
    }
}
