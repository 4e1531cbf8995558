//! Error types for casting.

use thiserror::Error;

/// A type-erased error raised by a registered type's constructor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from a single cast call.
///
/// `MissingTypeKey` and `UnresolvedType` are raised by the caster itself.
/// `Construct` carries whatever the target type returned, untouched:
/// its `Display` and `source()` are the inner error's own.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CastError {
    /// The `{property}_type` field is absent from the container data.
    /// The string is the computed field name.
    #[error("missing morph type key [{0}] in DTO data")]
    MissingTypeKey(String),

    /// The symbolic key has no entry in the type registry.
    /// The string is the key as read from the container data.
    #[error("invalid morph type [{0}]")]
    UnresolvedType(String),

    /// The raw value is neither empty nor a mapping.
    #[error("invalid payload for {property}: expected an object, got {kind}")]
    InvalidPayload {
        /// Property being cast.
        property: String,
        /// JSON kind of the rejected value.
        kind: &'static str,
    },

    /// The resolved type rejected the payload.
    #[error(transparent)]
    Construct(BoxError),
}

impl CastError {
    /// Whether the failure came from the caster (as opposed to the target type).
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            CastError::MissingTypeKey(_) | CastError::UnresolvedType(_)
        )
    }

    /// Borrow the target type's own error, if construction failed.
    pub fn construct_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            CastError::Construct(e) => Some(&**e),
            _ => None,
        }
    }
}
