//! MorphCaster — resolve, filter, construct.

use crate::config::{ConfigError, MorphCastConfig};
use crate::sensitive::SensitiveFields;
use morph_core::{
    CastError, ContainerData, Morph, Payload, TypeDescriptor, TypeRegistry, payload_from_value,
    type_key_field,
};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Casts a raw property value to the type named by its `_type` sibling.
///
/// The registry is injected and only ever read. The sensitive field set is
/// fixed at construction and applied to every cast.
#[derive(Clone)]
pub struct MorphCaster {
    registry: Arc<dyn TypeRegistry>,
    sensitive: SensitiveFields,
}

impl MorphCaster {
    /// Create a caster with no sensitive fields.
    pub fn new(registry: Arc<dyn TypeRegistry>) -> Self {
        Self {
            registry,
            sensitive: SensitiveFields::new(),
        }
    }

    /// Create a caster from static configuration.
    pub fn from_config(
        registry: Arc<dyn TypeRegistry>,
        config: &MorphCastConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry,
            sensitive: config.sensitive_fields(),
        })
    }

    /// Set the fields stripped from every payload. Replaces any previous set.
    pub fn with_sensitive_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive = fields.into_iter().collect();
        self
    }

    /// The configured sensitive fields.
    pub fn sensitive_fields(&self) -> &SensitiveFields {
        &self.sensitive
    }

    /// Resolve the concrete type for `property` without constructing it.
    ///
    /// Reads `{property}_type` from `container` and looks the key up in the
    /// registry. A `null` key counts as missing. A non-string key is looked
    /// up by its JSON text.
    pub fn resolve(
        &self,
        container: &dyn ContainerData,
        property: &str,
    ) -> Result<TypeDescriptor, CastError> {
        let field = type_key_field(property);
        let key = match container.get(&field) {
            None | Some(Value::Null) => {
                tracing::debug!(property, field = %field, "morph type key missing");
                return Err(CastError::MissingTypeKey(field));
            }
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        };

        match self.registry.resolve(&key) {
            Some(descriptor) => Ok(descriptor),
            None => {
                tracing::debug!(property, key = %key, "morph type key unresolved");
                Err(CastError::UnresolvedType(key.into_owned()))
            }
        }
    }

    /// Cast `value` for `property`.
    ///
    /// An absent payload is treated as empty. Sensitive keys are removed
    /// from a copy; `value` is never modified. A construction error from
    /// the resolved type is returned as [`CastError::Construct`] untouched.
    pub fn cast(
        &self,
        container: &dyn ContainerData,
        property: &str,
        value: Option<&Payload>,
    ) -> Result<Box<dyn Morph>, CastError> {
        let descriptor = self.resolve(container, property)?;
        let payload = match value {
            Some(payload) => self.prepare(property, payload),
            None => Payload::new(),
        };
        self.construct(property, descriptor, payload)
    }

    /// Cast an untyped JSON value for `property`.
    ///
    /// Empty values (`null`, `false`, `0`, `""`, `[]`, `{}`) become an
    /// empty payload. Any other non-object fails with
    /// [`CastError::InvalidPayload`], after the type key has been resolved.
    pub fn cast_value(
        &self,
        container: &dyn ContainerData,
        property: &str,
        value: &Value,
    ) -> Result<Box<dyn Morph>, CastError> {
        let descriptor = self.resolve(container, property)?;
        let raw = payload_from_value(property, value)?;
        let payload = self.prepare(property, &raw);
        self.construct(property, descriptor, payload)
    }

    fn prepare(&self, property: &str, payload: &Payload) -> Payload {
        if self.sensitive.is_empty() {
            return payload.clone();
        }
        let filtered = self.sensitive.filter(payload);
        let removed = payload.len() - filtered.len();
        if removed > 0 {
            tracing::debug!(property, removed, "sensitive fields stripped");
        }
        filtered
    }

    fn construct(
        &self,
        property: &str,
        descriptor: TypeDescriptor,
        payload: Payload,
    ) -> Result<Box<dyn Morph>, CastError> {
        let fields = payload.len();
        match descriptor.construct(payload) {
            Ok(instance) => {
                tracing::debug!(property, type_name = descriptor.name(), fields, "morph cast");
                Ok(instance)
            }
            Err(e) => {
                tracing::debug!(
                    property,
                    type_name = descriptor.name(),
                    "morph construction failed"
                );
                Err(CastError::Construct(e))
            }
        }
    }
}

impl fmt::Debug for MorphCaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MorphCaster")
            .field("sensitive", &self.sensitive)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::test_utils::{FixedRegistry, ModelInstance, StrictModel, StrictModelError};
    use serde_json::json;

    fn registry() -> Arc<dyn TypeRegistry> {
        Arc::new(
            FixedRegistry::new()
                .with::<ModelInstance>("model_instance")
                .with::<StrictModel>("strict_model")
                .with::<ModelInstance>("7"),
        )
    }

    fn payload(v: Value) -> Payload {
        v.as_object().cloned().unwrap()
    }

    fn as_json(instance: &dyn Morph) -> Value {
        Value::Object(instance.to_payload())
    }

    #[test]
    fn resolve_reads_suffixed_field() {
        let caster = MorphCaster::new(registry());
        let dto = json!({"test_property_type": "model_instance"});
        let d = caster.resolve(&dto, "test_property").unwrap();
        assert_eq!(d.name(), "ModelInstance");
    }

    #[test]
    fn null_type_key_is_missing() {
        let caster = MorphCaster::new(registry());
        let dto = json!({"test_property_type": null});
        let err = caster.cast(&dto, "test_property", None).unwrap_err();
        assert!(matches!(err, CastError::MissingTypeKey(ref f) if f == "test_property_type"));
    }

    #[test]
    fn non_string_type_key_uses_json_text() {
        let caster = MorphCaster::new(registry());
        let dto = json!({"p_type": 7});
        assert!(caster.cast(&dto, "p", None).is_ok());

        let dto = json!({"p_type": true});
        let err = caster.cast(&dto, "p", None).unwrap_err();
        assert!(matches!(err, CastError::UnresolvedType(ref k) if k == "true"));
    }

    #[test]
    fn missing_key_checked_before_payload() {
        let caster = MorphCaster::new(registry());
        let err = caster
            .cast_value(&json!({}), "p", &json!("not a map"))
            .unwrap_err();
        assert!(matches!(err, CastError::MissingTypeKey(_)));
    }

    #[test]
    fn invalid_payload_after_resolution() {
        let caster = MorphCaster::new(registry());
        let dto = json!({"p_type": "model_instance"});
        let err = caster.cast_value(&dto, "p", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, CastError::InvalidPayload { kind: "array", .. }));
    }

    #[test]
    fn cast_value_empty_forms() {
        let caster = MorphCaster::new(registry()).with_sensitive_fields(["password"]);
        let dto = json!({"p_type": "model_instance"});
        for raw in [json!(null), json!(""), json!([]), json!({}), json!(false), json!(0)] {
            let instance = caster.cast_value(&dto, "p", &raw).unwrap();
            assert_eq!(as_json(instance.as_ref()), json!({}));
        }
    }

    #[test]
    fn construction_error_is_passed_through() {
        let caster = MorphCaster::new(registry());
        let dto = json!({"p_type": "strict_model"});
        let err = caster
            .cast(&dto, "p", Some(&payload(json!({"age": 4}))))
            .unwrap_err();
        assert!(!err.is_resolution());
        let inner = err.construct_error().unwrap();
        assert!(inner.downcast_ref::<StrictModelError>().is_some());
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn filtering_can_cause_construction_error() {
        let caster = MorphCaster::new(registry()).with_sensitive_fields(["name"]);
        let dto = json!({"p_type": "strict_model"});
        let err = caster
            .cast(&dto, "p", Some(&payload(json!({"name": "Ada"}))))
            .unwrap_err();
        assert!(matches!(err, CastError::Construct(_)));
    }

    #[test]
    fn input_payload_is_not_modified() {
        let caster = MorphCaster::new(registry()).with_sensitive_fields(["password"]);
        let dto = json!({"p_type": "model_instance"});
        let input = payload(json!({"name": "Jane", "password": "x"}));
        let instance = caster.cast(&dto, "p", Some(&input)).unwrap();
        assert_eq!(as_json(instance.as_ref()), json!({"name": "Jane"}));
        assert_eq!(Value::Object(input), json!({"name": "Jane", "password": "x"}));
    }

    #[test]
    fn from_config_uses_sensitive_fields() {
        let config = MorphCastConfig {
            sensitive_fields: vec!["secret_token".into()],
        };
        let caster = MorphCaster::from_config(registry(), &config).unwrap();
        assert!(caster.sensitive_fields().contains("secret_token"));

        let bad = MorphCastConfig {
            sensitive_fields: vec![String::new()],
        };
        assert!(MorphCaster::from_config(registry(), &bad).is_err());
    }

    #[test]
    fn debug_hides_registry() {
        let caster = MorphCaster::new(registry()).with_sensitive_fields(["password"]);
        assert_eq!(
            format!("{caster:?}"),
            r#"MorphCaster { sensitive: {"password"}, .. }"#
        );
    }

    fn _assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn caster_is_send_sync() {
        _assert_send_sync::<MorphCaster>();
    }
}
