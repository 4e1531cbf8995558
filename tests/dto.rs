//! End-to-end: a data-transfer object casting polymorphic properties.
//!
//! Demonstrates the full flow through the umbrella crate:
//!
//! 1. **Startup** — the host populates one shared morph map
//! 2. **Injection** — casters receive the map as a `TypeRegistry`
//! 3. **Casting** — several properties of one DTO resolve to different types
//! 4. **Write-back** — the alias for an instance is recovered for output

use morphcast::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Host types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Serialize, Deserialize)]
struct User {
    name: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Team {
    title: String,
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("cannot build {type_name}: {source}")]
struct HostModelError {
    type_name: &'static str,
    #[source]
    source: serde_json::Error,
}

macro_rules! host_model {
    ($ty:ident) => {
        impl Morph for $ty {
            fn type_name(&self) -> &'static str {
                <Self as FromPayload>::TYPE_NAME
            }

            fn to_payload(&self) -> Payload {
                morphcast::morph_core::payload::serialize(self)
            }
        }

        impl FromPayload for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);
            type Error = HostModelError;

            fn from_payload(payload: Payload) -> Result<Self, HostModelError> {
                morphcast::morph_core::payload::deserialize(payload).map_err(|source| {
                    HostModelError {
                        type_name: stringify!($ty),
                        source,
                    }
                })
            }
        }
    };
}

host_model!(User);
host_model!(Team);

fn startup() -> SharedMorphMap {
    let shared = SharedMorphMap::new();
    shared.merge(&MorphMap::new().with::<User>("user").with::<Team>("team"));
    shared
}

fn caster(registry: &SharedMorphMap) -> MorphCaster {
    MorphCaster::from_config(
        Arc::new(registry.clone()),
        &MorphCastConfig::from_json(r#"{"sensitive_fields": ["password"]}"#).unwrap(),
    )
    .unwrap()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn dto_with_two_polymorphic_properties() {
    let registry = startup();
    let caster = caster(&registry);

    let dto = json!({
        "owner_type": "user",
        "owner": {"name": "Jane Doe", "email": "jane@example.com", "password": "hunter2"},
        "assignee_type": "team",
        "assignee": {"title": "Platform", "members": ["jane"]},
    });

    let owner = caster.cast_value(&dto, "owner", &dto["owner"]).unwrap();
    let assignee = caster.cast_value(&dto, "assignee", &dto["assignee"]).unwrap();

    let user = owner.downcast_ref::<User>().unwrap();
    assert_eq!(user.email, "jane@example.com");
    assert_eq!(
        Value::Object(owner.to_payload()),
        json!({"name": "Jane Doe", "email": "jane@example.com"})
    );

    let team = assignee.downcast::<Team>().unwrap();
    assert_eq!(team.members, ["jane"]);
}

#[test]
fn canonical_type_name_in_type_field() {
    let registry = startup();
    let caster = caster(&registry);
    let dto = json!({"owner_type": "User"});
    let owner = caster
        .cast_value(&dto, "owner", &json!({"name": "A", "email": "a@b"}))
        .unwrap();
    assert!(owner.is::<User>());
}

#[test]
fn host_construction_error_reaches_the_caller_unwrapped() {
    let registry = startup();
    let caster = caster(&registry);
    let dto = json!({"owner_type": "user"});

    // "email" is required by User.
    let err = caster
        .cast_value(&dto, "owner", &json!({"name": "Jane Doe"}))
        .unwrap_err();
    let inner = err.construct_error().unwrap();
    let host = inner.downcast_ref::<HostModelError>().unwrap();
    assert_eq!(host.type_name, "User");
    assert!(err.to_string().starts_with("cannot build User"));
}

#[test]
fn registrations_after_injection_are_visible() {
    let registry = SharedMorphMap::new();
    let caster = caster(&registry);
    let dto = json!({"owner_type": "user"});

    assert!(matches!(
        caster.cast(&dto, "owner", None),
        Err(CastError::UnresolvedType(_))
    ));

    registry.register::<User>("user");
    let err = caster.cast(&dto, "owner", None).unwrap_err();
    // Resolved now; the empty payload is rejected by User itself.
    assert!(matches!(err, CastError::Construct(_)));
}

#[test]
fn alias_written_back_for_output() {
    let registry = startup();
    let caster = caster(&registry);
    let dto = json!({"owner_type": "user"});
    let owner = caster
        .cast_value(&dto, "owner", &json!({"name": "A", "email": "a@b"}))
        .unwrap();

    let alias = registry.alias_for(owner.as_ref()).unwrap();
    let mut out = Payload::new();
    out.insert(format!("owner{TYPE_KEY_SUFFIX}"), json!(alias));
    out.insert("owner".into(), Value::Object(owner.to_payload()));

    assert_eq!(
        Value::Object(out),
        json!({"owner_type": "user", "owner": {"name": "A", "email": "a@b"}})
    );
}

#[test]
fn filtering_twice_is_filtering_once() {
    let fields: SensitiveFields = ["password", "secret_token"].into_iter().collect();
    let payload = json!({
        "name": "Jane Doe",
        "age": 25,
        "password": "secret123",
        "secret_token": "abc123",
        "public_data": "visible",
    })
    .as_object()
    .cloned()
    .unwrap();

    let once = fields.filter(&payload);
    assert_eq!(fields.filter(&once), once);
    assert_eq!(
        Value::Object(once),
        json!({"name": "Jane Doe", "age": 25, "public_data": "visible"})
    );
}
