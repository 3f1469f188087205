//! Validation of server representations.
//!
//! Every reply is checked against the entity's required-property set before
//! it is deserialized. This runs on every response, not just initial fetches.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::EntityKind;

/// Check that `value` is an object carrying every property in `required`.
///
/// A property that is present but `null` counts as missing.
pub fn validate(kind: EntityKind, value: &Value, required: &[&'static str]) -> Result<(), CoreError> {
    let Some(object) = value.as_object() else {
        return Err(CoreError::InvalidObject {
            entity: kind,
            reason: "expected a JSON object".to_string(),
        });
    };

    for property in required {
        match object.get(*property) {
            Some(v) if !v.is_null() => {}
            _ => {
                return Err(CoreError::MissingProperty {
                    entity: kind,
                    property: *property,
                })
            }
        }
    }
    Ok(())
}

/// Validate `value` and deserialize it into `T`.
pub fn decode<T: DeserializeOwned>(
    kind: EntityKind,
    required: &[&'static str],
    value: Value,
) -> Result<T, CoreError> {
    validate(kind, &value, required)?;
    serde_json::from_value(value).map_err(|e| CoreError::InvalidObject {
        entity: kind,
        reason: e.to_string(),
    })
}
