use crate::types::EntityKind;

/// Domain errors raised on the client side before (or instead of) a
/// network round trip.
///
/// Message texts are matched by the presentation layer, so the fixed
/// phrases ("has not been persisted", "already enabled", "ID not present",
/// "Missing required property", "invalid object from server") are part of
/// the contract.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} has not been persisted")]
    NotPersisted { entity: EntityKind },

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{entity} ID not present: {id}")]
    ChildNotPresent { entity: &'static str, id: String },

    #[error("invalid {kind} state: {state}")]
    InvalidState { kind: EntityKind, state: String },

    #[error("Missing required property: {property} ({entity})")]
    MissingProperty {
        entity: EntityKind,
        property: &'static str,
    },

    #[error("invalid object from server: {entity}: {reason}")]
    InvalidObject { entity: EntityKind, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a rejected client-side state transition.
    pub fn transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition(message.into())
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
