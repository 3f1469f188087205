//! Optimistic-concurrency bookkeeping shared by every mutable entity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::schema;
use crate::types::{EntityId, EntityKind, Timestamp};

/// Identity, version and timestamps of a versioned entity.
///
/// A locally constructed entity has `id == None` and `version == 0`. The
/// server increments `version` on every successful mutation; the client only
/// ever echoes the version it last observed as `expectedVersion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub time_added: Option<Timestamp>,
    #[serde(default)]
    pub time_modified: Option<Timestamp>,
}

/// Implemented by every entity whose mutations go through the
/// expected-version protocol.
pub trait ConcurrencySafeEntity: DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    /// Properties the server representation must carry. Checked on every
    /// reply before the entity is constructed.
    const REQUIRED_PROPERTIES: &'static [&'static str];

    fn meta(&self) -> &EntityMeta;

    fn id(&self) -> Option<&str> {
        self.meta().id.as_deref()
    }

    fn version(&self) -> u64 {
        self.meta().version
    }

    /// `true` until the server has assigned an id.
    fn is_new(&self) -> bool {
        self.meta().id.is_none()
    }

    /// The server id, or [`CoreError::NotPersisted`] for a local-only entity.
    fn persisted_id(&self) -> Result<&str, CoreError> {
        self.id().ok_or(CoreError::NotPersisted { entity: Self::KIND })
    }

    /// Validate a server reply and build the entity from it.
    fn from_server(value: Value) -> Result<Self, CoreError> {
        schema::decode(Self::KIND, Self::REQUIRED_PROPERTIES, value)
    }
}

/// Id/name pair used wherever an entity references another by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub id: EntityId,
    pub name: String,
}

/// A set of referenced entities, or "all of them".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySet {
    #[serde(default)]
    pub all_entities: bool,
    #[serde(default)]
    pub entity_data: Vec<EntityInfo>,
}

impl EntitySet {
    pub fn contains(&self, id: &str) -> bool {
        self.entity_data.iter().any(|info| info.id == id)
    }
}

/// Fail with [`CoreError::ChildNotPresent`] unless `present` holds.
pub(crate) fn require_child(present: bool, entity: &'static str, id: &str) -> Result<(), CoreError> {
    if present {
        Ok(())
    } else {
        Err(CoreError::ChildNotPresent {
            entity,
            id: id.to_string(),
        })
    }
}
