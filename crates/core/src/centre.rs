//! Centres: the sites that hold specimens.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{require_child, ConcurrencySafeEntity, EntityInfo, EntityMeta};
use crate::error::CoreError;
use crate::state::CentreState;
use crate::types::{EntityId, EntityKind};

/// A physical location belonging to a centre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub slug: String,
    #[validate(length(min = 1, message = "location name is required"))]
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub po_box_number: Option<String>,
    #[serde(default)]
    pub country_iso_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centre {
    #[serde(flatten)]
    pub meta: EntityMeta,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: CentreState,
    #[serde(default)]
    pub study_names: Vec<EntityInfo>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl ConcurrencySafeEntity for Centre {
    const KIND: EntityKind = EntityKind::Centre;
    const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["id", "version", "timeAdded", "name", "state", "studyNames"];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

/// Client-side centre state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentreAction {
    Enable,
    Disable,
}

impl CentreAction {
    /// Path segment of the transition endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

impl Centre {
    /// A new, unpersisted centre.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            slug: String::new(),
            name: name.into(),
            description: None,
            state: CentreState::Disabled,
            study_names: Vec::new(),
            locations: Vec::new(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.state == CentreState::Disabled
    }

    pub fn is_enabled(&self) -> bool {
        self.state == CentreState::Enabled
    }

    pub fn has_study(&self, study_id: &str) -> bool {
        self.study_names.iter().any(|s| s.id == study_id)
    }

    pub fn has_location(&self, location_id: &str) -> bool {
        self.locations
            .iter()
            .any(|l| l.id.as_deref() == Some(location_id))
    }

    /// Reject no-op transitions before a request is issued.
    pub fn check_transition(&self, action: CentreAction) -> Result<(), CoreError> {
        match (action, self.state) {
            (CentreAction::Enable, CentreState::Enabled) => {
                Err(CoreError::transition("already enabled"))
            }
            (CentreAction::Disable, CentreState::Disabled) => {
                Err(CoreError::transition("already disabled"))
            }
            _ => Ok(()),
        }
    }

    pub fn check_study_present(&self, study_id: &str) -> Result<(), CoreError> {
        require_child(self.has_study(study_id), "study", study_id)
    }

    pub fn check_location_present(&self, location_id: &str) -> Result<(), CoreError> {
        require_child(self.has_location(location_id), "location", location_id)
    }
}

/// DTO for creating a centre.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCentre {
    #[validate(length(min = 2, max = 255, message = "name must be 2 to 255 characters"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
