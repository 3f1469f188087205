//! Studies and their lifecycle.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::annotation::AnnotationType;
use crate::entity::{require_child, ConcurrencySafeEntity, EntityMeta};
use crate::error::CoreError;
use crate::state::StudyState;
use crate::types::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    #[serde(flatten)]
    pub meta: EntityMeta,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: StudyState,
    #[serde(default)]
    pub annotation_types: Vec<AnnotationType>,
}

impl ConcurrencySafeEntity for Study {
    const KIND: EntityKind = EntityKind::Study;
    const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["id", "version", "timeAdded", "name", "state"];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

/// Study state transitions.
///
/// ```text
/// disabled --enable--> enabled --retire--> retired --unretire--> disabled
/// enabled --disable--> disabled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyAction {
    Enable,
    Disable,
    Retire,
    Unretire,
}

impl StudyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Retire => "retire",
            Self::Unretire => "unretire",
        }
    }

    /// The state a successful transition ends in.
    pub fn target(self) -> StudyState {
        match self {
            Self::Enable => StudyState::Enabled,
            Self::Disable | Self::Unretire => StudyState::Disabled,
            Self::Retire => StudyState::Retired,
        }
    }
}

impl Study {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            slug: String::new(),
            name: name.into(),
            description: None,
            state: StudyState::Disabled,
            annotation_types: Vec::new(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.state == StudyState::Disabled
    }

    pub fn is_enabled(&self) -> bool {
        self.state == StudyState::Enabled
    }

    pub fn is_retired(&self) -> bool {
        self.state == StudyState::Retired
    }

    pub fn annotation_type(&self, id: &str) -> Option<&AnnotationType> {
        self.annotation_types
            .iter()
            .find(|at| at.id.as_deref() == Some(id))
    }

    pub fn check_annotation_type_present(&self, id: &str) -> Result<(), CoreError> {
        require_child(self.annotation_type(id).is_some(), "annotation type", id)
    }

    /// Reject transitions that would leave the state unchanged. The server
    /// enforces the rest of the lifecycle.
    pub fn check_transition(&self, action: StudyAction) -> Result<(), CoreError> {
        use StudyAction::*;
        use StudyState::*;

        match (action, self.state) {
            (Enable, Enabled) => Err(CoreError::transition("already enabled")),
            (Disable, Disabled) => Err(CoreError::transition("already disabled")),
            (Retire, Retired) => Err(CoreError::transition("already retired")),
            (Unretire, Disabled | Enabled) => Err(CoreError::transition("not retired")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStudy {
    #[validate(length(min = 2, max = 255, message = "name must be 2 to 255 characters"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
