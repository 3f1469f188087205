//! Access memberships: which users may see which studies and centres.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{require_child, ConcurrencySafeEntity, EntityInfo, EntityMeta, EntitySet};
use crate::error::CoreError;
use crate::types::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(flatten)]
    pub meta: EntityMeta,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_data: Vec<EntityInfo>,
    pub study_data: EntitySet,
    pub centre_data: EntitySet,
}

impl ConcurrencySafeEntity for Membership {
    const KIND: EntityKind = EntityKind::Membership;
    const REQUIRED_PROPERTIES: &'static [&'static str] = &[
        "id",
        "version",
        "timeAdded",
        "name",
        "userData",
        "studyData",
        "centreData",
    ];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

impl Membership {
    pub fn has_user(&self, user_id: &str) -> bool {
        self.user_data.iter().any(|u| u.id == user_id)
    }

    pub fn check_user_present(&self, user_id: &str) -> Result<(), CoreError> {
        require_child(self.has_user(user_id), "user", user_id)
    }

    pub fn check_study_present(&self, study_id: &str) -> Result<(), CoreError> {
        require_child(self.study_data.contains(study_id), "study", study_id)
    }

    pub fn check_centre_present(&self, centre_id: &str) -> Result<(), CoreError> {
        require_child(self.centre_data.contains(centre_id), "centre", centre_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMembership {
    #[validate(length(min = 2, max = 255, message = "name must be 2 to 255 characters"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_ids: Vec<EntityId>,
    pub all_studies: bool,
    pub study_ids: Vec<EntityId>,
    pub all_centres: bool,
    pub centre_ids: Vec<EntityId>,
}
