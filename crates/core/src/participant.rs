//! Study participants.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::annotation::Annotation;
use crate::entity::{ConcurrencySafeEntity, EntityMeta};
use crate::types::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub study_id: EntityId,
    #[serde(default)]
    pub slug: String,
    pub unique_id: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ConcurrencySafeEntity for Participant {
    const KIND: EntityKind = EntityKind::Participant;
    const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["id", "version", "timeAdded", "studyId", "uniqueId"];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

impl Participant {
    pub fn annotation(&self, annotation_type_id: &str) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|a| a.annotation_type_id == annotation_type_id)
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    #[validate(length(min = 1, max = 100, message = "unique id must be 1 to 100 characters"))]
    pub unique_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}
