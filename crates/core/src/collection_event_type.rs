//! Collection event types: the kinds of visit at which a study collects
//! specimens.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::annotation::AnnotationType;
use crate::entity::{require_child, ConcurrencySafeEntity, EntityMeta};
use crate::error::CoreError;
use crate::types::{EntityId, EntityKind};

/// A specimen expected to be collected at an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSpecimenDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub slug: String,
    #[validate(length(min = 1, message = "specimen description name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub units: String,
    pub anatomical_source_type: String,
    pub preservation_type: String,
    pub preservation_temperature: String,
    pub specimen_type: String,
    #[validate(range(min = 1, message = "max count must be at least 1"))]
    pub max_count: u32,
    #[validate(range(exclusive_min = 0.0, message = "amount must be positive"))]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEventType {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub study_id: EntityId,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub recurring: bool,
    #[serde(default)]
    pub specimen_descriptions: Vec<CollectionSpecimenDescription>,
    #[serde(default)]
    pub annotation_types: Vec<AnnotationType>,
}

impl ConcurrencySafeEntity for CollectionEventType {
    const KIND: EntityKind = EntityKind::CollectionEventType;
    const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["id", "version", "timeAdded", "studyId", "name", "recurring"];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

impl CollectionEventType {
    pub fn check_annotation_type_present(&self, id: &str) -> Result<(), CoreError> {
        let present = self
            .annotation_types
            .iter()
            .any(|at| at.id.as_deref() == Some(id));
        require_child(present, "annotation type", id)
    }

    pub fn check_specimen_description_present(&self, id: &str) -> Result<(), CoreError> {
        let present = self
            .specimen_descriptions
            .iter()
            .any(|sd| sd.id.as_deref() == Some(id));
        require_child(present, "specimen description", id)
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCollectionEventType {
    #[validate(length(min = 2, max = 255, message = "name must be 2 to 255 characters"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub recurring: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_type() -> CollectionEventType {
        CollectionEventType::from_server(json!({
            "id": "cet1",
            "version": 1,
            "timeAdded": "2024-01-01T00:00:00Z",
            "studyId": "s1",
            "name": "Visit",
            "recurring": true,
            "annotationTypes": [{"id": "at1", "name": "Weight", "valueType": "number"}],
            "specimenDescriptions": [{
                "id": "sd1",
                "name": "Blood",
                "units": "mL",
                "anatomicalSourceType": "blood",
                "preservationType": "frozen",
                "preservationTemperature": "-80 C",
                "specimenType": "plasma",
                "maxCount": 2,
                "amount": 0.5
            }]
        }))
        .unwrap()
    }

    #[test]
    fn decodes_children() {
        let cet = event_type();
        assert!(cet.recurring);
        assert!(cet.check_annotation_type_present("at1").is_ok());
        assert!(cet.check_specimen_description_present("sd1").is_ok());
    }

    #[test]
    fn absent_children_rejected() {
        let cet = event_type();
        assert!(cet.check_annotation_type_present("x").is_err());
        let err = cet.check_specimen_description_present("y").unwrap_err();
        assert!(err.to_string().contains("ID not present"));
    }

    #[test]
    fn missing_recurring_rejected() {
        let err = CollectionEventType::from_server(json!({
            "id": "cet1",
            "version": 1,
            "timeAdded": "2024-01-01T00:00:00Z",
            "studyId": "s1",
            "name": "Visit"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Missing required property: recurring"));
    }

    #[test]
    fn specimen_description_amount_must_be_positive() {
        let mut sd = event_type().specimen_descriptions.remove(0);
        sd.amount = 0.0;
        assert!(sd.validate().is_err());
    }
}
