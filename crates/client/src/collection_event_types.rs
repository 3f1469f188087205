//! Collection event type endpoints. Event types are scoped to a study.

use biobank_core::annotation::AnnotationType;
use biobank_core::collection_event_type::{
    CollectionEventType, CollectionSpecimenDescription, NewCollectionEventType,
};
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use serde_json::json;
use validator::Validate;

use crate::client::{to_body, BiobankClient};
use crate::error::ClientResult;

const BASE: &str = "/studies/cetypes";

pub struct CollectionEventTypeApi<'a> {
    client: &'a BiobankClient,
}

impl<'a> CollectionEventTypeApi<'a> {
    pub(crate) fn new(client: &'a BiobankClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, study_id: &str, id: &str) -> ClientResult<CollectionEventType> {
        self.client.fetch(format!("{BASE}/{study_id}/{id}")).await
    }

    /// All event types of a study.
    pub async fn list(&self, study_id: &str) -> ClientResult<Vec<CollectionEventType>> {
        self.client.fetch_all(format!("{BASE}/{study_id}")).await
    }

    pub async fn add(
        &self,
        study_id: &str,
        event_type: &NewCollectionEventType,
    ) -> ClientResult<CollectionEventType> {
        event_type.validate().map_err(CoreError::from)?;
        self.client
            .create(format!("{BASE}/{study_id}"), to_body(event_type)?)
            .await
    }

    pub async fn update_name(
        &self,
        event_type: &CollectionEventType,
        name: &str,
    ) -> ClientResult<CollectionEventType> {
        self.client
            .update(
                &format!("{BASE}/name"),
                event_type,
                json!({ "studyId": event_type.study_id, "name": name }),
            )
            .await
    }

    pub async fn update_description(
        &self,
        event_type: &CollectionEventType,
        description: Option<&str>,
    ) -> ClientResult<CollectionEventType> {
        self.client
            .update(
                &format!("{BASE}/description"),
                event_type,
                json!({ "studyId": event_type.study_id, "description": description }),
            )
            .await
    }

    pub async fn update_recurring(
        &self,
        event_type: &CollectionEventType,
        recurring: bool,
    ) -> ClientResult<CollectionEventType> {
        self.client
            .update(
                &format!("{BASE}/recurring"),
                event_type,
                json!({ "studyId": event_type.study_id, "recurring": recurring }),
            )
            .await
    }

    pub async fn add_annotation_type(
        &self,
        event_type: &CollectionEventType,
        annotation_type: &AnnotationType,
    ) -> ClientResult<CollectionEventType> {
        event_type.persisted_id()?;
        annotation_type.validate()?;
        self.client
            .update(
                &format!("{BASE}/annottype"),
                event_type,
                to_body(annotation_type)?,
            )
            .await
    }

    pub async fn remove_annotation_type(
        &self,
        event_type: &CollectionEventType,
        annotation_type_id: &str,
    ) -> ClientResult<CollectionEventType> {
        event_type.persisted_id()?;
        event_type.check_annotation_type_present(annotation_type_id)?;
        self.client
            .remove_child(&format!("{BASE}/annottype"), event_type, annotation_type_id)
            .await
    }

    pub async fn add_specimen_description(
        &self,
        event_type: &CollectionEventType,
        description: &CollectionSpecimenDescription,
    ) -> ClientResult<CollectionEventType> {
        event_type.persisted_id()?;
        description.validate().map_err(CoreError::from)?;
        self.client
            .update(&format!("{BASE}/spcdesc"), event_type, to_body(description)?)
            .await
    }

    pub async fn remove_specimen_description(
        &self,
        event_type: &CollectionEventType,
        description_id: &str,
    ) -> ClientResult<CollectionEventType> {
        event_type.persisted_id()?;
        event_type.check_specimen_description_present(description_id)?;
        self.client
            .remove_child(&format!("{BASE}/spcdesc"), event_type, description_id)
            .await
    }

    /// `DELETE /studies/cetypes/<studyId>/<id>/<version>`.
    pub async fn remove(&self, event_type: &CollectionEventType) -> ClientResult<()> {
        let id = event_type.persisted_id()?;
        let path = format!(
            "{BASE}/{}/{id}/{}",
            event_type.study_id,
            event_type.version()
        );
        self.client.remove_at(path, event_type).await
    }
}
