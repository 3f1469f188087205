//! Participant endpoints. Participants are scoped to a study.

use biobank_core::annotation::{Annotation, AnnotationType};
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::participant::{NewParticipant, Participant};
use serde_json::json;
use validator::Validate;

use crate::client::{to_body, BiobankClient};
use crate::error::ClientResult;

const BASE: &str = "/participants";

pub struct ParticipantApi<'a> {
    client: &'a BiobankClient,
}

impl<'a> ParticipantApi<'a> {
    pub(crate) fn new(client: &'a BiobankClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, study_id: &str, id: &str) -> ClientResult<Participant> {
        self.client.fetch(format!("{BASE}/{study_id}/{id}")).await
    }

    pub async fn get_by_unique_id(
        &self,
        study_id: &str,
        unique_id: &str,
    ) -> ClientResult<Participant> {
        self.client
            .fetch(format!("{BASE}/uniqueId/{study_id}/{unique_id}"))
            .await
    }

    pub async fn add(
        &self,
        study_id: &str,
        participant: &NewParticipant,
    ) -> ClientResult<Participant> {
        participant.validate().map_err(CoreError::from)?;
        self.client
            .create(format!("{BASE}/{study_id}"), to_body(participant)?)
            .await
    }

    pub async fn update_unique_id(
        &self,
        participant: &Participant,
        unique_id: &str,
    ) -> ClientResult<Participant> {
        self.client
            .update(
                &format!("{BASE}/uniqueId"),
                participant,
                json!({ "uniqueId": unique_id }),
            )
            .await
    }

    /// Record (or replace) the value for one annotation type.
    pub async fn add_annotation(
        &self,
        participant: &Participant,
        annotation_type: &AnnotationType,
        annotation: &Annotation,
    ) -> ClientResult<Participant> {
        participant.persisted_id()?;
        annotation.validate_against(annotation_type)?;
        self.client
            .update(&format!("{BASE}/annot"), participant, to_body(annotation)?)
            .await
    }
}
