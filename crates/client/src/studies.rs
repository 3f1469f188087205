//! Study endpoints.

use biobank_core::annotation::AnnotationType;
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::paging::{EntityCounts, PagedResult, PagerOptions, QueryStyle};
use biobank_core::study::{NewStudy, Study, StudyAction};
use serde_json::{json, Value};
use validator::Validate;

use crate::client::{to_body, BiobankClient};
use crate::error::{ClientError, ClientResult};

const BASE: &str = "/studies";

pub struct StudyApi<'a> {
    client: &'a BiobankClient,
}

impl<'a> StudyApi<'a> {
    pub(crate) fn new(client: &'a BiobankClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> ClientResult<Study> {
        self.client.fetch(format!("{BASE}/{id}")).await
    }

    pub async fn list(&self, options: &PagerOptions) -> ClientResult<PagedResult<Study>> {
        self.client
            .fetch_page(format!("{BASE}/search"), options, QueryStyle::Standard)
            .await
    }

    pub async fn counts(&self) -> ClientResult<EntityCounts> {
        self.client.fetch_counts(format!("{BASE}/counts")).await
    }

    pub async fn add(&self, study: &NewStudy) -> ClientResult<Study> {
        study.validate().map_err(CoreError::from)?;
        self.client.create(format!("{BASE}/"), to_body(study)?).await
    }

    pub async fn update_name(&self, study: &Study, name: &str) -> ClientResult<Study> {
        self.client
            .update(&format!("{BASE}/name"), study, json!({ "name": name }))
            .await
    }

    pub async fn update_description(
        &self,
        study: &Study,
        description: Option<&str>,
    ) -> ClientResult<Study> {
        self.client
            .update(
                &format!("{BASE}/description"),
                study,
                json!({ "description": description }),
            )
            .await
    }

    pub async fn add_annotation_type(
        &self,
        study: &Study,
        annotation_type: &AnnotationType,
    ) -> ClientResult<Study> {
        study.persisted_id()?;
        annotation_type.validate()?;
        self.client
            .update(&format!("{BASE}/annottype"), study, to_body(annotation_type)?)
            .await
    }

    /// Replace an existing annotation type, identified by its own id.
    pub async fn update_annotation_type(
        &self,
        study: &Study,
        annotation_type: &AnnotationType,
    ) -> ClientResult<Study> {
        let id = study.persisted_id()?;
        let annotation_type_id = annotation_type.id.as_deref().ok_or_else(|| {
            ClientError::from(CoreError::Validation(
                "annotation type has not been persisted".to_string(),
            ))
        })?;
        study.check_annotation_type_present(annotation_type_id)?;
        annotation_type.validate()?;
        self.client
            .update_at(
                format!("{BASE}/annottype/{id}/{annotation_type_id}"),
                study,
                to_body(annotation_type)?,
            )
            .await
    }

    pub async fn remove_annotation_type(
        &self,
        study: &Study,
        annotation_type_id: &str,
    ) -> ClientResult<Study> {
        study.persisted_id()?;
        study.check_annotation_type_present(annotation_type_id)?;
        self.client
            .remove_child(&format!("{BASE}/annottype"), study, annotation_type_id)
            .await
    }

    pub async fn enable(&self, study: &Study) -> ClientResult<Study> {
        self.transition(study, StudyAction::Enable).await
    }

    pub async fn disable(&self, study: &Study) -> ClientResult<Study> {
        self.transition(study, StudyAction::Disable).await
    }

    pub async fn retire(&self, study: &Study) -> ClientResult<Study> {
        self.transition(study, StudyAction::Retire).await
    }

    pub async fn unretire(&self, study: &Study) -> ClientResult<Study> {
        self.transition(study, StudyAction::Unretire).await
    }

    /// `POST /studies/<action>/<id>` with `{expectedVersion}`.
    async fn transition(&self, study: &Study, action: StudyAction) -> ClientResult<Study> {
        study.persisted_id()?;
        study.check_transition(action)?;
        self.client
            .update(&format!("{BASE}/{}", action.as_str()), study, Value::Null)
            .await
    }
}
