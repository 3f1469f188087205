//! Centre endpoints.

use biobank_core::centre::{Centre, CentreAction, Location, NewCentre};
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::paging::{EntityCounts, PagedResult, PagerOptions, QueryStyle};
use serde_json::{json, Value};
use validator::Validate;

use crate::client::{to_body, BiobankClient};
use crate::error::ClientResult;

const BASE: &str = "/centres";

pub struct CentreApi<'a> {
    client: &'a BiobankClient,
}

impl<'a> CentreApi<'a> {
    pub(crate) fn new(client: &'a BiobankClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> ClientResult<Centre> {
        self.client.fetch(format!("{BASE}/{id}")).await
    }

    pub async fn list(&self, options: &PagerOptions) -> ClientResult<PagedResult<Centre>> {
        self.client
            .fetch_page(format!("{BASE}/search"), options, QueryStyle::Standard)
            .await
    }

    /// Unfiltered totals, overall and per state.
    pub async fn counts(&self) -> ClientResult<EntityCounts> {
        self.client.fetch_counts(format!("{BASE}/counts")).await
    }

    pub async fn add(&self, centre: &NewCentre) -> ClientResult<Centre> {
        centre.validate().map_err(CoreError::from)?;
        self.client.create(format!("{BASE}/"), to_body(centre)?).await
    }

    pub async fn update_name(&self, centre: &Centre, name: &str) -> ClientResult<Centre> {
        self.client
            .update(&format!("{BASE}/name"), centre, json!({ "name": name }))
            .await
    }

    pub async fn update_description(
        &self,
        centre: &Centre,
        description: Option<&str>,
    ) -> ClientResult<Centre> {
        self.client
            .update(
                &format!("{BASE}/description"),
                centre,
                json!({ "description": description }),
            )
            .await
    }

    pub async fn add_study(&self, centre: &Centre, study_id: &str) -> ClientResult<Centre> {
        self.client
            .update(&format!("{BASE}/studies"), centre, json!({ "studyId": study_id }))
            .await
    }

    pub async fn remove_study(&self, centre: &Centre, study_id: &str) -> ClientResult<Centre> {
        centre.persisted_id()?;
        centre.check_study_present(study_id)?;
        self.client
            .remove_child(&format!("{BASE}/studies"), centre, study_id)
            .await
    }

    pub async fn add_location(&self, centre: &Centre, location: &Location) -> ClientResult<Centre> {
        location.validate().map_err(CoreError::from)?;
        self.client
            .update(&format!("{BASE}/locations"), centre, to_body(location)?)
            .await
    }

    pub async fn remove_location(
        &self,
        centre: &Centre,
        location_id: &str,
    ) -> ClientResult<Centre> {
        centre.persisted_id()?;
        centre.check_location_present(location_id)?;
        self.client
            .remove_child(&format!("{BASE}/locations"), centre, location_id)
            .await
    }

    pub async fn enable(&self, centre: &Centre) -> ClientResult<Centre> {
        self.transition(centre, CentreAction::Enable).await
    }

    pub async fn disable(&self, centre: &Centre) -> ClientResult<Centre> {
        self.transition(centre, CentreAction::Disable).await
    }

    async fn transition(&self, centre: &Centre, action: CentreAction) -> ClientResult<Centre> {
        centre.persisted_id()?;
        centre.check_transition(action)?;
        self.client
            .update(&format!("{BASE}/{}", action.as_str()), centre, Value::Null)
            .await
    }
}
