//! Access membership endpoints.

use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::membership::{Membership, NewMembership};
use biobank_core::paging::{PagedResult, PagerOptions, QueryStyle};
use serde_json::json;
use validator::Validate;

use crate::client::{to_body, BiobankClient};
use crate::error::ClientResult;

const BASE: &str = "/access/memberships";

pub struct MembershipApi<'a> {
    client: &'a BiobankClient,
}

impl<'a> MembershipApi<'a> {
    pub(crate) fn new(client: &'a BiobankClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> ClientResult<Membership> {
        self.client.fetch(format!("{BASE}/{id}")).await
    }

    pub async fn list(&self, options: &PagerOptions) -> ClientResult<PagedResult<Membership>> {
        self.client
            .fetch_page(format!("{BASE}/search"), options, QueryStyle::Standard)
            .await
    }

    pub async fn add(&self, membership: &NewMembership) -> ClientResult<Membership> {
        membership.validate().map_err(CoreError::from)?;
        self.client
            .create(format!("{BASE}/"), to_body(membership)?)
            .await
    }

    pub async fn update_name(&self, membership: &Membership, name: &str) -> ClientResult<Membership> {
        self.client
            .update(&format!("{BASE}/name"), membership, json!({ "name": name }))
            .await
    }

    pub async fn update_description(
        &self,
        membership: &Membership,
        description: Option<&str>,
    ) -> ClientResult<Membership> {
        self.client
            .update(
                &format!("{BASE}/description"),
                membership,
                json!({ "description": description }),
            )
            .await
    }

    pub async fn add_user(&self, membership: &Membership, user_id: &str) -> ClientResult<Membership> {
        self.client
            .update(&format!("{BASE}/user"), membership, json!({ "userId": user_id }))
            .await
    }

    pub async fn remove_user(
        &self,
        membership: &Membership,
        user_id: &str,
    ) -> ClientResult<Membership> {
        membership.persisted_id()?;
        membership.check_user_present(user_id)?;
        self.client
            .remove_child(&format!("{BASE}/user"), membership, user_id)
            .await
    }

    pub async fn add_study(&self, membership: &Membership, study_id: &str) -> ClientResult<Membership> {
        self.client
            .update(&format!("{BASE}/study"), membership, json!({ "studyId": study_id }))
            .await
    }

    pub async fn remove_study(
        &self,
        membership: &Membership,
        study_id: &str,
    ) -> ClientResult<Membership> {
        membership.persisted_id()?;
        membership.check_study_present(study_id)?;
        self.client
            .remove_child(&format!("{BASE}/study"), membership, study_id)
            .await
    }

    pub async fn add_centre(
        &self,
        membership: &Membership,
        centre_id: &str,
    ) -> ClientResult<Membership> {
        self.client
            .update(
                &format!("{BASE}/centre"),
                membership,
                json!({ "centreId": centre_id }),
            )
            .await
    }

    pub async fn remove_centre(
        &self,
        membership: &Membership,
        centre_id: &str,
    ) -> ClientResult<Membership> {
        membership.persisted_id()?;
        membership.check_centre_present(centre_id)?;
        self.client
            .remove_child(&format!("{BASE}/centre"), membership, centre_id)
            .await
    }

    /// `DELETE /access/memberships/<id>/<version>`.
    pub async fn remove(&self, membership: &Membership) -> ClientResult<()> {
        let id = membership.persisted_id()?;
        let path = format!("{BASE}/{id}/{}", membership.version());
        self.client.remove_at(path, membership).await
    }
}
