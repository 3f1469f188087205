//! User endpoints.

use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::paging::{EntityCounts, PagedResult, PagerOptions, QueryStyle};
use biobank_core::user::{validate_email, NewUser, User, UserAction};
use serde_json::{json, Value};
use validator::Validate;

use crate::client::{to_body, BiobankClient};
use crate::error::ClientResult;

const BASE: &str = "/users";

pub struct UserApi<'a> {
    client: &'a BiobankClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a BiobankClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> ClientResult<User> {
        self.client.fetch(format!("{BASE}/{id}")).await
    }

    pub async fn list(&self, options: &PagerOptions) -> ClientResult<PagedResult<User>> {
        self.client
            .fetch_page(format!("{BASE}/search"), options, QueryStyle::Standard)
            .await
    }

    pub async fn counts(&self) -> ClientResult<EntityCounts> {
        self.client.fetch_counts(format!("{BASE}/counts")).await
    }

    /// Register a new account; it starts in the `registered` state.
    pub async fn register(&self, user: &NewUser) -> ClientResult<User> {
        user.validate().map_err(CoreError::from)?;
        self.client.create(format!("{BASE}/"), to_body(user)?).await
    }

    pub async fn update_name(&self, user: &User, name: &str) -> ClientResult<User> {
        self.client
            .update(&format!("{BASE}/name"), user, json!({ "name": name }))
            .await
    }

    pub async fn update_email(&self, user: &User, email: &str) -> ClientResult<User> {
        user.persisted_id()?;
        validate_email(email)?;
        self.client
            .update(&format!("{BASE}/email"), user, json!({ "email": email }))
            .await
    }

    pub async fn update_avatar_url(&self, user: &User, avatar_url: Option<&str>) -> ClientResult<User> {
        self.client
            .update(
                &format!("{BASE}/avatarurl"),
                user,
                json!({ "avatarUrl": avatar_url }),
            )
            .await
    }

    pub async fn update_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> ClientResult<User> {
        self.client
            .update(
                &format!("{BASE}/password"),
                user,
                json!({
                    "currentPassword": current_password,
                    "newPassword": new_password,
                }),
            )
            .await
    }

    pub async fn activate(&self, user: &User) -> ClientResult<User> {
        self.transition(user, UserAction::Activate).await
    }

    pub async fn lock(&self, user: &User) -> ClientResult<User> {
        self.transition(user, UserAction::Lock).await
    }

    pub async fn unlock(&self, user: &User) -> ClientResult<User> {
        self.transition(user, UserAction::Unlock).await
    }

    async fn transition(&self, user: &User, action: UserAction) -> ClientResult<User> {
        user.persisted_id()?;
        user.check_transition(action)?;
        self.client
            .update(&format!("{BASE}/{}", action.as_str()), user, Value::Null)
            .await
    }
}
