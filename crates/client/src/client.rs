//! [`BiobankClient`] and the shared optimistic-concurrency helpers every
//! entity API is built from.
//!
//! Each mutation sends the version the caller last observed and returns the
//! server's complete, freshly validated representation. The caller's old
//! value is stale afterwards; nothing is merged into it.

use std::sync::Arc;

use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::paging::{EntityCounts, PagedResult, PagerOptions, QueryStyle};
use serde_json::{json, Value};

use crate::centres::CentreApi;
use crate::collection_event_types::CollectionEventTypeApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::ReqwestTransport;
use crate::memberships::MembershipApi;
use crate::participants::ParticipantApi;
use crate::shipments::ShipmentApi;
use crate::studies::StudyApi;
use crate::transport::{ApiRequest, Transport};
use crate::users::UserApi;

/// Entry point to the biobank REST API.
#[derive(Clone)]
pub struct BiobankClient {
    transport: Arc<dyn Transport>,
}

impl BiobankClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Connect over HTTP using `config`.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn centres(&self) -> CentreApi<'_> {
        CentreApi::new(self)
    }

    pub fn studies(&self) -> StudyApi<'_> {
        StudyApi::new(self)
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn memberships(&self) -> MembershipApi<'_> {
        MembershipApi::new(self)
    }

    pub fn shipments(&self) -> ShipmentApi<'_> {
        ShipmentApi::new(self)
    }

    pub fn collection_event_types(&self) -> CollectionEventTypeApi<'_> {
        CollectionEventTypeApi::new(self)
    }

    pub fn participants(&self) -> ParticipantApi<'_> {
        ParticipantApi::new(self)
    }

    // ---- shared helpers ----

    pub(crate) async fn fetch<E: ConcurrencySafeEntity>(&self, path: String) -> ClientResult<E> {
        let reply = self.transport.execute(ApiRequest::get(path)).await?;
        Ok(E::from_server(reply)?)
    }

    /// Fetch a list that is not paged (e.g. all event types of a study).
    pub(crate) async fn fetch_all<E: ConcurrencySafeEntity>(
        &self,
        path: String,
    ) -> ClientResult<Vec<E>> {
        let reply = self.transport.execute(ApiRequest::get(path)).await?;
        let items = match reply {
            Value::Array(items) => items,
            other => {
                return Err(biobank_core::error::CoreError::InvalidObject {
                    entity: E::KIND,
                    reason: format!("expected an array, got {other}"),
                }
                .into())
            }
        };
        items
            .into_iter()
            .map(|item| E::from_server(item).map_err(ClientError::from))
            .collect()
    }

    /// Fetch one page; every item is validated like any other reply.
    pub(crate) async fn fetch_page<E: ConcurrencySafeEntity>(
        &self,
        path: String,
        options: &PagerOptions,
        style: QueryStyle,
    ) -> ClientResult<PagedResult<E>> {
        let request = ApiRequest::get(path).with_query(options.to_query(style));
        let reply = self.transport.execute(request).await?;
        let page = PagedResult::from_server(E::KIND, reply)?;
        Ok(page.try_map(E::from_server)?)
    }

    pub(crate) async fn fetch_counts(&self, path: String) -> ClientResult<EntityCounts> {
        let reply = self.transport.execute(ApiRequest::get(path)).await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Persist a new entity. The reply replaces the local draft wholesale.
    pub(crate) async fn create<E: ConcurrencySafeEntity>(
        &self,
        path: String,
        body: Value,
    ) -> ClientResult<E> {
        let reply = self.transport.execute(ApiRequest::post(path, body)).await?;
        let created = E::from_server(reply)?;
        tracing::info!(kind = %E::KIND, id = ?created.id(), "Entity added");
        Ok(created)
    }

    /// `POST <prefix>/<id>` with `fields` plus `expectedVersion`.
    pub(crate) async fn update<E: ConcurrencySafeEntity>(
        &self,
        prefix: &str,
        entity: &E,
        fields: Value,
    ) -> ClientResult<E> {
        let id = entity.persisted_id()?;
        let path = format!("{prefix}/{id}");
        self.update_at(path, entity, fields).await
    }

    /// `POST <path>` with `fields` plus `expectedVersion`, for endpoints whose
    /// path carries more than the entity id.
    pub(crate) async fn update_at<E: ConcurrencySafeEntity>(
        &self,
        path: String,
        entity: &E,
        fields: Value,
    ) -> ClientResult<E> {
        entity.persisted_id()?;
        let body = with_expected_version(fields, entity.version());
        let reply = self.transport.execute(ApiRequest::post(path, body)).await?;
        let updated = E::from_server(reply)?;
        tracing::info!(
            kind = %E::KIND,
            id = ?updated.id(),
            version = updated.version(),
            "Entity updated"
        );
        Ok(updated)
    }

    /// `DELETE <prefix>/<id>/<version>/<child_id>`, returning the updated parent.
    pub(crate) async fn remove_child<E: ConcurrencySafeEntity>(
        &self,
        prefix: &str,
        entity: &E,
        child_id: &str,
    ) -> ClientResult<E> {
        let id = entity.persisted_id()?;
        let path = format!("{prefix}/{id}/{}/{child_id}", entity.version());
        let reply = self.transport.execute(ApiRequest::delete(path)).await?;
        Ok(E::from_server(reply)?)
    }

    /// `DELETE <path>`, ending the entity's lifecycle.
    pub(crate) async fn remove_at<E: ConcurrencySafeEntity>(
        &self,
        path: String,
        entity: &E,
    ) -> ClientResult<()> {
        entity.persisted_id()?;
        self.transport.execute(ApiRequest::delete(path)).await?;
        tracing::info!(kind = %E::KIND, id = ?entity.id(), "Entity removed");
        Ok(())
    }
}

/// Add `expectedVersion` to a request body.
///
/// `Value::Null` yields a body holding only the version.
pub(crate) fn with_expected_version(fields: Value, version: u64) -> Value {
    match fields {
        Value::Object(mut map) => {
            map.insert("expectedVersion".to_string(), json!(version));
            Value::Object(map)
        }
        _ => json!({ "expectedVersion": version }),
    }
}

/// Serialize a DTO into a JSON body.
pub(crate) fn to_body<T: serde::Serialize>(value: &T) -> ClientResult<Value> {
    Ok(serde_json::to_value(value)?)
}
