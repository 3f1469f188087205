//! List sources for the entity kinds that have a list screen.

use async_trait::async_trait;
use biobank_client::{BiobankClient, ClientResult};
use biobank_core::centre::Centre;
use biobank_core::error::CoreError;
use biobank_core::filter::{FilterName, FilterSet, SearchFilter};
use biobank_core::paging::{PagedResult, PagerOptions};
use biobank_core::shipment::Shipment;
use biobank_core::sort::{CentreSortField, ShipmentSortField, StudySortField, UserSortField};
use biobank_core::state::icon_for_state;
use biobank_core::study::Study;
use biobank_core::types::EntityKind;
use biobank_core::user::User;

use crate::list::{ListConfig, ListSource};

fn name_and_state() -> FilterSet {
    FilterSet::new()
        .with(FilterName::Name, SearchFilter::name())
        .with(FilterName::State, SearchFilter::state())
}

pub struct CentreListSource {
    client: BiobankClient,
}

impl CentreListSource {
    pub fn new(client: BiobankClient) -> Self {
        Self { client }
    }

    pub fn default_config(page_size: u32) -> ListConfig {
        ListConfig::new(name_and_state(), CentreSortField::fields(), page_size)
    }
}

#[async_trait]
impl ListSource for CentreListSource {
    type Item = Centre;

    async fn get_items(&self, options: &PagerOptions) -> ClientResult<PagedResult<Centre>> {
        self.client.centres().list(options).await
    }

    async fn entity_count(&self) -> ClientResult<u64> {
        Ok(self.client.centres().counts().await?.total)
    }

    fn item_icon(&self, centre: &Centre) -> Result<&'static str, CoreError> {
        icon_for_state(EntityKind::Centre, centre.state.as_str())
    }
}

pub struct StudyListSource {
    client: BiobankClient,
}

impl StudyListSource {
    pub fn new(client: BiobankClient) -> Self {
        Self { client }
    }

    pub fn default_config(page_size: u32) -> ListConfig {
        ListConfig::new(name_and_state(), StudySortField::fields(), page_size)
    }
}

#[async_trait]
impl ListSource for StudyListSource {
    type Item = Study;

    async fn get_items(&self, options: &PagerOptions) -> ClientResult<PagedResult<Study>> {
        self.client.studies().list(options).await
    }

    async fn entity_count(&self) -> ClientResult<u64> {
        Ok(self.client.studies().counts().await?.total)
    }

    fn item_icon(&self, study: &Study) -> Result<&'static str, CoreError> {
        icon_for_state(EntityKind::Study, study.state.as_str())
    }
}

pub struct UserListSource {
    client: BiobankClient,
}

impl UserListSource {
    pub fn new(client: BiobankClient) -> Self {
        Self { client }
    }

    /// Name, email and state filters.
    pub fn default_config(page_size: u32) -> ListConfig {
        let filters = FilterSet::new()
            .with(FilterName::Name, SearchFilter::name())
            .with(FilterName::Email, SearchFilter::email())
            .with(FilterName::State, SearchFilter::state());
        ListConfig::new(filters, UserSortField::fields(), page_size)
    }
}

#[async_trait]
impl ListSource for UserListSource {
    type Item = User;

    async fn get_items(&self, options: &PagerOptions) -> ClientResult<PagedResult<User>> {
        self.client.users().list(options).await
    }

    async fn entity_count(&self) -> ClientResult<u64> {
        Ok(self.client.users().counts().await?.total)
    }

    fn item_icon(&self, user: &User) -> Result<&'static str, CoreError> {
        icon_for_state(EntityKind::User, user.state.as_str())
    }
}

/// Shipments sent from or to one centre.
pub struct ShipmentListSource {
    client: BiobankClient,
    centre_id: String,
}

impl ShipmentListSource {
    pub fn new(client: BiobankClient, centre_id: impl Into<String>) -> Self {
        Self {
            client,
            centre_id: centre_id.into(),
        }
    }

    pub fn centre_id(&self) -> &str {
        &self.centre_id
    }

    /// State filter only; shipments are sorted by courier name by default.
    pub fn default_config(page_size: u32) -> ListConfig {
        let filters = FilterSet::new().with(FilterName::State, SearchFilter::state());
        ListConfig::new(filters, ShipmentSortField::fields(), page_size)
    }
}

#[async_trait]
impl ListSource for ShipmentListSource {
    type Item = Shipment;

    async fn get_items(&self, options: &PagerOptions) -> ClientResult<PagedResult<Shipment>> {
        self.client.shipments().list(&self.centre_id, options).await
    }

    /// The shipment API has no counts endpoint; an unfiltered one-item page
    /// reports the total.
    async fn entity_count(&self) -> ClientResult<u64> {
        let options = PagerOptions {
            limit: 1,
            ..PagerOptions::default()
        };
        Ok(self.get_items(&options).await?.total)
    }

    fn item_icon(&self, shipment: &Shipment) -> Result<&'static str, CoreError> {
        icon_for_state(EntityKind::Shipment, shipment.state.as_str())
    }
}
