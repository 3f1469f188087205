//! Shipment endpoints.

use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::paging::{PagedResult, PagerOptions, QueryStyle};
use biobank_core::shipment::{NewShipment, Shipment};
use biobank_core::state::ShipmentState;
use biobank_core::types::Timestamp;
use serde_json::json;
use validator::Validate;

use crate::client::{to_body, BiobankClient};
use crate::error::ClientResult;

const BASE: &str = "/shipments";

pub struct ShipmentApi<'a> {
    client: &'a BiobankClient,
}

impl<'a> ShipmentApi<'a> {
    pub(crate) fn new(client: &'a BiobankClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> ClientResult<Shipment> {
        self.client.fetch(format!("{BASE}/{id}")).await
    }

    /// Shipments leaving or arriving at a centre. This endpoint names its
    /// paging parameters `order` and `pageSize`.
    pub async fn list(
        &self,
        centre_id: &str,
        options: &PagerOptions,
    ) -> ClientResult<PagedResult<Shipment>> {
        self.client
            .fetch_page(format!("{BASE}/list/{centre_id}"), options, QueryStyle::Shipment)
            .await
    }

    pub async fn add(&self, shipment: &NewShipment) -> ClientResult<Shipment> {
        shipment.validate().map_err(CoreError::from)?;
        self.client.create(format!("{BASE}/"), to_body(shipment)?).await
    }

    pub async fn update_courier_name(
        &self,
        shipment: &Shipment,
        courier_name: &str,
    ) -> ClientResult<Shipment> {
        self.modify(shipment, "courier", json!({ "courierName": courier_name }))
            .await
    }

    pub async fn update_tracking_number(
        &self,
        shipment: &Shipment,
        tracking_number: &str,
    ) -> ClientResult<Shipment> {
        self.modify(
            shipment,
            "trackingnumber",
            json!({ "trackingNumber": tracking_number }),
        )
        .await
    }

    pub async fn update_from_location(
        &self,
        shipment: &Shipment,
        location_id: &str,
    ) -> ClientResult<Shipment> {
        self.modify(shipment, "fromlocation", json!({ "locationId": location_id }))
            .await
    }

    pub async fn update_to_location(
        &self,
        shipment: &Shipment,
        location_id: &str,
    ) -> ClientResult<Shipment> {
        self.modify(shipment, "tolocation", json!({ "locationId": location_id }))
            .await
    }

    /// Move the shipment to `target`, stamping the transition with `time`.
    pub async fn change_state(
        &self,
        shipment: &Shipment,
        target: ShipmentState,
        time: Option<Timestamp>,
    ) -> ClientResult<Shipment> {
        shipment.persisted_id()?;
        shipment.check_state_change(target)?;
        self.client
            .update(
                &format!("{BASE}/state"),
                shipment,
                json!({ "newState": target, "datetime": time }),
            )
            .await
    }

    /// Only a shipment still in the `created` state may be removed.
    pub async fn remove(&self, shipment: &Shipment) -> ClientResult<()> {
        let id = shipment.persisted_id()?;
        shipment.check_modifiable()?;
        let path = format!("{BASE}/{id}/{}", shipment.version());
        self.client.remove_at(path, shipment).await
    }

    async fn modify(
        &self,
        shipment: &Shipment,
        field: &str,
        body: serde_json::Value,
    ) -> ClientResult<Shipment> {
        shipment.persisted_id()?;
        shipment.check_modifiable()?;
        self.client
            .update(&format!("{BASE}/{field}"), shipment, body)
            .await
    }
}
