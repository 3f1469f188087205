//! Specimen shipments between centre locations.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{ConcurrencySafeEntity, EntityMeta};
use crate::error::CoreError;
use crate::state::ShipmentState;
use crate::types::{EntityId, EntityKind, Timestamp};

/// Centre location a shipment leaves from or arrives at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub centre_id: EntityId,
    pub location_id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub state: ShipmentState,
    pub courier_name: String,
    pub tracking_number: String,
    pub from_location_info: LocationInfo,
    pub to_location_info: LocationInfo,
    #[serde(default)]
    pub time_packed: Option<Timestamp>,
    #[serde(default)]
    pub time_sent: Option<Timestamp>,
    #[serde(default)]
    pub time_received: Option<Timestamp>,
    #[serde(default)]
    pub time_unpacked: Option<Timestamp>,
    #[serde(default)]
    pub time_completed: Option<Timestamp>,
    #[serde(default)]
    pub specimen_count: u32,
    #[serde(default)]
    pub container_count: u32,
}

impl ConcurrencySafeEntity for Shipment {
    const KIND: EntityKind = EntityKind::Shipment;
    const REQUIRED_PROPERTIES: &'static [&'static str] = &[
        "id",
        "version",
        "timeAdded",
        "state",
        "courierName",
        "trackingNumber",
        "fromLocationInfo",
        "toLocationInfo",
    ];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

/// States reachable from `from` in a single change.
///
/// - Forward: `created -> packed -> sent -> received -> unpacked -> completed`
/// - Back one step along the same chain
/// - Skips: `created -> sent`, `sent -> unpacked`
/// - `packed`, `sent`, `received -> lost`; `lost` is terminal
pub fn valid_transitions(from: ShipmentState) -> &'static [ShipmentState] {
    use ShipmentState::*;
    match from {
        Created => &[Packed, Sent],
        Packed => &[Created, Sent, Lost],
        Sent => &[Packed, Received, Unpacked, Lost],
        Received => &[Sent, Unpacked, Lost],
        Unpacked => &[Received, Completed],
        Completed => &[Unpacked],
        Lost => &[],
    }
}

impl Shipment {
    pub fn is_created(&self) -> bool {
        self.state == ShipmentState::Created
    }

    pub fn is_packed(&self) -> bool {
        self.state == ShipmentState::Packed
    }

    pub fn is_sent(&self) -> bool {
        self.state == ShipmentState::Sent
    }

    pub fn is_received(&self) -> bool {
        self.state == ShipmentState::Received
    }

    pub fn is_unpacked(&self) -> bool {
        self.state == ShipmentState::Unpacked
    }

    pub fn is_completed(&self) -> bool {
        self.state == ShipmentState::Completed
    }

    pub fn is_lost(&self) -> bool {
        self.state == ShipmentState::Lost
    }

    pub fn check_state_change(&self, target: ShipmentState) -> Result<(), CoreError> {
        if self.state == target {
            return Err(CoreError::transition(format!("already {target}")));
        }
        if valid_transitions(self.state).contains(&target) {
            Ok(())
        } else {
            Err(CoreError::transition(format!(
                "cannot change shipment state from {} to {target}",
                self.state
            )))
        }
    }

    /// Courier, tracking number and locations may only change while the
    /// shipment is being created.
    pub fn check_modifiable(&self) -> Result<(), CoreError> {
        if self.is_created() {
            Ok(())
        } else {
            Err(CoreError::transition(format!(
                "shipment is in {} state, not created",
                self.state
            )))
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewShipment {
    #[validate(length(min = 1, message = "courier name is required"))]
    pub courier_name: String,
    #[validate(length(min = 1, message = "tracking number is required"))]
    pub tracking_number: String,
    pub from_location_id: EntityId,
    pub to_location_id: EntityId,
}
