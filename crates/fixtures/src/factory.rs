//! Server-shaped entity JSON for tests.
//!
//! The factory is an explicit value owned by each test. Ids come from its
//! own counter, so two factories never share state and the same seed
//! reproduces the same ids.

use biobank_core::entity::ConcurrencySafeEntity;
use serde_json::{json, Value};

const TIME_ADDED: &str = "2024-01-01T00:00:00Z";

#[derive(Debug, Default)]
pub struct EntityFactory {
    seq: u64,
}

impl EntityFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start numbering after `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { seq: seed }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.seq += 1;
        format!("{prefix}-{}", self.seq)
    }

    fn base(&mut self, prefix: &str) -> (String, Value) {
        let id = self.next_id(prefix);
        let meta = json!({
            "id": id,
            "version": 0,
            "timeAdded": TIME_ADDED,
            "timeModified": null,
        });
        (id, meta)
    }

    pub fn centre(&mut self) -> Value {
        let (id, meta) = self.base("centre");
        merge(
            meta,
            json!({
                "slug": id,
                "name": format!("Centre {id}"),
                "description": null,
                "state": "disabled",
                "studyNames": [],
                "locations": [],
            }),
        )
    }

    pub fn study(&mut self) -> Value {
        let (id, meta) = self.base("study");
        merge(
            meta,
            json!({
                "slug": id,
                "name": format!("Study {id}"),
                "description": null,
                "state": "disabled",
                "annotationTypes": [],
            }),
        )
    }

    pub fn user(&mut self) -> Value {
        let (id, meta) = self.base("user");
        merge(
            meta,
            json!({
                "slug": id,
                "name": format!("User {id}"),
                "email": format!("{id}@example.org"),
                "avatarUrl": null,
                "state": "registered",
            }),
        )
    }

    pub fn membership(&mut self) -> Value {
        let (id, meta) = self.base("membership");
        merge(
            meta,
            json!({
                "slug": id,
                "name": format!("Membership {id}"),
                "description": null,
                "userData": [],
                "studyData": {"allEntities": false, "entityData": []},
                "centreData": {"allEntities": false, "entityData": []},
            }),
        )
    }

    pub fn shipment(&mut self) -> Value {
        let (id, meta) = self.base("shipment");
        let from = self.next_id("location");
        let to = self.next_id("location");
        merge(
            meta,
            json!({
                "state": "created",
                "courierName": "FedEx",
                "trackingNumber": format!("TN-{id}"),
                "fromLocationInfo": {"centreId": "centre-a", "locationId": from, "name": "From"},
                "toLocationInfo": {"centreId": "centre-b", "locationId": to, "name": "To"},
                "specimenCount": 0,
                "containerCount": 0,
            }),
        )
    }

    pub fn collection_event_type(&mut self, study_id: &str) -> Value {
        let (id, meta) = self.base("cet");
        merge(
            meta,
            json!({
                "studyId": study_id,
                "slug": id,
                "name": format!("Event {id}"),
                "description": null,
                "recurring": false,
                "specimenDescriptions": [],
                "annotationTypes": [],
            }),
        )
    }

    pub fn participant(&mut self, study_id: &str) -> Value {
        let (id, meta) = self.base("participant");
        merge(
            meta,
            json!({
                "studyId": study_id,
                "slug": id,
                "uniqueId": format!("P-{id}"),
                "annotations": [],
            }),
        )
    }

    pub fn annotation_type(&mut self) -> Value {
        let id = self.next_id("annotation-type");
        json!({
            "id": id,
            "slug": id,
            "name": format!("Annotation {id}"),
            "description": null,
            "valueType": "text",
            "options": [],
            "required": false,
        })
    }

    pub fn location(&mut self) -> Value {
        let id = self.next_id("location");
        json!({
            "id": id,
            "slug": id,
            "name": format!("Location {id}"),
            "street": "1 Main St",
            "city": "Edmonton",
            "province": "AB",
            "postalCode": "T6G 2E1",
            "poBoxNumber": null,
            "countryIsoCode": "CA",
        })
    }

    pub fn specimen_description(&mut self) -> Value {
        let id = self.next_id("specimen-description");
        json!({
            "id": id,
            "slug": id,
            "name": format!("Specimen {id}"),
            "description": null,
            "units": "mL",
            "anatomicalSourceType": "blood",
            "preservationType": "frozen",
            "preservationTemperature": "-80 C",
            "specimenType": "plasma",
            "maxCount": 1,
            "amount": 0.5,
        })
    }
}

/// Overlay the fields of `patch` onto `base`.
pub fn merge(mut base: Value, patch: Value) -> Value {
    if let (Some(target), Value::Object(fields)) = (base.as_object_mut(), patch) {
        for (key, value) in fields {
            target.insert(key, value);
        }
    }
    base
}

/// Copy of `value` with one field replaced.
pub fn with(value: &Value, key: &str, field: Value) -> Value {
    let mut patch = serde_json::Map::new();
    patch.insert(key.to_string(), field);
    merge(value.clone(), Value::Object(patch))
}

/// The server's reply to a successful mutation: `value` with `patch`
/// applied and `version` incremented by one.
pub fn next_version(value: &Value, patch: Value) -> Value {
    let version = value["version"].as_u64().unwrap_or(0);
    merge(merge(value.clone(), patch), json!({ "version": version + 1 }))
}

/// A paged list reply holding `items`.
pub fn paged(items: Vec<Value>, total: u64, page: u32, limit: u32) -> Value {
    let max_pages = if limit == 0 {
        0
    } else {
        total.div_ceil(u64::from(limit))
    };
    let next = if u64::from(page) < max_pages {
        json!(page + 1)
    } else {
        Value::Null
    };
    let prev = if page > 1 { json!(page - 1) } else { Value::Null };
    json!({
        "items": items,
        "total": total,
        "page": page,
        "limit": limit,
        "offset": u64::from(page.saturating_sub(1)) * u64::from(limit),
        "next": next,
        "prev": prev,
        "maxPages": max_pages,
    })
}

/// An entity-counts reply, e.g. `counts(7, &[("disabled", 2), ("enabled", 5)])`.
pub fn counts(total: u64, by_state: &[(&str, u64)]) -> Value {
    let mut value = json!({ "total": total });
    for (state, count) in by_state {
        value[format!("{state}Count")] = json!(count);
    }
    value
}

/// Decode fixture JSON into an entity, panicking on invalid fixtures.
pub fn entity<E: ConcurrencySafeEntity>(value: &Value) -> E {
    match E::from_server(value.clone()) {
        Ok(entity) => entity,
        Err(e) => panic!("invalid {} fixture: {e}", E::KIND),
    }
}
