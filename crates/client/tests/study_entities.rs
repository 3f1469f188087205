//! Collection event types and participants, the entities owned by a study.

mod common;

use biobank_client::transport::HttpMethod;
use biobank_core::annotation::{Annotation, AnnotationType, AnnotationValueType};
use biobank_core::collection_event_type::{CollectionEventType, NewCollectionEventType};
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::participant::Participant;
use biobank_fixtures::factory::{entity, next_version, with};
use biobank_fixtures::EntityFactory;
use serde_json::{json, Value};

use common::mock_client;

#[tokio::test]
async fn event_types_listed_per_study() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    transport.reply(json!([
        factory.collection_event_type("study-1"),
        factory.collection_event_type("study-1"),
    ]));

    let event_types = client
        .collection_event_types()
        .list("study-1")
        .await
        .unwrap();

    assert_eq!(event_types.len(), 2);
    assert_eq!(transport.last_request().unwrap().path, "/studies/cetypes/study-1");
}

#[tokio::test]
async fn event_type_list_must_be_array() {
    let (transport, client) = mock_client();
    transport.reply(json!({ "items": [] }));

    let err = client
        .collection_event_types()
        .list("study-1")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid object from server"));
}

#[tokio::test]
async fn add_event_type() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    transport.reply(factory.collection_event_type("study-1"));

    let draft = NewCollectionEventType {
        name: "Baseline".into(),
        description: None,
        recurring: true,
    };
    client
        .collection_event_types()
        .add("study-1", &draft)
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.path, "/studies/cetypes/study-1");
    assert_eq!(request.body, Some(json!({ "name": "Baseline", "recurring": true })));
}

#[tokio::test]
async fn update_recurring_carries_study_and_version() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = with(&factory.collection_event_type("study-1"), "version", json!(5));
    let event_type: CollectionEventType = entity(&json);
    transport.reply(next_version(&json, json!({ "recurring": true })));

    let updated = client
        .collection_event_types()
        .update_recurring(&event_type, true)
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(
        request.path,
        format!("/studies/cetypes/recurring/{}", event_type.id().unwrap())
    );
    assert_eq!(
        request.body,
        Some(json!({ "studyId": "study-1", "recurring": true, "expectedVersion": 5 }))
    );
    assert!(updated.recurring);
    assert_eq!(updated.version(), 6);
}

#[tokio::test]
async fn remove_specimen_description_checks_presence() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let description = factory.specimen_description();
    let description_id = description["id"].as_str().unwrap().to_string();
    let json = with(
        &factory.collection_event_type("study-1"),
        "specimenDescriptions",
        json!([description]),
    );
    let event_type: CollectionEventType = entity(&json);

    let err = client
        .collection_event_types()
        .remove_specimen_description(&event_type, "missing")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("ID not present"));
    assert_eq!(transport.request_count(), 0);

    transport.reply(next_version(&json, json!({ "specimenDescriptions": [] })));
    client
        .collection_event_types()
        .remove_specimen_description(&event_type, &description_id)
        .await
        .unwrap();
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(
        request.path,
        format!(
            "/studies/cetypes/spcdesc/{}/0/{description_id}",
            event_type.id().unwrap()
        )
    );
}

#[tokio::test]
async fn remove_event_type_path() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = with(&factory.collection_event_type("study-1"), "version", json!(2));
    let event_type: CollectionEventType = entity(&json);
    transport.reply(Value::Null);

    client
        .collection_event_types()
        .remove(&event_type)
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().unwrap().path,
        format!("/studies/cetypes/study-1/{}/2", event_type.id().unwrap())
    );
}

#[tokio::test]
async fn participant_by_unique_id() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    transport.reply(factory.participant("study-1"));

    let participant = client
        .participants()
        .get_by_unique_id("study-1", "P-001")
        .await
        .unwrap();

    assert_eq!(participant.study_id, "study-1");
    assert_eq!(
        transport.last_request().unwrap().path,
        "/participants/uniqueId/study-1/P-001"
    );
}

#[tokio::test]
async fn annotation_checked_against_its_type() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = factory.participant("study-1");
    let participant: Participant = entity(&json);
    let weight = AnnotationType {
        id: Some("at-1".into()),
        required: true,
        ..AnnotationType::new("Weight", AnnotationValueType::Number)
    };

    let bad = Annotation {
        annotation_type_id: "at-1".into(),
        number_value: Some("heavy".into()),
        ..Annotation::default()
    };
    let err = client
        .participants()
        .add_annotation(&participant, &weight, &bad)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("is not a number"));
    assert_eq!(transport.request_count(), 0);

    let good = Annotation {
        number_value: Some("71.5".into()),
        ..bad
    };
    transport.reply(next_version(
        &json,
        json!({ "annotations": [{ "annotationTypeId": "at-1", "numberValue": "71.5" }] }),
    ));
    let updated = client
        .participants()
        .add_annotation(&participant, &weight, &good)
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(
        request.path,
        format!("/participants/annot/{}", participant.id().unwrap())
    );
    assert_eq!(
        request.body,
        Some(json!({ "annotationTypeId": "at-1", "numberValue": "71.5", "expectedVersion": 0 }))
    );
    assert_eq!(
        updated
            .annotation("at-1")
            .and_then(|a| a.number_value.as_deref()),
        Some("71.5")
    );
}
