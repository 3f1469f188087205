mod common;

use assert_matches::assert_matches;
use biobank_client::transport::HttpMethod;
use biobank_client::ClientError;
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::membership::Membership;
use biobank_fixtures::factory::{entity, next_version, with};
use biobank_fixtures::EntityFactory;
use serde_json::{json, Value};

use common::mock_client;

fn membership_with_user(factory: &mut EntityFactory, user_id: &str) -> Value {
    let json = factory.membership();
    let json = with(&json, "userData", json!([{ "id": user_id, "name": "A User" }]));
    with(&json, "version", json!(2))
}

#[tokio::test]
async fn remove_user_embeds_version() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = membership_with_user(&mut factory, "user-7");
    let membership: Membership = entity(&json);
    transport.reply(next_version(&json, json!({ "userData": [] })));

    let updated = client
        .memberships()
        .remove_user(&membership, "user-7")
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(
        request.path,
        format!("/access/memberships/user/{}/2/user-7", membership.id().unwrap())
    );
    assert!(!updated.has_user("user-7"));
    assert_eq!(updated.version(), 3);
}

#[tokio::test]
async fn remove_absent_user_fails_locally() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let membership: Membership = entity(&membership_with_user(&mut factory, "user-7"));

    let err = client
        .memberships()
        .remove_user(&membership, "user-8")
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Core(CoreError::ChildNotPresent { .. }));
    assert!(err.to_string().contains("ID not present"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn unpersisted_membership_cannot_be_removed() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let draft: Membership =
        serde_json::from_value(with(&factory.membership(), "id", Value::Null)).unwrap();

    let err = client.memberships().remove(&draft).await.unwrap_err();
    assert!(err.to_string().contains("has not been persisted"));

    let err = client
        .memberships()
        .remove_user(&draft, "user-1")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("has not been persisted"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn add_study_and_remove() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = factory.membership();
    let membership: Membership = entity(&json);
    let with_study = next_version(
        &json,
        json!({ "studyData": { "allEntities": false, "entityData": [{ "id": "study-3", "name": "S" }] } }),
    );
    transport.reply(with_study);

    let updated = client
        .memberships()
        .add_study(&membership, "study-3")
        .await
        .unwrap();
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({ "studyId": "study-3", "expectedVersion": 0 }))
    );

    transport.reply(Value::Null);
    client.memberships().remove(&updated).await.unwrap();
    assert_eq!(
        transport.last_request().unwrap().path,
        format!("/access/memberships/{}/1", updated.id().unwrap())
    );
}
