mod common;

use assert_matches::assert_matches;
use biobank_client::ClientError;
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::user::{NewUser, User};
use biobank_fixtures::factory::{entity, next_version, with};
use biobank_fixtures::EntityFactory;
use serde_json::json;

use common::mock_client;

#[tokio::test]
async fn register_posts_new_user() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    transport.reply(factory.user());

    let draft = NewUser {
        name: "Ada Lovelace".into(),
        email: "ada@example.org".into(),
        password: "correct horse".into(),
        avatar_url: None,
    };
    let user = client.users().register(&draft).await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.path, "/users/");
    let body = request.body.unwrap();
    assert_eq!(body["email"], "ada@example.org");
    assert!(body.get("avatarUrl").is_none());
    assert!(user.is_registered());
}

#[tokio::test]
async fn register_rejects_bad_email() {
    let (transport, client) = mock_client();
    let draft = NewUser {
        name: "Ada".into(),
        email: "not-an-email".into(),
        password: "correct horse".into(),
        avatar_url: None,
    };

    let err = client.users().register(&draft).await.unwrap_err();

    assert_matches!(err, ClientError::Core(CoreError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn activate_then_lock() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = factory.user();
    let user: User = entity(&json);
    let active_json = next_version(&json, json!({ "state": "active" }));
    transport.reply(active_json.clone());

    let active = client.users().activate(&user).await.unwrap();
    assert!(active.is_active());
    assert_eq!(
        transport.last_request().unwrap().path,
        format!("/users/activate/{}", user.id().unwrap())
    );

    let err = client.users().activate(&active).await.unwrap_err();
    assert_eq!(err.to_string(), "already active");

    transport.reply(next_version(&active_json, json!({ "state": "locked" })));
    let locked = client.users().lock(&active).await.unwrap();
    assert!(locked.is_locked());
    assert_eq!(locked.version(), 2);
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({ "expectedVersion": 1 }))
    );
}

#[tokio::test]
async fn unlock_requires_locked() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let user: User = entity(&with(&factory.user(), "state", json!("active")));

    let err = client.users().unlock(&user).await.unwrap_err();

    assert_eq!(err.to_string(), "not locked");
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn update_email_validates_locally() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = factory.user();
    let user: User = entity(&json);

    assert!(client.users().update_email(&user, "nope").await.is_err());
    assert_eq!(transport.request_count(), 0);

    transport.reply(next_version(&json, json!({ "email": "new@example.org" })));
    let updated = client
        .users()
        .update_email(&user, "new@example.org")
        .await
        .unwrap();
    assert_eq!(updated.email, "new@example.org");
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({ "email": "new@example.org", "expectedVersion": 0 }))
    );
}

#[tokio::test]
async fn unauthorized_reply() {
    let (transport, client) = mock_client();
    transport.fail(401, "Unauthorized");

    let err = client.users().get("user-1").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized");
}
