mod common;

use assert_matches::assert_matches;
use biobank_client::transport::HttpMethod;
use biobank_client::ClientError;
use biobank_core::centre::{Centre, NewCentre};
use biobank_core::entity::ConcurrencySafeEntity;
use biobank_core::error::CoreError;
use biobank_core::filter::{FilterName, FilterSet, SearchFilter};
use biobank_core::paging::PagerOptions;
use biobank_core::sort::SortOrder;
use biobank_fixtures::factory::{entity, next_version, paged, with};
use biobank_fixtures::EntityFactory;
use serde_json::json;

use common::{mock_client, version_conflict};

#[tokio::test]
async fn get_validates_reply() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = factory.centre();
    transport.reply(json!({ "data": json }));

    let centre = client.centres().get("centre-1").await.unwrap();

    assert_eq!(centre.id(), Some("centre-1"));
    assert!(centre.is_disabled());
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "/centres/centre-1");
}

#[tokio::test]
async fn update_name_echoes_version() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = with(&factory.centre(), "version", json!(3));
    let centre: Centre = entity(&json);
    transport.reply(next_version(&json, json!({ "name": "Renamed" })));

    let updated = client.centres().update_name(&centre, "Renamed").await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, format!("/centres/name/{}", json["id"].as_str().unwrap()));
    assert_eq!(
        request.body,
        Some(json!({ "name": "Renamed", "expectedVersion": 3 }))
    );
    assert_eq!(updated.version(), 4);
    assert_eq!(updated.name, "Renamed");
    // The caller's copy is untouched.
    assert_eq!(centre.version(), 3);
}

#[tokio::test]
async fn enable_posts_transition() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = factory.centre();
    let centre: Centre = entity(&json);
    transport.reply(next_version(&json, json!({ "state": "enabled" })));

    let enabled = client.centres().enable(&centre).await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.path, format!("/centres/enable/{}", centre.id().unwrap()));
    assert_eq!(request.body, Some(json!({ "expectedVersion": 0 })));
    assert!(enabled.is_enabled());
    assert_eq!(enabled.version(), 1);
}

#[tokio::test]
async fn disable_when_disabled_fails_locally() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let centre: Centre = entity(&factory.centre());

    let err = client.centres().disable(&centre).await.unwrap_err();

    assert_eq!(err.to_string(), "already disabled");
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn unpersisted_centre_issues_no_request() {
    let (transport, client) = mock_client();
    let centre = Centre::new("Draft");

    let err = client.centres().update_name(&centre, "Other").await.unwrap_err();
    assert_matches!(err, ClientError::Core(CoreError::NotPersisted { .. }));
    assert!(err.to_string().contains("has not been persisted"));

    let err = client.centres().remove_study(&centre, "study-1").await.unwrap_err();
    assert!(err.to_string().contains("has not been persisted"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn remove_study_embeds_version_in_path() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = with(
        &factory.centre(),
        "studyNames",
        json!([{ "id": "study-9", "name": "Study 9" }]),
    );
    let json = with(&json, "version", json!(2));
    let centre: Centre = entity(&json);
    transport.reply(next_version(&json, json!({ "studyNames": [] })));

    let updated = client.centres().remove_study(&centre, "study-9").await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(
        request.path,
        format!("/centres/studies/{}/2/study-9", centre.id().unwrap())
    );
    assert!(!updated.has_study("study-9"));
    assert_eq!(updated.version(), 3);
}

#[tokio::test]
async fn remove_absent_study_fails_locally() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let centre: Centre = entity(&factory.centre());

    let err = client.centres().remove_study(&centre, "study-9").await.unwrap_err();

    assert!(err.to_string().contains("ID not present"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn version_conflict_is_surfaced_unchanged() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let centre: Centre = entity(&factory.centre());
    version_conflict(&transport);

    let err = client.centres().update_name(&centre, "Renamed").await.unwrap_err();

    assert!(err.is_version_conflict());
    assert_eq!(err.status(), Some(400));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn reply_missing_required_property_is_rejected() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let json = factory.centre();
    let centre: Centre = entity(&json);
    let mut reply = next_version(&json, json!({ "name": "Renamed" }));
    reply.as_object_mut().unwrap().remove("studyNames");
    transport.reply(reply);

    let err = client.centres().update_name(&centre, "Renamed").await.unwrap_err();

    assert_matches!(
        err,
        ClientError::Core(CoreError::MissingProperty { property: "studyNames", .. })
    );
    assert!(err.to_string().contains("Missing required property"));
}

#[tokio::test]
async fn add_validates_before_sending() {
    let (transport, client) = mock_client();
    let draft = NewCentre {
        name: "x".into(),
        description: None,
    };

    let err = client.centres().add(&draft).await.unwrap_err();

    assert_matches!(err, ClientError::Core(CoreError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn list_sends_filter_sort_and_paging() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let items = vec![factory.centre(), factory.centre()];
    transport.reply(paged(items, 2, 1, 5));

    let filters = FilterSet::new()
        .with(FilterName::Name, SearchFilter::name())
        .with(FilterName::State, SearchFilter::state().with_value("disabled"));
    let options = PagerOptions {
        filter: filters.to_filter_string(),
        sort: Some(SortOrder::ascending("name")),
        ..PagerOptions::default()
    };
    let page = client.centres().list(&options).await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.path, "/centres/search");
    assert_eq!(request.query_param("filter"), Some("state::disabled"));
    assert_eq!(request.query_param("sort"), Some("name"));
    assert_eq!(request.query_param("page"), Some("1"));
    assert_eq!(request.query_param("limit"), Some("5"));
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn list_items_are_validated() {
    let (transport, client) = mock_client();
    let mut factory = EntityFactory::new();
    let mut bad = factory.centre();
    bad.as_object_mut().unwrap().remove("state");
    transport.reply(paged(vec![factory.centre(), bad], 2, 1, 5));

    let err = client.centres().list(&PagerOptions::default()).await.unwrap_err();

    assert!(err.to_string().contains("Missing required property: state"));
}

#[tokio::test]
async fn counts_by_state() {
    let (transport, client) = mock_client();
    transport.reply(biobank_fixtures::factory::counts(
        7,
        &[("disabled", 2), ("enabled", 5)],
    ));

    let counts = client.centres().counts().await.unwrap();

    assert_eq!(counts.total, 7);
    assert_eq!(counts.in_state("disabled"), 2);
    assert_eq!(counts.in_state("enabled"), 5);
    assert_eq!(transport.last_request().unwrap().path, "/centres/counts");
}
