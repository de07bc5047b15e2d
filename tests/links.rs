//! End-to-end flow for the links resource.

use reqwest::{Method, StatusCode};
use sdk_rust::{GatewayError, LinkCreate};

mod common;

const LINK_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";
const OTHER_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f7";

fn link(id: &str, user_id: &str) -> LinkCreate {
    LinkCreate {
        id: id.into(),
        title: "Rust".into(),
        url: "https://www.rust-lang.org".into(),
        images: vec!["https://www.rust-lang.org/logos/rust-logo-512x512.png".into()],
        tags: vec!["lang".into(), "systems".into()],
        user_id: user_id.into(),
    }
}

#[tokio::test]
async fn test_link_round_trip() {
    let gateway = common::start_in_process().await;
    let input = link(LINK_ID, "u1");
    gateway.client.create_link(&input).await.unwrap();

    let fetched = gateway.client.get_link(LINK_ID).await.unwrap();
    assert_eq!(fetched.id, input.id);
    assert_eq!(fetched.title, input.title);
    assert_eq!(fetched.url, input.url);
    assert_eq!(fetched.images, input.images);
    assert_eq!(fetched.tags, input.tags);
    assert_eq!(fetched.user_id, input.user_id);
    assert!(!fetched.created_at.is_empty());

    assert_eq!(gateway.client.list_links().await.unwrap(), vec![fetched]);
}

#[tokio::test]
async fn test_links_by_user() {
    let gateway = common::start_in_process().await;
    gateway.client.create_link(&link(LINK_ID, "u1")).await.unwrap();
    gateway.client.create_link(&link(OTHER_ID, "u2")).await.unwrap();

    let mine = gateway.client.links_by_user("u1").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, LINK_ID);

    assert!(gateway.client.links_by_user("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_link() {
    let gateway = common::start_in_process().await;
    gateway.client.create_link(&link(LINK_ID, "u1")).await.unwrap();

    let mut changed = link("", "u1");
    changed.title = "The Rust Book".into();
    changed.tags = vec![];
    gateway.client.update_link(LINK_ID, &changed).await.unwrap();

    let fetched = gateway.client.get_link(LINK_ID).await.unwrap();
    assert_eq!(fetched.title, "The Rust Book");
    assert!(fetched.tags.is_empty());

    gateway.client.delete_link(LINK_ID).await.unwrap();
    match gateway.client.get_link(LINK_ID).await {
        Err(GatewayError::Api { status, body }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body.code, "not_found");
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_link_unknown_field_rejected() {
    let gateway = common::start_in_process().await;

    let res = gateway
        .client
        .send_raw(
            Method::POST,
            "/links",
            Some("application/json"),
            r#"{"id":"65a1f0c2e4b0a1b2c3d4e5f6","owner":"u1"}"#,
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "unknown field \"owner\"");
    assert!(gateway.client.list_links().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_link_id() {
    let gateway = common::start_in_process().await;

    match gateway.client.create_link(&link("not-hex", "u1")).await {
        Err(GatewayError::Api { status, body }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.code, "bad_request");
            assert_eq!(body.message, None);
        }
        other => panic!("expected bad request, got {other:?}"),
    }
}
