//! Runs the full client over the `reqwest` transport against a local mock server.

use http_codec_client::{Client, ClientConfig, ErrorKind, ReqwestTransport, RequestOptions};
use mockito::Matcher;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Item {
    id: u64,
    name: String,
}

#[tokio::test]
async fn test_get_with_query_and_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/items")
        .match_query(Matcher::Exact("page=1&page=2".into()))
        .match_header("x-request-id", "abc")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#)
        .create_async()
        .await;

    let client = Client::new();
    let options = RequestOptions::new()
        .with_header("X-Request-Id", "abc")
        .with_query("page", "2");
    let url = format!("{}/items?page=1", server.url());

    let items: Vec<Item> = client.get(&url, &options).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "b");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/items")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"id": 0, "name": "new"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":5,"name":"new"}"#)
        .create_async()
        .await;

    let client = Client::with_config(ClientConfig {
        enable_logging: true,
        ..Default::default()
    });
    let created: Item = client
        .post(
            &format!("{}/items", server.url()),
            &RequestOptions::default_json(),
            &Item {
                id: 0,
                name: "new".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(created.id, 5);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_discards_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/items/5")
        .with_status(204)
        .create_async()
        .await;

    Client::new()
        .delete_discard(&format!("{}/items/5", server.url()), &RequestOptions::new())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let err = Client::new()
        .get::<serde_json::Value>("http://127.0.0.1:1/unreachable", &RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_preconfigured_reqwest_client() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/whoami")
        .match_header("user-agent", "inventory-sync/2.1")
        .match_header("x-tenant", "acme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1,"name":"acme"}"#)
        .create_async()
        .await;

    let mut defaults = reqwest::header::HeaderMap::new();
    defaults.insert("x-tenant", reqwest::header::HeaderValue::from_static("acme"));
    let inner = reqwest::Client::builder()
        .user_agent("inventory-sync/2.1")
        .default_headers(defaults)
        .build()
        .unwrap();

    let client = Client::with_transport(ReqwestTransport::from_client(inner));
    let me: Item = client
        .get(&format!("{}/whoami", server.url()), &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(me.name, "acme");
    mock.assert_async().await;
}
