//! Integration tests for the non-API surface: health, docs, static files,
//! and cross-cutting middleware.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health() {
    let (_h, addr) = TestHarness::with_server().await;
    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn openapi_document() {
    let (_h, addr) = TestHarness::with_server().await;
    let json: serde_json::Value = reqwest::get(format!("http://{addr}/api-docs/openapi.json"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let paths = json["paths"].as_object().unwrap();
    for path in [
        "/api/login",
        "/api/images/home",
        "/api/images/about",
        "/api/images/work",
        "/api/images/upload",
        "/api/images/{id}",
        "/api/images/{page}/{id}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(json["paths"]["/api/images/{id}"]["put"].is_object());
}

#[tokio::test]
async fn request_id_round_trip() {
    let (_h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/api/images/home"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "trace-me");

    let resp = client
        .get(format!("http://{addr}/api/images/home"))
        .send()
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn static_images_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("placeholder.svg"), "<svg/>").unwrap();

    let mut config = folio_core::config::Config::default();
    config.server.static_dir = Some(dir.path().to_path_buf());
    let (_h, addr) = TestHarness::with_server_config(config).await;

    let resp = reqwest::get(format!("http://{addr}/images/placeholder.svg"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "<svg/>");

    let resp = reqwest::get(format!("http://{addr}/images/missing.svg"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (_h, addr) = TestHarness::with_server().await;
    let resp = reqwest::get(format!("http://{addr}/api/nope")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn wrong_method_on_static_segment_is_json() {
    let (_h, addr) = TestHarness::with_server().await;
    let resp = reqwest::Client::new()
        .put(format!("http://{addr}/api/images/home"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["success"], false);
}
