//! Integration tests for the admin login route.

mod common;

use common::TestHarness;

async fn login(addr: std::net::SocketAddr, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/api/login"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn login_success_returns_stored_role() {
    let (h, addr) = TestHarness::with_server().await;
    let user = folio_db::queries::users::create_user(&h.conn(), "editor", "pw", "Editor-In-Chief")
        .unwrap();

    let resp = login(addr, serde_json::json!({"username": "editor", "password": "pw"})).await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "editor");
    assert_eq!(json["user"]["role"], "Editor-In-Chief");
    assert!(json["user"].get("password").is_none());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_identical() {
    let (h, addr) = TestHarness::with_server().await;
    h.create_user("admin", "correct-password");

    let wrong = login(addr, serde_json::json!({"username": "admin", "password": "nope"})).await;
    let unknown = login(addr, serde_json::json!({"username": "ghost", "password": "nope"})).await;

    assert_eq!(wrong.status(), 401);
    assert_eq!(unknown.status(), 401);
    let wrong: serde_json::Value = wrong.json().await.unwrap();
    let unknown: serde_json::Value = unknown.json().await.unwrap();
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["success"], false);
    assert_eq!(wrong["error"], "Invalid credentials");
}

#[tokio::test]
async fn password_match_is_exact() {
    let (h, addr) = TestHarness::with_server().await;
    h.create_user("admin", "Secret");

    let resp = login(addr, serde_json::json!({"username": "admin", "password": "secret"})).await;
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn missing_fields_are_unauthorized() {
    let (h, addr) = TestHarness::with_server().await;
    h.create_user("admin", "pw");

    let resp = login(addr, serde_json::json!({"username": "admin"})).await;
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn non_json_body_is_unauthorized_envelope() {
    let (h, addr) = TestHarness::with_server().await;
    h.create_user("admin", "pw");

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/login"))
        .header("content-type", "text/plain")
        .body("username=admin&password=pw")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid credentials");
}
