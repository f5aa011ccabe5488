use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{spawn_app, tick};

#[tokio::test]
async fn should_reject_mutations_without_identity_header() {
    let app = spawn_app().await;

    let create = app
        .server
        .post("/mental-models")
        .json(&json!({ "bookId": "x", "whyReadAnswer1": "motivation" }))
        .await;
    create.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = create.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], "Unauthorized");

    let delete = app.server.delete("/action-plans/anything").await;
    delete.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_unknown_user() {
    let app = spawn_app().await;

    let response = app.get("/mental-models", "ghost").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "USER_NOT_FOUND");
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn should_upsert_profile_on_callback() {
    let app = spawn_app().await;
    let first = app.register("user_a").await;
    tick().await;

    let second = app
        .server
        .post("/auth/callback")
        .json(&json!({
            "id": "user_a",
            "email": "renamed@example.com",
            "firstName": "Renamed",
            "organizationId": "org_1"
        }))
        .await;
    second.assert_status_ok();
    let second: Value = second.json();
    assert_eq!(second["createdAt"], first["createdAt"]);
    assert_ne!(second["updatedAt"], first["updatedAt"]);
    assert_eq!(second["emailVerified"], false);

    let me: Value = app.get("/users/me", "user_a").await.json();
    assert_eq!(me["email"], "renamed@example.com");
    assert_eq!(me["firstName"], "Renamed");
    assert_eq!(me["organizationId"], "org_1");
    assert!(me["lastName"].is_null());
}

#[tokio::test]
async fn should_reject_callback_without_email() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/auth/callback")
        .json(&json!({ "id": "user_a", "email": "  " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn should_report_health_and_readiness() {
    let app = spawn_app().await;

    let health = app.server.get("/healthz").await;
    health.assert_status_ok();
    assert!(health.headers().get("x-request-id").is_some());

    app.server.get("/readyz").await.assert_status_ok();
}
