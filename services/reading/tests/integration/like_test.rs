use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn should_like_idempotently() {
    let app = spawn_app().await;
    app.register("owner").await;
    app.register("fan").await;
    let model = app.create_mental_model("owner", "vol-1").await;
    let path = format!("/likes/mental-models/{}", model["id"].as_str().unwrap());

    let first = app.post(&path, "fan").await;
    first.assert_status_ok();
    let first: Value = first.json();
    let second = app.post(&path, "fan").await;
    second.assert_status_ok();
    let second: Value = second.json();

    assert_eq!(first, second);
    assert_eq!(first["userId"], "fan");
    assert_eq!(first["mentalModelId"], model["id"]);

    let owner_view: Value = app
        .get(&format!("/mental-models/{}", model["id"].as_str().unwrap()), "owner")
        .await
        .json();
    assert_eq!(owner_view["likesCount"], 1);
    assert_eq!(owner_view["likedByCurrentUser"], false);
}

#[tokio::test]
async fn should_list_liked_models_for_caller() {
    let app = spawn_app().await;
    app.register("owner").await;
    app.register("fan").await;
    let model = app.create_mental_model("owner", "vol-1").await;
    let path = format!("/likes/mental-models/{}", model["id"].as_str().unwrap());
    app.post(&path, "fan").await.assert_status_ok();

    let liked: Value = app.get("/likes/mental-models", "fan").await.json();
    let liked = liked.as_array().unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0]["id"], model["id"]);
    assert_eq!(liked[0]["likedByCurrentUser"], true);
    assert_eq!(liked[0]["likesCount"], 1);
    assert_eq!(liked[0]["book"]["title"], "Thinking in Systems");

    let owner_liked: Value = app.get("/likes/mental-models", "owner").await.json();
    assert_eq!(owner_liked, serde_json::json!([]));
}

#[tokio::test]
async fn should_fail_unlike_when_not_liked() {
    let app = spawn_app().await;
    app.register("owner").await;
    app.register("fan").await;
    let model = app.create_mental_model("owner", "vol-1").await;
    let path = format!("/likes/mental-models/{}", model["id"].as_str().unwrap());
    app.post(&path, "fan").await.assert_status_ok();

    let first = app.delete(&path, "fan").await;
    first.assert_status_ok();
    assert_eq!(first.json::<Value>()["success"], true);

    let second = app.delete(&path, "fan").await;
    second.assert_status(StatusCode::NOT_FOUND);
    let body: Value = second.json();
    assert_eq!(body["code"], "LIKE_NOT_FOUND");
}

#[tokio::test]
async fn should_fail_like_for_missing_model() {
    let app = spawn_app().await;
    app.register("fan").await;

    let response = app
        .post(
            "/likes/mental-models/0199a000-0000-7000-8000-000000000000",
            "fan",
        )
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "MENTAL_MODEL_NOT_FOUND");
}
