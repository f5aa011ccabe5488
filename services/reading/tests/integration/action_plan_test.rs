use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, spawn_app, tick};

async fn completed_model(app: &TestApp, user: &str) -> String {
    let model = app.create_mental_model(user, "vol-1").await;
    let id = model["id"].as_str().unwrap().to_owned();
    app.patch(&format!("/mental-models/{id}"), user)
        .json(&json!({ "status": "completed" }))
        .await
        .assert_status_ok();
    id
}

#[tokio::test]
async fn should_add_plans_after_completion_in_creation_order() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let id = completed_model(&app, "user_a").await;
    let path = format!("/action-plans/mental-models/{id}");

    let first = app
        .post(&path, "user_a")
        .json(&json!({ "content": "read one chapter a day" }))
        .await;
    first.assert_status(StatusCode::CREATED);
    let first: Value = first.json();
    assert_eq!(first["mentalModelId"], id.as_str());
    tick().await;
    let second: Value = app
        .post(&path, "user_a")
        .json(&json!({ "content": "summarise each chapter" }))
        .await
        .json();

    let list: Value = app.get(&path, "user_a").await.json();
    let contents: Vec<&Value> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| &p["content"])
        .collect();
    assert_eq!(contents, vec![&first["content"], &second["content"]]);
}

#[tokio::test]
async fn should_update_and_delete_plan() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let id = completed_model(&app, "user_a").await;
    let plan: Value = app
        .post(&format!("/action-plans/mental-models/{id}"), "user_a")
        .json(&json!({ "content": "before" }))
        .await
        .json();
    let plan_path = format!("/action-plans/{}", plan["id"].as_str().unwrap());
    tick().await;

    let updated = app
        .patch(&plan_path, "user_a")
        .json(&json!({ "content": "after", "expectedUpdatedAt": plan["updatedAt"] }))
        .await;
    updated.assert_status_ok();
    let updated: Value = updated.json();
    assert_eq!(updated["content"], "after");
    assert_eq!(updated["createdAt"], plan["createdAt"]);

    let stale = app
        .patch(&plan_path, "user_a")
        .json(&json!({ "content": "lost", "expectedUpdatedAt": plan["updatedAt"] }))
        .await;
    stale.assert_status(StatusCode::CONFLICT);

    let blank = app
        .patch(&plan_path, "user_a")
        .json(&json!({ "content": "" }))
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);

    let deleted = app.delete(&plan_path, "user_a").await;
    deleted.assert_status_ok();
    let again = app.delete(&plan_path, "user_a").await;
    again.assert_status(StatusCode::NOT_FOUND);
    let body: Value = again.json();
    assert_eq!(body["code"], "ACTION_PLAN_NOT_FOUND");
}

#[tokio::test]
async fn should_hide_plans_from_other_users() {
    let app = spawn_app().await;
    app.register("user_a").await;
    app.register("user_b").await;
    let id = completed_model(&app, "user_a").await;
    let plan: Value = app
        .post(&format!("/action-plans/mental-models/{id}"), "user_a")
        .json(&json!({ "content": "private" }))
        .await
        .json();

    let list = app
        .get(&format!("/action-plans/mental-models/{id}"), "user_b")
        .await;
    list.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(list.json::<Value>()["code"], "MENTAL_MODEL_NOT_FOUND");

    let patch = app
        .patch(&format!("/action-plans/{}", plan["id"].as_str().unwrap()), "user_b")
        .json(&json!({ "content": "hijacked" }))
        .await;
    patch.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(patch.json::<Value>()["code"], "ACTION_PLAN_NOT_FOUND");
}

#[tokio::test]
async fn should_require_plan_content() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let id = completed_model(&app, "user_a").await;

    let response = app
        .post(&format!("/action-plans/mental-models/{id}"), "user_a")
        .json(&json!({ "content": "  " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
}
