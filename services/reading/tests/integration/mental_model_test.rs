use axum::http::StatusCode;
use sea_orm::EntityTrait;
use serde_json::{Value, json};
use uuid::Uuid;

use bookmind_core::time::now_ms;
use bookmind_domain::id::UserId;
use bookmind_domain::status::MentalModelStatus;
use bookmind_reading::domain::repository::MentalModelRepository;
use bookmind_reading::domain::types::MentalModelChanges;
use bookmind_reading::infra::db::DbMentalModelRepository;
use bookmind_reading_schema::{action_plans, likes, mental_models};

use crate::helpers::{spawn_app, tick};

#[tokio::test]
async fn should_create_with_defaults_and_read_back() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let book = app.create_book("user_a", "vol-1").await;

    let response = app
        .post("/mental-models", "user_a")
        .json(&json!({ "bookId": book["id"], "whyReadAnswer1": "motivation" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();

    assert_eq!(created["status"], "reading");
    assert_eq!(created["userId"], "user_a");
    assert_eq!(created["bookId"], book["id"]);
    assert_eq!(created["whyReadAnswer1"], "motivation");
    for field in [
        "whyReadAnswer2",
        "whyReadAnswer3",
        "whatToGainAnswer1",
        "whatToGainAnswer2",
        "whatToGainAnswer3",
        "goalAfterReadingAnswer1",
        "goalAfterReadingAnswer2",
        "goalAfterReadingAnswer3",
    ] {
        assert_eq!(created[field], "", "{field}");
    }
    assert_eq!(created["book"]["title"], "Thinking in Systems");
    assert!(created["book"].get("createdAt").is_none());
    assert_eq!(created["likesCount"], 0);
    assert_eq!(created["likedByCurrentUser"], false);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let path = format!("/mental-models/{}", created["id"].as_str().unwrap());
    let fetched = app.get(&path, "user_a").await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>(), created);
}

#[tokio::test]
async fn should_reject_unknown_book() {
    let app = spawn_app().await;
    app.register("user_a").await;

    let response = app
        .post("/mental-models", "user_a")
        .json(&json!({
            "bookId": "0199a000-0000-7000-8000-000000000000",
            "whyReadAnswer1": "motivation"
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn should_require_first_answer() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let book = app.create_book("user_a", "vol-1").await;

    let response = app
        .post("/mental-models", "user_a")
        .json(&json!({ "bookId": book["id"], "whyReadAnswer1": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "whyReadAnswer1 is required");
}

#[tokio::test]
async fn should_reject_unknown_status() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let book = app.create_book("user_a", "vol-1").await;

    let response = app
        .post("/mental-models", "user_a")
        .json(&json!({
            "bookId": book["id"],
            "whyReadAnswer1": "motivation",
            "status": "abandoned"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_list_only_own_models_oldest_first() {
    let app = spawn_app().await;
    app.register("user_a").await;
    app.register("user_b").await;
    let first = app.create_mental_model("user_a", "vol-1").await;
    tick().await;
    let second = app.create_mental_model("user_a", "vol-2").await;
    app.create_mental_model("user_b", "vol-3").await;

    let list: Value = app.get("/mental-models", "user_a").await.json();
    let ids: Vec<&Value> = list.as_array().unwrap().iter().map(|m| &m["id"]).collect();
    assert_eq!(ids, vec![&first["id"], &second["id"]]);
}

#[tokio::test]
async fn should_treat_foreign_and_missing_models_alike() {
    let app = spawn_app().await;
    app.register("user_a").await;
    app.register("user_b").await;
    let foreign = app.create_mental_model("user_b", "vol-1").await;

    let foreign_path = format!("/mental-models/{}", foreign["id"].as_str().unwrap());
    let missing_path = "/mental-models/0199a000-0000-7000-8000-000000000000";
    for path in [foreign_path.as_str(), missing_path] {
        let response = app.delete(path, "user_a").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "MENTAL_MODEL_NOT_FOUND");

        let response = app.get(path, "user_a").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = app
            .patch(path, "user_a")
            .json(&json!({ "status": "completed" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    // The owner still sees it untouched.
    let owned: Value = app.get(&foreign_path, "user_b").await.json();
    assert_eq!(owned["status"], "reading");
}

#[tokio::test]
async fn should_merge_partial_update() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let created = app.create_mental_model("user_a", "vol-1").await;
    let path = format!("/mental-models/{}", created["id"].as_str().unwrap());
    tick().await;

    let response = app
        .patch(&path, "user_a")
        .json(&json!({
            "whatToGainAnswer2": "patience",
            "bookId": "0199a000-0000-7000-8000-000000000000"
        }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["whyReadAnswer1"], "motivation");
    assert_eq!(updated["whatToGainAnswer2"], "patience");
    assert_eq!(updated["bookId"], created["bookId"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let created = app.create_mental_model("user_a", "vol-1").await;
    let path = format!("/mental-models/{}", created["id"].as_str().unwrap());

    let response = app.patch(&path, "user_a").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_refuse_stale_update() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let created = app.create_mental_model("user_a", "vol-1").await;
    let path = format!("/mental-models/{}", created["id"].as_str().unwrap());
    tick().await;

    let first = app
        .patch(&path, "user_a")
        .json(&json!({
            "status": "completed",
            "expectedUpdatedAt": created["updatedAt"]
        }))
        .await;
    first.assert_status_ok();
    let first: Value = first.json();
    tick().await;

    let stale = app
        .patch(&path, "user_a")
        .json(&json!({
            "status": "reading",
            "expectedUpdatedAt": created["updatedAt"]
        }))
        .await;
    stale.assert_status(StatusCode::CONFLICT);
    let body: Value = stale.json();
    assert_eq!(body["code"], "CONFLICT");

    let current: Value = app.get(&path, "user_a").await.json();
    assert_eq!(current["status"], "completed");
    assert_eq!(current["updatedAt"], first["updatedAt"]);
}

#[tokio::test]
async fn should_cascade_delete_to_likes_and_action_plans() {
    let app = spawn_app().await;
    app.register("user_a").await;
    app.register("user_b").await;
    let created = app.create_mental_model("user_a", "vol-1").await;
    let id = created["id"].as_str().unwrap();

    app.post(&format!("/likes/mental-models/{id}"), "user_b")
        .await
        .assert_status_ok();
    app.post(&format!("/action-plans/mental-models/{id}"), "user_a")
        .json(&json!({ "content": "read one chapter a day" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.delete(&format!("/mental-models/{id}"), "user_a").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "success": true }));

    assert!(mental_models::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(likes::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(action_plans::Entity::find().all(&app.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_write_only_while_row_carries_expected_timestamp() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let book = app.create_book("user_a", "vol-1").await;
    let created: Value = app
        .post("/mental-models", "user_a")
        .json(&json!({ "bookId": book["id"], "whyReadAnswer1": "motivation" }))
        .await
        .json();
    let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
    let stored = mental_models::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();

    let repo = DbMentalModelRepository { db: app.db.clone() };
    let owner = UserId::from("user_a");
    let changes = MentalModelChanges {
        status: Some(MentalModelStatus::Completed),
        ..Default::default()
    };
    let stale = stored.updated_at - chrono::Duration::seconds(1);
    let written = repo
        .update(id, &owner, &changes, Some(stale), now_ms())
        .await
        .unwrap();
    assert!(!written);

    let written = repo
        .update(id, &owner, &changes, Some(stored.updated_at), now_ms())
        .await
        .unwrap();
    assert!(written);
    let row = mental_models::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "completed");
}
