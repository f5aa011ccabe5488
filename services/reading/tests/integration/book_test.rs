use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::spawn_app;

#[tokio::test]
async fn should_return_existing_book_for_same_catalog_id() {
    let app = spawn_app().await;
    app.register("user_a").await;

    let first = app.create_book("user_a", "vol-1").await;
    let second = app
        .post("/books", "user_a")
        .json(&json!({
            "googleBookId": "vol-1",
            "title": "A Different Title",
            "authors": "Someone Else"
        }))
        .await;
    second.assert_status_ok();
    let second: Value = second.json();

    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["title"], "Thinking in Systems");
    assert_eq!(second["createdAt"], first["createdAt"]);
}

#[tokio::test]
async fn should_fetch_book_by_internal_id() {
    let app = spawn_app().await;
    app.register("user_a").await;
    let book = app.create_book("user_a", "vol-1").await;

    let path = format!("/books/{}", book["id"].as_str().unwrap());
    let fetched: Value = app.get(&path, "user_a").await.json();
    assert_eq!(fetched, book);
}

#[tokio::test]
async fn should_return_book_not_found_for_unknown_or_malformed_id() {
    let app = spawn_app().await;
    app.register("user_a").await;

    for id in ["0199a000-0000-7000-8000-000000000000", "not-a-uuid"] {
        let response = app.get(&format!("/books/{id}"), "user_a").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "BOOK_NOT_FOUND");
        assert_eq!(body["error"], format!("Book with id {id} not found"));
    }
}

#[tokio::test]
async fn should_reject_book_without_title() {
    let app = spawn_app().await;
    app.register("user_a").await;

    let response = app
        .post("/books", "user_a")
        .json(&json!({ "googleBookId": "vol-1" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
