use axum::http::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::spawn_app_with_catalog;

async fn catalog() -> (MockServer, String) {
    let server = MockServer::start().await;
    let base_url = format!("{}/books/v1/volumes", server.uri());
    (server, base_url)
}

#[tokio::test]
async fn should_proxy_catalog_search_without_identity() {
    let (server, base_url) = catalog().await;
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("q", "systems"))
        .and(query_param("maxResults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "vol-1",
                "volumeInfo": {
                    "title": "Thinking in Systems",
                    "authors": ["Donella H. Meadows", "Diana Wright"],
                    "pageCount": 240
                }
            }]
        })))
        .mount(&server)
        .await;
    let app = spawn_app_with_catalog(&base_url).await;

    let response = app.server.get("/google-books/search?q=systems").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!([{
            "googleBookId": "vol-1",
            "title": "Thinking in Systems",
            "authors": "Donella H. Meadows, Diana Wright",
            "thumbnailUrl": null,
            "description": null,
            "publisher": null,
            "publishedDate": null,
            "pageCount": 240
        }])
    );
}

#[tokio::test]
async fn should_validate_search_parameters() {
    let (_server, base_url) = catalog().await;
    let app = spawn_app_with_catalog(&base_url).await;

    for query in [
        "/google-books/search?q=",
        "/google-books/search?q=a&maxResults=41",
        "/google-books/search?q=a&maxResults=0",
        "/google-books/search?q=a&maxResults=many",
    ] {
        let response = app.server.get(query).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR", "query {query}");
    }
}

#[tokio::test]
async fn should_map_unknown_volume_to_book_not_found() {
    let (server, base_url) = catalog().await;
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = spawn_app_with_catalog(&base_url).await;

    let response = app.server.get("/google-books/missing").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn should_surface_upstream_failure() {
    let (server, base_url) = catalog().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = spawn_app_with_catalog(&base_url).await;

    let response = app.server.get("/google-books/search?q=systems").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "GOOGLE_BOOKS_API_ERROR");
    assert_eq!(body["error"], "Google Books API error: Internal Server Error");
}
