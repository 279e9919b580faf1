//! End-to-end behavior of the resource API, driven through the full router.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use mflix_api::config::ApiConfig;
use mflix_api::store::{Collection, Document, MemoryStore, Store};
use mflix_api::ObjectId;

mod common;
use common::{app, app_with, created_id, send, CountingStore, PanicStore};

fn movie_doc(title: &str) -> Document {
    match json!({ "title": title, "year": 1999 }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn test_movie_lifecycle() {
    let router = app(Arc::new(MemoryStore::new()));
    let path_id = ObjectId::generate();

    let (status, body) = send(&router, Method::POST, &format!("/api/movies/{}", path_id), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "Movie created successfully");
    assert_eq!(body["data"]["movie"]["title"], "Warhammer New Days");
    let id = created_id(&body, "movie");
    assert_ne!(id, path_id.to_hex());

    let (status, fetched) = send(&router, Method::GET, &format!("/api/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["movie"], body["data"]["movie"]);

    let (status, updated) = send(&router, Method::PUT, &format!("/api/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Movie updated successfully");
    assert!(updated["data"]["movie"]["plot"]
        .as_str()
        .unwrap()
        .ends_with("Never mind Humanity will survive"));

    let (status, deleted) = send(&router, Method::DELETE, &format!("/api/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["movie"]["deletedCount"], 1);
    assert_eq!(deleted["data"]["movie"]["acknowledged"], true);

    let (status, missing) = send(&router, Method::GET, &format!("/api/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "Movie not found");
}

#[tokio::test]
async fn test_malformed_ids_never_reach_store() {
    let router = app(Arc::new(PanicStore));
    let valid = ObjectId::generate().to_hex();

    let cases = [
        (Method::GET, "/api/movies/123".to_string(), "Invalid movie ID"),
        (Method::PUT, "/api/movies/zzzzzzzzzzzzzzzzzzzzzzzz".to_string(), "Invalid movie ID"),
        (Method::DELETE, "/api/theaters/abc".to_string(), "Invalid theater ID"),
        (Method::POST, "/api/theaters/573a1390f29313caabcd413".to_string(), "Invalid theater ID"),
        (Method::GET, "/api/movies/bad/comments".to_string(), "Invalid movie ID"),
        (Method::GET, "/api/movies/bad/comments/bad".to_string(), "Invalid movie ID"),
        (Method::DELETE, format!("/api/movies/{}/comments/bad", valid), "Invalid comment ID"),
    ];

    for (method, uri, message) in cases {
        let (status, body) = send(&router, method, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["message"], message, "{}", uri);
        assert_eq!(body["error"], "ID format is incorrect");
    }
}

#[tokio::test]
async fn test_id_checked_before_body() {
    let router = app(Arc::new(PanicStore));
    let (status, body) = send(&router, Method::POST, "/api/movies/nope", Some("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid movie ID");
}

#[tokio::test]
async fn test_unsupported_methods() {
    let store = CountingStore::default();
    let router = app(Arc::new(store.clone()));
    let id = ObjectId::generate();

    let cases = [
        (Method::PUT, "/api/movies".to_string()),
        (Method::POST, "/api/movies".to_string()),
        (Method::DELETE, "/api/theaters".to_string()),
        (Method::POST, format!("/api/movies/{}/comments", id)),
        (Method::PATCH, format!("/api/movies/{}", id)),
    ];

    for (method, uri) in cases {
        let (status, body) = send(&router, method.clone(), &uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
        assert_eq!(body["status"], 405);
        assert_eq!(body["message"], "Method Not Allowed");
        assert_eq!(body["error"], format!("{} method is not supported", method));
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_undecodable_segments_are_invalid_ids() {
    let router = app(Arc::new(PanicStore));
    let valid = ObjectId::generate().to_hex();

    let cases = [
        (Method::GET, "/api/movies/%FF".to_string(), "Invalid movie ID"),
        (Method::PUT, "/api/theaters/%FF".to_string(), "Invalid theater ID"),
        (Method::GET, "/api/movies/%FF/comments".to_string(), "Invalid movie ID"),
        (Method::DELETE, "/api/movies/%FF/comments/%FE".to_string(), "Invalid movie ID"),
        (Method::GET, format!("/api/movies/{}/comments/%FE", valid), "Invalid comment ID"),
    ];

    for (method, uri, message) in cases {
        let (status, body) = send(&router, method, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], message, "{}", uri);
        assert_eq!(body["error"], "ID format is incorrect");
    }
}

#[tokio::test]
async fn test_head_is_not_served_by_get() {
    let store = CountingStore::default();
    let router = app(Arc::new(store.clone()));

    for uri in ["/api/movies".to_string(), format!("/api/theaters/{}", ObjectId::generate())] {
        let request = Request::builder()
            .method(Method::HEAD)
            .uri(&uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_absent_ids_are_not_found() {
    let router = app(Arc::new(MemoryStore::new()));
    let zero = "000000000000000000000000";

    let (status, body) = send(&router, Method::DELETE, &format!("/api/theaters/{}", zero), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Theater not found");
    assert_eq!(body["error"], "No theater found with the given ID");

    let (status, body) = send(&router, Method::PUT, &format!("/api/movies/{}", zero), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No movie found with the given ID");

    let uri = format!("/api/movies/{}/comments/{}", zero, zero);
    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Comment not found");
}

#[tokio::test]
async fn test_list_is_capped() {
    let store = MemoryStore::new();
    for i in 0..15 {
        store
            .insert_one(Collection::Movies, movie_doc(&format!("Movie {}", i)))
            .await
            .unwrap();
    }
    let router = app(Arc::new(store));

    let (status, body) = send(&router, Method::GET, "/api/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["movies"].as_array().unwrap().len(), 10);

    let (status, body) = send(&router, Method::GET, "/api/theaters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["theaters"], json!([]));
}

#[tokio::test]
async fn test_comments_are_scoped_to_their_movie() {
    let router = app(Arc::new(MemoryStore::new()));
    let movie = ObjectId::generate().to_hex();
    let other = ObjectId::generate().to_hex();
    let path = ObjectId::generate().to_hex();

    let uri = format!("/api/movies/{}/comments/{}", movie, path);
    let (status, body) = send(&router, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Comment created successfully");
    assert_eq!(body["data"]["comment"]["movie_id"], movie.as_str());
    let comment = created_id(&body, "comment");

    let (status, _) = send(&router, Method::GET, &format!("/api/movies/{}/comments/{}", movie, comment), None).await;
    assert_eq!(status, StatusCode::OK);

    let wrong = format!("/api/movies/{}/comments/{}", other, comment);
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = send(&router, method, &wrong, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Comment not found");
    }

    let (_, listed) = send(&router, Method::GET, &format!("/api/movies/{}/comments", movie), None).await;
    assert_eq!(listed["data"]["comments"].as_array().unwrap().len(), 1);
    let (_, listed) = send(&router, Method::GET, &format!("/api/movies/{}/comments", other), None).await;
    assert_eq!(listed["data"]["comments"], json!([]));
}

#[tokio::test]
async fn test_comment_update_keeps_parent() {
    let router = app(Arc::new(MemoryStore::new()));
    let movie = ObjectId::generate().to_hex();
    let uri = format!("/api/movies/{}/comments/{}", movie, ObjectId::generate());
    let (_, body) = send(&router, Method::POST, &uri, None).await;
    let comment = created_id(&body, "comment");

    let uri = format!("/api/movies/{}/comments/{}", movie, comment);
    let payload = format!(r#"{{"name":"Ned","email":"ned@example.com","text":"Edited","date":"2025-05-01T00:00:00.000Z","movie_id":"{}"}}"#, ObjectId::generate());
    let (status, body) = send(&router, Method::PUT, &uri, Some(&payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["comment"]["text"], "Edited");
    assert_eq!(body["data"]["comment"]["movie_id"], movie.as_str());

    let (status, _) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_comment_parent_enforcement() {
    let mut config = ApiConfig::default();
    config.store.enforce_comment_parent = true;
    let router = app_with(config, Arc::new(MemoryStore::new()));

    let orphan = format!("/api/movies/{}/comments/{}", ObjectId::generate(), ObjectId::generate());
    let (status, body) = send(&router, Method::POST, &orphan, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Movie not found");

    let (_, body) = send(&router, Method::POST, &format!("/api/movies/{}", ObjectId::generate()), None).await;
    let movie = created_id(&body, "movie");
    let uri = format!("/api/movies/{}/comments/{}", movie, ObjectId::generate());
    let (status, _) = send(&router, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_payloads() {
    let router = app(Arc::new(MemoryStore::new()));
    let uri = format!("/api/movies/{}", ObjectId::generate());

    let (status, body) = send(
        &router,
        Method::POST,
        &uri,
        Some(r#"{"title":"Sunrise","year":1927,"rating":"G"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["movie"]["title"], "Sunrise");
    assert!(body["data"]["movie"].get("rating").is_none());

    let (status, body) = send(&router, Method::POST, &uri, Some("{\"title\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid movie payload");

    let theater = format!("/api/theaters/{}", ObjectId::generate());
    let (status, body) = send(&router, Method::POST, &theater, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Theater created successfully");
    assert_eq!(body["data"]["theater"]["location"]["geo"]["type"], "Point");
}

#[tokio::test]
async fn test_ids_accept_uppercase_hex() {
    let router = app(Arc::new(MemoryStore::new()));
    let (_, body) = send(&router, Method::POST, &format!("/api/theaters/{}", ObjectId::generate()), None).await;
    let id = created_id(&body, "theater");

    let (status, body) = send(&router, Method::GET, &format!("/api/theaters/{}", id.to_uppercase()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["theater"]["_id"], id.as_str());
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = ApiConfig::default();
    config.security.max_body_size = 16;
    let router = app_with(config, Arc::new(MemoryStore::new()));

    let body = format!(r#"{{"title":"{}","year":2000}}"#, "x".repeat(64));
    let uri = format!("/api/movies/{}", ObjectId::generate());
    let (status, envelope) = send(&router, Method::POST, &uri, Some(&body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(envelope["status"], 413);
    assert_eq!(envelope["message"], "Invalid movie payload");
}

#[tokio::test]
async fn test_unknown_route() {
    let router = app(Arc::new(PanicStore));

    for uri in ["/api/actors", "/movies", "/api/movies/a/b/c/d"] {
        let (status, body) = send(&router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["message"], "Route not found");
        assert_eq!(body["error"], format!("No route matches {}", uri));
    }
}

#[tokio::test]
async fn test_request_id_header() {
    let router = app(Arc::new(MemoryStore::new()));

    let request = Request::builder().uri("/api/movies").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/api/movies")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me");
}
