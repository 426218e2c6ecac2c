use agenda::{create_router, AppConfig, AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;

fn create_synced_app(remote_url: &str) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.database.path = temp_dir
        .path()
        .join("agenda.db")
        .to_str()
        .unwrap()
        .to_string();
    config.enable_sync(remote_url);
    config.sync.timeout_seconds = 2;

    let state = AppState::new(&config).unwrap();
    (create_router(state), temp_dir)
}

async fn call(app: &Router, request: Request<Body>) -> StatusCode {
    app.clone().oneshot(request).await.unwrap().status()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn ana() -> serde_json::Value {
    json!({
        "nombre": "Ana",
        "apellido": "Pérez",
        "email": "Ana@Example.com",
        "telefono": "",
        "direccion": "Calle Mayor 1"
    })
}

#[tokio::test]
async fn test_rest_create_is_forwarded_without_id() {
    let server = MockServer::start_async().await;
    let remote = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/personas")
                .header("content-type", "application/json")
                .json_body(json!({
                    "nombre": "Ana",
                    "apellido": "Pérez",
                    "email": "ana@example.com",
                    "telefono": null,
                    "direccion": "Calle Mayor 1"
                }));
            then.status(200).json_body(json!({"id": 77}));
        })
        .await;

    let (app, _dir) = create_synced_app(&server.base_url());
    let status = call(&app, json_request("POST", "/api/personas", ana())).await;

    assert_eq!(status, StatusCode::CREATED);
    remote.assert_async().await;
}

#[tokio::test]
async fn test_web_create_is_forwarded() {
    let server = MockServer::start_async().await;
    let remote = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/personas");
            then.status(201).json_body(json!({"id": 1}));
        })
        .await;

    let (app, _dir) = create_synced_app(&server.base_url());
    let request = Request::builder()
        .method("POST")
        .uri("/web/guardar")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("nombre=Luis&apellido=Gomez&email=luis%40example.com"))
        .unwrap();

    assert_eq!(call(&app, request).await, StatusCode::SEE_OTHER);
    remote.assert_async().await;
}

#[tokio::test]
async fn test_remote_failure_does_not_affect_local_create() {
    let server = MockServer::start_async().await;
    let remote = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/personas");
            then.status(500);
        })
        .await;

    let (app, _dir) = create_synced_app(&server.base_url());
    let status = call(&app, json_request("POST", "/api/personas", ana())).await;
    assert_eq!(status, StatusCode::CREATED);
    remote.assert_async().await;

    let request = Request::builder()
        .uri("/api/personas/1")
        .body(Body::empty())
        .unwrap();
    assert_eq!(call(&app, request).await, StatusCode::OK);
}

#[tokio::test]
async fn test_unreachable_remote_does_not_affect_local_create() {
    let (app, _dir) = create_synced_app("http://127.0.0.1:9");
    let status = call(&app, json_request("POST", "/api/personas", ana())).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_rejected_create_is_not_forwarded() {
    let server = MockServer::start_async().await;
    let remote = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/personas");
            then.status(201).json_body(json!({"id": 1}));
        })
        .await;

    let (app, _dir) = create_synced_app(&server.base_url());
    call(&app, json_request("POST", "/api/personas", ana())).await;
    let status = call(&app, json_request("POST", "/api/personas", ana())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    remote.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_update_and_delete_are_not_forwarded() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/personas");
            then.status(201).json_body(json!({"id": 1}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT);
            then.status(200);
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE);
            then.status(204);
        })
        .await;

    let (app, _dir) = create_synced_app(&server.base_url());
    call(&app, json_request("POST", "/api/personas", ana())).await;

    let mut changes = ana();
    changes["nombre"] = json!("Ana María");
    let status = call(&app, json_request("PUT", "/api/personas/1", changes)).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/personas/1")
        .body(Body::empty())
        .unwrap();
    assert_eq!(call(&app, request).await, StatusCode::NO_CONTENT);

    create.assert_hits_async(1).await;
    update.assert_hits_async(0).await;
    delete.assert_hits_async(0).await;
}
