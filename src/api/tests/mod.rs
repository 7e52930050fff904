use super::*;
use crate::lifecycle::test_helpers;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt; // for oneshot()


/// Helper to create a test DownloadManager instance wrapped in Arc
async fn create_test_manager() -> (Arc<DownloadManager>, tempfile::TempDir) {
    let (manager, temp_dir) = test_helpers::create_test_manager().await;
    (Arc::new(manager), temp_dir)
}

/// Helper to create a router over a fresh test manager
async fn create_test_router() -> (Router, Arc<DownloadManager>, tempfile::TempDir) {
    let (manager, temp_dir) = create_test_manager().await;
    let config = Arc::new((*manager.config).clone());
    let router = create_router(manager.clone(), config);
    (router, manager, temp_dir)
}

/// Build a JSON request with optional caller identity
fn json_request(method: &str, uri: &str, user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_router_builds_with_default_config() {
    let (manager, _temp_dir) = create_test_manager().await;

    // Default config has swagger_ui enabled; building the router must not
    // collide the SwaggerUi spec route with the /api/openapi.json handler
    let config = Arc::new(Config::default());
    assert!(config.api.swagger_ui);
    let app = create_router(manager, config);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // SwaggerUi serves its own copy of the spec on a distinct path
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_enabled() {
    let (manager, _temp_dir) = create_test_manager().await;

    let mut config = (*manager.config).clone();
    config.api.cors_enabled = true;
    config.api.cors_origins = vec!["*".to_string()];
    let config = Arc::new(config);

    let app = create_router(manager, config);

    let request = Request::builder()
        .uri("/api/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_authentication_with_api_key() {
    let (manager, _temp_dir) = create_test_manager().await;

    let mut config = (*manager.config).clone();
    config.api.api_key = Some("test-secret-key".to_string());
    let config = Arc::new(config);

    let app = create_router(manager, config);

    // Request without key is rejected
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong key is rejected
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-api-key", "wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct key passes through
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-api-key", "test-secret-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_server_spawns() {
    let (manager, _temp_dir) = create_test_manager().await;

    // Port 0 = OS assigns a free port
    let mut config = (*manager.config).clone();
    config.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let api_handle = tokio::spawn({
        let manager = manager.clone();
        let config = config.clone();
        async move { start_api_server(manager, config).await }
    });

    // Give it a moment to start, then abort
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    api_handle.abort();
}
