use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use relay_server::{app, config::Config, AppState};
use relay_types::{ErrorDetail, HealthStatus, HEALTH_STATUS};
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_running_without_credentials() {
    let config = Config::default();
    assert!(!config.llm.has_api_key());
    let app = app(AppState::from_config(&config).unwrap());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthStatus = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, HEALTH_STATUS);
}

#[tokio::test]
async fn chat_without_credentials_fails_per_request() {
    let mut config = Config::default();
    config.llm.base_url = "http://127.0.0.1:9".to_string();
    let app = app(AppState::from_config(&config).unwrap());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat/text")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"message":"hi"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: ErrorDetail = serde_json::from_slice(&body).unwrap();
    assert!(!error.detail.is_empty());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = app(AppState::from_config(&Config::default()).unwrap());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/chat/voice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
