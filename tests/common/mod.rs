#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value as JsonValue;
use talent_pipeline::{
    database::{memory::MemoryStore, seed::seed_demo_data},
    models::user::User,
    routes,
    utils::credentials::CredentialService,
    AppState,
};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test_secret_key";

pub fn credentials() -> CredentialService {
    CredentialService::new(JWT_SECRET, Duration::hours(24))
}

pub async fn setup_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = routes::router(AppState::new(store.clone(), credentials()), 1000);
    (app, store)
}

pub async fn setup_seeded_app() -> (Router, Arc<MemoryStore>) {
    let (app, store) = setup_app().await;
    seed_demo_data(store.as_ref(), &credentials())
        .await
        .expect("seed demo data");
    (app, store)
}

/// Mints a token without touching any store; the middleware only checks the
/// signature and expiry.
pub fn mint_token() -> String {
    let user = User {
        id: 1,
        email: "recruiter@company.com".into(),
        password_hash: String::new(),
        name: "Demo Recruiter".into(),
        role: "admin".into(),
        created_at: chrono::Utc::now(),
    };
    credentials().issue_token(&user).expect("issue token").token
}

pub async fn login_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({
            "email": "recruiter@company.com",
            "password": "demo123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().expect("token").to_string()
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            JsonValue::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}
