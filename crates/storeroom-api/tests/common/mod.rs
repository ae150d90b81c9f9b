//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use storeroom_api::{AppState, build_app};
use storeroom_auth::JwtEncoder;
use storeroom_core::config::AppConfig;
use storeroom_core::types::UserId;
use storeroom_database::{MemoryRoomStore, MemoryUserStore};

/// Test application backed by in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application with ten free rooms.
    pub fn new() -> Self {
        Self::with_rooms(10)
    }

    /// Create a test application with rooms `1..=count`.
    pub fn with_rooms(count: u32) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.booking.room_count = count;

        let state = AppState::new(
            config.clone(),
            Arc::new(MemoryRoomStore::seeded(count)),
            Arc::new(MemoryUserStore::new()),
        );

        Self {
            router: build_app(state),
            config,
        }
    }

    /// Sign an access token for `login` without going through registration.
    pub fn token_for(&self, login: &str) -> String {
        JwtEncoder::new(&self.config.auth)
            .issue(UserId::new(), login)
            .expect("Failed to issue token")
            .access_token
    }

    /// Register `login` and return a fresh access token.
    pub async fn register_and_login(&self, login: &str, password: &str) -> String {
        let credentials = serde_json::json!({ "login": login, "password": password });

        let response = self
            .request("POST", "/auth/register", Some(credentials.clone()), None)
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        let response = self
            .request("POST", "/auth/login", Some(credentials), None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Captured response.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Tenant of room `number` in a `/rooms` body.
    pub fn tenant_of(&self, number: i64) -> Value {
        self.body["rooms"]
            .as_array()
            .expect("rooms array")
            .iter()
            .find(|room| room["number"] == number)
            .map(|room| room["tenant"].clone())
            .expect("room present")
    }
}
