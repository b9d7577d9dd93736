//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use borrowdesk::config::{ApiConfig, Config};
use borrowdesk::context::AppContext;
use borrowdesk::models::User;
use borrowdesk::session::{MemoryStorage, SessionStorage};
use borrowdesk::validation::{Credentials, Validated};
use mock_backend::MockBackend;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Config pointing every endpoint at `base_url`.
pub fn config_for(base_url: &str) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            connect_timeout_seconds: 2,
            timeout_seconds: None,
        },
        ..Config::default()
    }
}

/// Context bound to the mock server with in-memory session storage.
pub fn context(backend: &MockBackend) -> (AppContext, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let ctx = AppContext::new(&config_for(&backend.base_url()), storage.clone())
        .expect("Failed to build context");
    (ctx, storage)
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Fixtures -----------------------------------------------------------------

pub fn device_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "serialNumber": format!("SN-{id}"),
        "category": "Laptop",
        "status": "Available"
    })
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "username": format!("user-{id}"),
        "email": format!("{id}@example.com"),
        "role": role,
        "status": "Active"
    })
}

pub fn borrowing_json(id: &str, user_id: &str, fine: f64, payment_status: &str) -> Value {
    json!({
        "_id": id,
        "deviceId": { "_id": "d1", "name": "Laptop" },
        "userId": user_id,
        "status": "Returned",
        "fine": fine,
        "paymentStatus": payment_status
    })
}

pub fn post_json(id: &str, device_id: &str, user_id: &str) -> Value {
    json!({
        "_id": id,
        "deviceId": device_id,
        "userId": user_id,
        "text": "Battery lasts the whole day",
        "rating": 4,
        "likes": [],
        "dislikes": []
    })
}

// -- Session helpers ----------------------------------------------------------

/// Signs `ctx` in as a user with `role` through the mock `/login`.
pub async fn sign_in(
    ctx: &AppContext,
    backend: &MockBackend,
    id: &str,
    role: &str,
) -> User {
    backend
        .enqueue_json(json!({ "message": "Login successful", "user": user_json(id, role) }))
        .await;
    let credentials = Validated::new(Credentials::new(format!("{id}@example.com"), "password123"))
        .expect("valid credentials");
    ctx.session.login(credentials).await.expect("login failed")
}

/// Polls `check` until it holds or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
