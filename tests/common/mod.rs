//! Shared helpers for repository integration tests.

use std::time::Duration;

use authkit::{AuthApi, AuthRepository, Config, Credentials, MemoryPrefStore, SessionStore, User};
use serde_json::json;
use wiremock::MockServer;

/// A port nothing listens on, for connection-refused scenarios.
pub const UNREACHABLE_BASE: &str = "http://127.0.0.1:1/api";

pub fn test_config(base_url: &str) -> Config {
    Config::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

pub async fn repository_from(
    config: Config,
    prefs: MemoryPrefStore,
) -> AuthRepository<MemoryPrefStore> {
    let api = AuthApi::new(config).unwrap();
    let store = SessionStore::new(prefs).await.unwrap();
    AuthRepository::new(api, store)
}

pub async fn repository(base_url: &str) -> AuthRepository<MemoryPrefStore> {
    repository_from(test_config(base_url), MemoryPrefStore::new()).await
}

/// Base URL pointing at a mock server's `/api` root.
pub fn mock_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub fn alice_credentials() -> Credentials {
    Credentials {
        username: "alice".to_string(),
        password: "pw123".to_string(),
    }
}

/// Flat login response body for alice, token "abc".
pub fn alice_login_body() -> serde_json::Value {
    json!({
        "token": "abc",
        "id": 1,
        "username": "alice",
        "email": "a@x.com",
        "fullName": null
    })
}

pub fn alice_user() -> User {
    User {
        id: Some(1),
        username: "alice".to_string(),
        email: "a@x.com".to_string(),
        full_name: None,
        phone_number: None,
        enabled: true,
    }
}
