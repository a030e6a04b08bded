//! Wire and Domain Types
//!
//! Request and response models for the REST auth surface, plus the `User`
//! record cached in the persistent session store. All wire types serialize
//! with camelCase field names.
//!
//! The login response uses the flat shape (`token` alongside the user fields);
//! the nested `user` object variant seen in some backend revisions is not
//! accepted.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// The authenticated subject, as cached in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned id; absent until the first successful fetch
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Login input. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Profile update input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Successful login response (flat shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Profile fetch/update response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Confirmation payload from register/logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
    #[serde(default = "default_true")]
    pub success: bool,
}

/// Shape of HTTP error bodies. Every field is optional; the parser falls
/// back to the raw body when none are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<AuthResponse> for User {
    fn from(value: AuthResponse) -> Self {
        Self {
            id: Some(value.id),
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            phone_number: None,
            enabled: true,
        }
    }
}

impl From<UserResponse> for User {
    fn from(value: UserResponse) -> Self {
        Self {
            id: Some(value.id),
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            phone_number: value.phone_number,
            enabled: true,
        }
    }
}
