//! Remote Auth Client
//!
//! Issues the five REST calls (register, login, logout, get-profile,
//! update-profile) against the configured base URL. The bearer token is
//! passed explicitly per call; this module keeps no token state of its own.
//!
//! Outcome mapping, applied uniformly to every call:
//!
//! - connect failures become [`AuthError::Unreachable`], timeouts become
//!   [`AuthError::TimedOut`]
//! - non-2xx statuses become [`AuthError::ServerRejected`] with the message
//!   extracted from the error body (structured parse first, truncated raw
//!   body second, generic text last — a parse failure is never itself fatal)
//! - 2xx bodies are decoded with typed serde; malformed JSON and
//!   wrong-shaped JSON are reported as distinct [`AuthError::Unknown`]
//!   messages

mod retry;

pub use retry::RetryPolicy;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::error::AuthError;
use crate::types::{
    AuthResponse, Credentials, ErrorResponse, MessageResponse, RegisterRequest,
    UpdateProfileRequest, UserResponse,
};

/// Error-body fallback cap, in characters
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP client for the remote auth surface.
pub struct AuthApi {
    client: Client,
    config: Config,
    retry: RetryPolicy,
}

impl AuthApi {
    /// Build the client with connect and total timeouts from the configuration.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        let retry = config.retry().clone();
        Ok(Self {
            client,
            config,
            retry,
        })
    }

    /// POST auth/register. An empty 2xx body counts as success.
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, AuthError> {
        let url = self.config.endpoint("auth/register");
        debug!(%url, username = %request.username, "register");
        let body: Option<MessageResponse> =
            self.execute(|| self.client.post(&url).json(request)).await?;
        Ok(body.unwrap_or_else(|| MessageResponse {
            message: "Registration successful".to_string(),
            success: true,
        }))
    }

    /// POST auth/login. An empty 2xx body is an error: no token was issued.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        let url = self.config.endpoint("auth/login");
        debug!(%url, username = %credentials.username, "login");
        self.execute(|| self.client.post(&url).json(credentials))
            .await?
            .ok_or(AuthError::EmptyResponse)
    }

    /// POST auth/logout. An empty 2xx body counts as success.
    pub async fn logout(&self, token: Option<&str>) -> Result<MessageResponse, AuthError> {
        let url = self.config.endpoint("auth/logout");
        debug!(%url, "logout");
        let body: Option<MessageResponse> = self
            .execute(|| with_bearer(self.client.post(&url), token))
            .await?;
        Ok(body.unwrap_or_else(|| MessageResponse {
            message: "User logged out successfully!".to_string(),
            success: true,
        }))
    }

    /// GET auth/profile.
    pub async fn get_profile(&self, token: Option<&str>) -> Result<UserResponse, AuthError> {
        let url = self.config.endpoint("auth/profile");
        debug!(%url, "get profile");
        self.execute(|| with_bearer(self.client.get(&url), token))
            .await?
            .ok_or(AuthError::EmptyResponse)
    }

    /// PUT auth/profile.
    pub async fn update_profile(
        &self,
        token: Option<&str>,
        request: &UpdateProfileRequest,
    ) -> Result<UserResponse, AuthError> {
        let url = self.config.endpoint("auth/profile");
        debug!(%url, username = %request.username, "update profile");
        self.execute(|| with_bearer(self.client.put(&url), token).json(request))
            .await?
            .ok_or(AuthError::EmptyResponse)
    }

    /// Send one request (re-sending under the retry policy), returning the
    /// decoded body or `None` when the server answered 2xx with no payload.
    async fn execute<T, F>(&self, build: F) -> Result<Option<T>, AuthError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        retry::run_with_retry(&self.retry, || async {
            let response = build().send().await.map_err(map_transport)?;
            let status = response.status();
            let body = response.text().await.map_err(map_transport)?;

            if !status.is_success() {
                debug!(%status, "server rejected request");
                return Err(AuthError::ServerRejected(parse_error_body(&body)));
            }
            if body.trim().is_empty() {
                return Ok(None);
            }
            decode_body(&body).map(Some)
        })
        .await
    }
}

fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header("Authorization", format!("Bearer {}", token)),
        None => request,
    }
}

fn map_transport(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::TimedOut
    } else if err.is_connect() {
        AuthError::Unreachable
    } else {
        AuthError::Unknown(err.to_string())
    }
}

/// Typed decode of a 2xx body. Malformed JSON and valid-but-wrong-shaped
/// JSON are reported as distinct error kinds.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, AuthError> {
    serde_json::from_str(body).map_err(|err| {
        let kind = match err.classify() {
            serde_json::error::Category::Data => "unexpected response shape",
            _ => "malformed JSON in response",
        };
        AuthError::Unknown(format!("{}: {}", kind, err))
    })
}

/// Extract a user-presentable message from an HTTP error body.
pub(crate) fn parse_error_body(body: &str) -> String {
    if body.trim().is_empty() {
        return "An error occurred".to_string();
    }
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed
            .message
            .or(parsed.error)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => truncate_chars(body, ERROR_BODY_LIMIT).to_string(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body_prefers_message_field() {
        let body = r#"{"message":"Username is already taken!","success":false}"#;
        assert_eq!(parse_error_body(body), "Username is already taken!");
    }

    #[test]
    fn test_parse_error_body_falls_back_to_error_field() {
        let body = r#"{"error":"Bad credentials"}"#;
        assert_eq!(parse_error_body(body), "Bad credentials");
    }

    #[test]
    fn test_parse_error_body_without_known_fields_returns_raw() {
        let body = r#"{"status":418}"#;
        assert_eq!(parse_error_body(body), body);
    }

    #[test]
    fn test_parse_error_body_non_json_truncates_to_200_chars() {
        let body = "x".repeat(300);
        let parsed = parse_error_body(&body);
        assert_eq!(parsed.chars().count(), 200);
        assert_eq!(parsed, "x".repeat(200));
    }

    #[test]
    fn test_parse_error_body_truncation_respects_char_boundaries() {
        let body = "é".repeat(250);
        let parsed = parse_error_body(&body);
        assert_eq!(parsed.chars().count(), 200);
    }

    #[test]
    fn test_parse_error_body_blank_is_generic() {
        assert_eq!(parse_error_body(""), "An error occurred");
        assert_eq!(parse_error_body("  \n"), "An error occurred");
    }

    #[test]
    fn test_decode_body_distinguishes_malformed_from_wrong_shape() {
        let malformed = decode_body::<MessageResponse>("{ not json").unwrap_err();
        match malformed {
            AuthError::Unknown(msg) => assert!(msg.starts_with("malformed JSON in response")),
            other => panic!("expected Unknown, got {:?}", other),
        }

        let wrong_shape = decode_body::<MessageResponse>(r#"{"token":"abc"}"#).unwrap_err();
        match wrong_shape {
            AuthError::Unknown(msg) => assert!(msg.starts_with("unexpected response shape")),
            other => panic!("expected Unknown, got {:?}", other),
        }
    }
}
