//! Pre-flight input validation
//!
//! The same checks the login/registration/profile forms apply before a
//! request goes out. The repository does not invoke these; the server
//! remains the authority. Callers run them to reject obviously bad input
//! without a round trip.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::{Credentials, RegisterRequest, UpdateProfileRequest};

const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new(
            field,
            "Please fill in all required fields",
        ));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), ValidationError> {
    require("email", email)?;
    if !EMAIL_PATTERN.is_match(email.trim()) {
        return Err(ValidationError::new("email", "Please enter a valid email"));
    }
    Ok(())
}

/// Validate login input: both fields present.
pub fn validate_login(credentials: &Credentials) -> Result<(), ValidationError> {
    require("username", &credentials.username)?;
    require("password", &credentials.password)?;
    Ok(())
}

/// Validate registration input: required fields present, email well-formed,
/// password long enough and matching its confirmation.
pub fn validate_registration(
    request: &RegisterRequest,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    require("username", &request.username)?;
    require_email(&request.email)?;
    require("password", &request.password)?;
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if request.password != confirm_password {
        return Err(ValidationError::new(
            "confirmPassword",
            "Passwords do not match",
        ));
    }
    Ok(())
}

/// Validate profile update input: username present, email well-formed.
pub fn validate_profile_update(request: &UpdateProfileRequest) -> Result<(), ValidationError> {
    require("username", &request.username)?;
    require_email(&request.email)?;
    Ok(())
}
