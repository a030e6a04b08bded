//! authkit - Client-Side Authentication Library
//!
//! Username/password authentication against a remote REST backend:
//! registration, login, logout, profile retrieval, and profile update.
//! Session state is a single bearer token and a cached user record,
//! persisted through a key-value preference store.
//!
//! # Module Structure
//!
//! - **`types`** - Wire and domain models (`User`, requests, responses)
//! - **`config`** - Base URL, timeout, and retry configuration
//! - **`remote`** - The REST client (`AuthApi`) and its retry policy
//! - **`store`** - The persistent session store (`PrefStore` backends and
//!   the typed `SessionStore` layer)
//! - **`repository`** - `AuthRepository`, which composes the remote client
//!   and the store and owns the session lifecycle
//! - **`validate`** - Pre-flight form validation helpers
//! - **`error`** - Error types
//!
//! # Usage
//!
//! ```rust,no_run
//! use authkit::{AuthApi, AuthRepository, Config, Credentials, FilePrefStore, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder()
//!     .base_url("https://auth.example.com/api")
//!     .build()?;
//! let api = AuthApi::new(config)?;
//! let prefs = FilePrefStore::open(FilePrefStore::default_path()).await?;
//! let store = SessionStore::new(prefs).await?;
//!
//! let repository = AuthRepository::new(api, store);
//! repository.initialize_token().await?;
//!
//! let user = repository
//!     .login(&Credentials {
//!         username: "alice".to_string(),
//!         password: "pw123456".to_string(),
//!     })
//!     .await?;
//! println!("logged in as {}", user.username);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every fallible remote operation returns `Result<_, AuthError>`; transport
//! failures map to fixed user-presentable messages, HTTP rejections carry
//! the message parsed from the error body. Logout is the one operation that
//! cannot fail: local credentials are always dropped.

/// Client configuration
pub mod config;

/// Error types
pub mod error;

/// Remote REST auth client
pub mod remote;

/// Session repository composing the remote client and the store
pub mod repository;

/// Persistent session store
pub mod store;

/// Wire and domain models
pub mod types;

/// Pre-flight input validation
pub mod validate;

pub use config::{Config, ConfigBuilder, ConfigError};
pub use error::{AuthError, StoreError, ValidationError};
pub use remote::{AuthApi, RetryPolicy};
pub use repository::{AuthRepository, Confirmation};
pub use store::{FilePrefStore, MemoryPrefStore, PrefStore, SessionStore};
pub use types::{
    AuthResponse, Credentials, MessageResponse, RegisterRequest, UpdateProfileRequest, User,
    UserResponse,
};
