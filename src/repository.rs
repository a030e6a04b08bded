//! Session Repository
//!
//! Composes the remote auth client and the persistent session store, and
//! keeps the store and the in-memory token mirror consistent after each
//! remote call.
//!
//! State rules:
//!
//! - `register` never touches local state.
//! - `login` persists the token, then the user, then updates the mirror; an
//!   empty success body or any failure leaves local state untouched.
//! - `logout` always clears the store and the mirror, even when the remote
//!   call fails; it cannot fail from the caller's point of view.
//! - `get_profile`/`update_profile` overwrite the cached user with the
//!   server's representation on success.
//!
//! Operations are safe to call concurrently but are not serialized against
//! each other; when two calls race, the last write to the store wins.

use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use crate::error::{AuthError, StoreError};
use crate::remote::AuthApi;
use crate::store::{PrefStore, SessionStore};
use crate::types::{Credentials, RegisterRequest, UpdateProfileRequest, User};

/// Outcome of a logout. Local state is cleared in every case;
/// `remote_acknowledged` records whether the server saw the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
    pub remote_acknowledged: bool,
}

/// The session repository.
pub struct AuthRepository<S> {
    api: AuthApi,
    store: SessionStore<S>,
    /// Mirror of the persisted token; the remote client attaches this value,
    /// not the store's. Populated by [`Self::initialize_token`].
    token: RwLock<Option<String>>,
}

impl<S: PrefStore> AuthRepository<S> {
    pub fn new(api: AuthApi, store: SessionStore<S>) -> Self {
        Self {
            api,
            store,
            token: RwLock::new(None),
        }
    }

    /// Load the persisted token into the in-memory mirror. Must run once
    /// before any call that requires authorization.
    pub async fn initialize_token(&self) -> Result<(), StoreError> {
        let stored = self.store.token().await?;
        *self.token.write().await = stored;
        Ok(())
    }

    /// Register a new account. No local state is mutated on either outcome.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        let response = self.api.register(request).await?;
        Ok(response.message)
    }

    /// Log in. On success the token is persisted first, then the user, then
    /// the in-memory mirror is updated.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let response = self.api.login(credentials).await?;
        let token = response.token.clone();
        let user = User::from(response);

        self.store.save_token(&token).await?;
        self.store.save_user(&user).await?;
        *self.token.write().await = Some(token);

        debug!(username = %user.username, "session established");
        Ok(user)
    }

    /// Log out. Local state is always cleared, whether or not the server is
    /// reachable: a client must be able to drop its own credentials.
    pub async fn logout(&self) -> Confirmation {
        let token = self.token.read().await.clone();
        let remote = self.api.logout(token.as_deref()).await;

        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear persisted session during logout");
        }
        *self.token.write().await = None;

        match remote {
            Ok(_) => Confirmation {
                message: "Logged out successfully".to_string(),
                remote_acknowledged: true,
            },
            Err(err) => {
                debug!(error = %err, "remote logout failed, local session cleared anyway");
                Confirmation {
                    message: "Logged out".to_string(),
                    remote_acknowledged: false,
                }
            }
        }
    }

    /// Fetch the profile, overwriting the cached user on success.
    pub async fn get_profile(&self) -> Result<User, AuthError> {
        let token = self.token.read().await.clone();
        let response = self.api.get_profile(token.as_deref()).await?;
        let user = User::from(response);
        self.store.save_user(&user).await?;
        Ok(user)
    }

    /// Update the profile. The cached user is overwritten with the server's
    /// post-update representation, not the request echoed back.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, AuthError> {
        let token = self.token.read().await.clone();
        let response = self.api.update_profile(token.as_deref(), request).await?;
        let user = User::from(response);
        self.store.save_user(&user).await?;
        Ok(user)
    }

    /// Whether a token is persisted. A purely local presence check; the
    /// token is not validated against the server.
    pub async fn is_logged_in(&self) -> bool {
        matches!(self.store.token().await, Ok(Some(_)))
    }

    /// Reactive view over the cached user record.
    pub fn observe_user(&self) -> watch::Receiver<Option<User>> {
        self.store.observe_user()
    }
}
