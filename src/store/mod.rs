//! Persistent Session Store
//!
//! Durable key-value storage for the session, plus a typed layer over the
//! two session keys (bearer token and cached user record).
//!
//! The [`PrefStore`] trait is the storage contract: a read reflects the most
//! recently completed write and is never torn; `clear` removes every key at
//! once. [`MemoryPrefStore`] backs tests and ephemeral sessions,
//! [`FilePrefStore`] persists to a JSON file.
//!
//! [`SessionStore`] sits on top and owns the session semantics: JSON
//! encoding of the user record, tolerant reads (a corrupt record reads as
//! absent, never as an error), and a watch channel that publishes the cached
//! user to subscribers on every write.

mod file;
mod memory;

pub use file::FilePrefStore;
pub use memory::MemoryPrefStore;

use tokio::sync::watch;
use tracing::warn;

use crate::error::StoreError;
use crate::types::User;

/// Preference key for the bearer token
pub const TOKEN_KEY: &str = "auth_token";
/// Preference key for the serialized user record
pub const USER_KEY: &str = "user_data";

/// Durable key-value storage contract.
pub trait PrefStore: Send + Sync {
    /// Store a value, replacing any previous value for the key.
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Latest value for the key, reflecting the most recently completed write.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove all keys atomically.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Typed session layer over a [`PrefStore`].
pub struct SessionStore<S> {
    prefs: S,
    user_tx: watch::Sender<Option<User>>,
}

impl<S: PrefStore> SessionStore<S> {
    /// Open the session store, seeding the observable user from storage.
    pub async fn new(prefs: S) -> Result<Self, StoreError> {
        let initial = read_user(&prefs).await?;
        let (user_tx, _) = watch::channel(initial);
        Ok(Self { prefs, user_tx })
    }

    pub async fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.prefs.put(TOKEN_KEY, token.to_string()).await
    }

    pub async fn token(&self) -> Result<Option<String>, StoreError> {
        self.prefs.get(TOKEN_KEY).await
    }

    pub async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(user)?;
        self.prefs.put(USER_KEY, encoded).await?;
        self.user_tx.send_replace(Some(user.clone()));
        Ok(())
    }

    pub async fn user(&self) -> Result<Option<User>, StoreError> {
        read_user(&self.prefs).await
    }

    /// Remove both session keys and publish the absence to subscribers.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.prefs.clear().await?;
        self.user_tx.send_replace(None);
        Ok(())
    }

    /// Reactive view over the cached user. The receiver holds the latest
    /// value on subscribe and wakes on every subsequent write.
    pub fn observe_user(&self) -> watch::Receiver<Option<User>> {
        self.user_tx.subscribe()
    }
}

async fn read_user<S: PrefStore>(prefs: &S) -> Result<Option<User>, StoreError> {
    let raw = prefs.get(USER_KEY).await?;
    Ok(raw.and_then(|json| match serde_json::from_str(&json) {
        Ok(user) => Some(user),
        Err(err) => {
            // A corrupt record reads the same as a missing one.
            warn!(error = %err, "discarding unreadable persisted user record");
            None
        }
    }))
}
