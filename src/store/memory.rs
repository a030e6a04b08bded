use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::store::PrefStore;

/// In-memory PrefStore for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryPrefStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPrefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefStore {
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_clear() {
        let store = MemoryPrefStore::new();
        assert_eq!(store.get("auth_token").await.unwrap(), None);

        store.put("auth_token", "abc".to_string()).await.unwrap();
        store.put("user_data", "{}".to_string()).await.unwrap();
        assert_eq!(
            store.get("auth_token").await.unwrap(),
            Some("abc".to_string())
        );

        store.clear().await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap(), None);
        assert_eq!(store.get("user_data").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryPrefStore::new();
        store.put("auth_token", "old".to_string()).await.unwrap();
        store.put("auth_token", "new".to_string()).await.unwrap();
        assert_eq!(
            store.get("auth_token").await.unwrap(),
            Some("new".to_string())
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryPrefStore::new();
        let alias = store.clone();
        store.put("auth_token", "abc".to_string()).await.unwrap();
        assert_eq!(
            alias.get("auth_token").await.unwrap(),
            Some("abc".to_string())
        );
    }
}
