use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::PrefStore;

/// JSON file-backed PrefStore.
///
/// The whole map is held in memory and flushed to the file after every
/// write with a single `write` call, so a concurrent read never observes a
/// torn value. A missing or unreadable file loads as an empty map.
#[derive(Clone)]
pub struct FilePrefStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    path: PathBuf,
}

impl FilePrefStore {
    /// Open the store at `path`, creating parent directories as needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let entries = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            path,
        })
    }

    /// Conventional per-user location for the session file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("authkit")
            .join("session.json")
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let data = {
            let entries = self.entries.read().await;
            serde_json::to_vec(&*entries)?
        };
        fs::write(&self.path, data).await?;
        Ok(())
    }
}

impl PrefStore for FilePrefStore {
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        {
            let mut entries = self.entries.write().await;
            entries.insert(key.to_string(), value);
        }
        self.flush().await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        {
            let mut entries = self.entries.write().await;
            entries.clear();
        }
        self.flush().await
    }
}
