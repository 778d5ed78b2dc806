//! Key/value store implementations

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::traits::{Store, Write};
use crate::infrastructure::config::{StorageBackend, StorageConfig};
use crate::infrastructure::database::SqliteStore;

fn apply(map: &mut BTreeMap<String, String>, writes: Vec<Write>) {
    for write in writes {
        match write {
            Write::Set { key, value } => {
                map.insert(key, value);
            }
            Write::Delete { key } => {
                map.remove(&key);
            }
        }
    }
}

/// Volatile in-memory store
#[derive(Default)]
pub struct MemoryStore {
    kv: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.kv.read().await.get(key).cloned())
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<(), StorageError> {
        apply(&mut *self.kv.write().await, writes);
        Ok(())
    }
}

/// In-memory store snapshotted to a JSON file on every commit
pub struct JsonStore {
    path: PathBuf,
    kv: RwLock<BTreeMap<String, String>>,
}

impl JsonStore {
    /// Open `<dir>/store.json`, starting empty when it does not exist yet
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join("store.json");
        let kv = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            kv: RwLock::new(kv),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.kv.read().await.get(key).cloned())
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<(), StorageError> {
        let mut kv = self.kv.write().await;
        let mut next = kv.clone();
        apply(&mut next, writes);

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&next)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        *kv = next;
        Ok(())
    }
}

/// Open the configured backend
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn Store>, StorageError> {
    let store: Arc<dyn Store> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Json => Arc::new(JsonStore::open(&config.path).await?),
        StorageBackend::Sqlite => {
            tokio::fs::create_dir_all(&config.path).await?;
            Arc::new(SqliteStore::open(config.path.join("cogbot.db"))?)
        }
    };
    tracing::info!("Storage ready: {:?}", config.backend);
    Ok(store)
}
