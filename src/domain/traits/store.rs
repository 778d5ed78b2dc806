use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::application::errors::StorageError;

/// One buffered change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Set { key: String, value: String },
    Delete { key: String },
}

/// Store trait - key/value persistence
#[async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Apply every write or none of them
    async fn commit(&self, writes: Vec<Write>) -> Result<(), StorageError>;
}

/// Writes made while handling one message.
///
/// Reads see the transaction's own writes first. Nothing reaches the store
/// until [`Transaction::commit`].
pub struct Transaction {
    store: Arc<dyn Store>,
    pending: Mutex<BTreeMap<String, Option<String>>>,
}

impl Transaction {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    fn pending(&self) -> Result<MutexGuard<'_, BTreeMap<String, Option<String>>>, StorageError> {
        self.pending
            .lock()
            .map_err(|_| StorageError::Unavailable("Lock poisoned".to_string()))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let buffered = self.pending()?.get(key).cloned();
        match buffered {
            Some(value) => Ok(value),
            None => self.store.get(key).await,
        }
    }

    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), StorageError> {
        self.pending()?.insert(key.into(), Some(value.into()));
        Ok(())
    }

    pub fn delete(&self, key: impl Into<String>) -> Result<(), StorageError> {
        self.pending()?.insert(key.into(), None);
        Ok(())
    }

    pub fn is_dirty(&self) -> Result<bool, StorageError> {
        Ok(!self.pending()?.is_empty())
    }

    /// Hand the buffered writes to the store
    pub async fn commit(&self) -> Result<(), StorageError> {
        let writes: Vec<Write> = std::mem::take(&mut *self.pending()?)
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => Write::Set { key, value },
                None => Write::Delete { key },
            })
            .collect();
        if writes.is_empty() {
            return Ok(());
        }
        self.store.commit(writes).await
    }

    /// Drop the buffered writes
    pub fn rollback(&self) -> Result<(), StorageError> {
        self.pending()?.clear();
        Ok(())
    }
}
