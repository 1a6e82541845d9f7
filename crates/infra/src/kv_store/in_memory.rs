use std::collections::HashMap;
use std::sync::RwLock;

use super::r#trait::{KeyValueStore, StoreError};

/// In-memory key-value store.
///
/// Intended for tests/dev. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(values.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        values.remove(key);
        Ok(())
    }
}
