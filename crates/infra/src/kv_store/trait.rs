use std::sync::Arc;

use thiserror::Error;

use abal_core::{DomainError, UserId};

/// Key-value store operation error.
///
/// These are **infrastructure errors** (IO, encoding, backend state) as
/// opposed to domain errors, which are wrapped in `Domain`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Async string-to-string store (the device's local key-value storage).
///
/// Values are opaque serialized blobs. Writes to one key are assumed to be
/// serialized by the backend; there is no compare-and-swap.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never written or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write (or overwrite) a value.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }
}

/// Storage identifiers for one user's progress data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub goal_weight: String,
    pub weight_history: String,
}

impl StorageKeys {
    pub const GOAL_WEIGHT: &'static str = "abal_goal_weight";
    pub const WEIGHT_HISTORY: &'static str = "abal_weight_history";

    /// Keys for a device with several profiles.
    pub fn scoped(user_id: UserId) -> Self {
        Self {
            goal_weight: format!("{}.{user_id}", Self::GOAL_WEIGHT),
            weight_history: format!("{}.{user_id}", Self::WEIGHT_HISTORY),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            goal_weight: Self::GOAL_WEIGHT.to_string(),
            weight_history: Self::WEIGHT_HISTORY.to_string(),
        }
    }
}
