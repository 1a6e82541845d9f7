//! Store configuration from the environment.
//!
//! - `ABAL_STORE`: `file` (default) or `memory`
//! - `ABAL_DATA_DIR`: directory for the file store (default `./.abal`)

use std::path::PathBuf;
use std::sync::Arc;

use crate::kv_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

pub const DEFAULT_DATA_DIR: &str = ".abal";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend = match lookup("ABAL_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("file") => StoreBackend::File,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                tracing::warn!(value = other, "unknown ABAL_STORE; falling back to file store");
                StoreBackend::File
            }
        };

        let data_dir = match lookup("ABAL_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => {
                if backend == StoreBackend::File {
                    tracing::warn!("ABAL_DATA_DIR not set; using ./{DEFAULT_DATA_DIR}");
                }
                PathBuf::from(DEFAULT_DATA_DIR)
            }
        };

        Self { backend, data_dir }
    }

    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self.backend = StoreBackend::File;
        self
    }

    /// Instantiate the configured backend.
    pub fn open(&self) -> Arc<dyn KeyValueStore> {
        match self.backend {
            StoreBackend::File => {
                tracing::debug!(dir = %self.data_dir.display(), "opening file store");
                Arc::new(FileKeyValueStore::new(self.data_dir.clone()))
            }
            StoreBackend::Memory => {
                tracing::debug!("opening in-memory store");
                Arc::new(InMemoryKeyValueStore::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_file_store_in_local_dir() {
        let config = StoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config.backend, StoreBackend::File);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn reads_backend_and_dir() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("ABAL_STORE", "memory"),
            ("ABAL_DATA_DIR", "/tmp/abal"),
        ]));
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/abal"));
    }

    #[test]
    fn unknown_backend_falls_back_to_file() {
        let config = StoreConfig::from_lookup(lookup(&[("ABAL_STORE", "redis")]));
        assert_eq!(config.backend, StoreBackend::File);
    }

    #[test]
    fn explicit_dir_forces_file_backend() {
        let config = StoreConfig::memory().with_data_dir("/var/lib/abal");
        assert_eq!(config.backend, StoreBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/abal"));
    }
}
