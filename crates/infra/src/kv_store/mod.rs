//! Key-value persistence boundary.
//!
//! Progress data lives in a device-local string store. This module defines
//! that boundary without assuming a backend, plus the adapters we ship.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
pub use r#trait::{KeyValueStore, StorageKeys, StoreError};
