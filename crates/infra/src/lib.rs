//! Infrastructure: persistence boundary and per-user progress sessions.
//!
//! The domain crates stay pure; everything that touches storage, the clock
//! or configuration lives here.

pub mod config;
pub mod kv_store;
pub mod progress_store;


pub use config::{StoreBackend, StoreConfig};
pub use kv_store::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageKeys, StoreError,
};
pub use progress_store::{AddOutcome, ProgressStore};
