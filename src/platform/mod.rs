//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;

pub use storage::{KeyValueStore, MemoryStore, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
