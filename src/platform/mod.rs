//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard keys, touch swipes)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::InputManager;
pub use storage::{KeyValueStore, MemoryStorage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
