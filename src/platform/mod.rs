//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, swipes, canvas clicks)
//! - Storage (LocalStorage on web, JSON file on native)
//! - Wall-clock time

pub mod input;
pub mod storage;
pub mod time;

pub use input::{SwipeTracker, canvas_to_ground, direction_for_key};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, UnavailableStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
