//! Durable key-value storage for search state.
//!
//! Models browser-style local storage as an injectable trait with explicit
//! get/set/remove operations, so production code uses a JSON file on disk
//! while tests substitute an in-memory fake.

mod file_store;
mod memory;

pub use file_store::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by the key-value store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk state file exists but does not parse.
    #[error("Corrupt state file: {reason}")]
    Corrupt { reason: String },
}

/// String key-value store surviving process restarts.
///
/// Mutations are visible to subsequent reads through the same store. Keys
/// that were never set (or were removed) read back as `None`.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
