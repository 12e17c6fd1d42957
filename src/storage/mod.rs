//! Storage Module
//!
//! Durable string key-value storage backing the cart and the error log.
//! Calls are synchronous so a read right after a write observes it.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

// == Key Value Storage ==
/// Minimal local-storage style interface.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the stored string for `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
