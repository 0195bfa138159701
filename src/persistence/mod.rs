//! Keyed record storage
//!
//! The progress record is a single JSON string under one key. In the browser
//! that key lives in LocalStorage; tests and native runs use an in-memory map.

mod memory;
#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Errors surfaced by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage rejected write for key `{0}`")]
    WriteRejected(String),
}

/// String key/value storage with LocalStorage semantics
///
/// Writes replace the whole value for a key; there are no partial writes.
pub trait Storage {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` (no-op if absent)
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
