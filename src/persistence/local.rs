//! Browser LocalStorage backend (WASM only)

use super::{Storage, StorageError};

/// [`Storage`] backed by `window.localStorage`
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's LocalStorage
    pub fn open() -> Result<Self, StorageError> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|_| StorageError::WriteRejected(key.to_string()))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|_| StorageError::WriteRejected(key.to_string()))
    }
}
