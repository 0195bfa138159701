//! In-memory storage for tests and native runs.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{Storage, StorageError};

/// In-memory implementation of [`Storage`].
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with one record already present.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Make every subsequent write fail (quota exceeded, private mode, ...).
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
