//! In-memory storage medium with failure injection.
//!
//! Used by tests and by hosts that run without a writable disk.

use super::{KeyValueStorage, StorageError, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Process-local key/value slots held in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    unavailable: Cell<bool>,
    quota_bytes: Cell<Option<usize>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Rejects writes whose value exceeds `limit` bytes.
    pub fn set_quota_bytes(&self, limit: Option<usize>) {
        self.quota_bytes.set(limit);
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw slot content, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Overwrites a slot directly, bypassing failure injection.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.unavailable.get() {
            return Err(StorageError::Unavailable(
                "memory storage disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_available()?;
        if let Some(limit) = self.quota_bytes.get() {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                    limit,
                });
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.check_available()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
