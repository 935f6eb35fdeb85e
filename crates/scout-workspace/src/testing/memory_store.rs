//! In-memory key-value store for testing.
//!
//! Clones share the same backing map, so a test can keep a handle while the
//! engine owns another.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::persistence::{KeyValueStore, StoreError};

#[derive(Default)]
struct Inner {
    values: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

/// In-memory store for testing.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<Inner>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.values.borrow().get(key).cloned()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.get()
    }

    /// Make every later write fail with a quota error.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.inner.fail_writes.get() {
            return Err(StoreError::QuotaExceeded(key.to_string()));
        }
        self.inner
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.inner.writes.set(self.inner.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
        b.remove("k").unwrap();
        assert!(a.raw("k").is_none());
    }

    #[test]
    fn test_failing_writes() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        assert_eq!(store.set("k", "v"), Err(StoreError::QuotaExceeded("k".into())));
        assert_eq!(store.write_count(), 0);
    }
}
