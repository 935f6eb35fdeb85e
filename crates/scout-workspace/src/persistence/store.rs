//! Durable key-value store seam

/// Errors from the durable store
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("quota exceeded writing '{0}'")]
    QuotaExceeded(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// String key-value store (browser localStorage or an in-memory map)
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value; absent keys are not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Write only when the stored value differs. Returns whether a write happened.
    fn set_if_changed(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        if self.get(key)?.as_deref() == Some(value) {
            return Ok(false);
        }
        self.set(key, value)?;
        Ok(true)
    }
}
