//! Trait definition for the durable key-value surface

use super::error::StorageResult;

/// Durable key-value persistence surface
///
/// Values are opaque strings; callers own serialization. Implementations
/// must treat `remove` of a missing key as success.
///
/// # Examples
///
/// ```
/// use creditdesk::storage::{KeyValueStore, MemoryBackend};
///
/// let store = MemoryBackend::new();
/// store.set("user", "{}").unwrap();
/// assert_eq!(store.get("user").unwrap().as_deref(), Some("{}"));
/// store.remove("user").unwrap();
/// assert!(store.get("user").unwrap().is_none());
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Erase the value stored under `key`
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Short backend name for diagnostics
    fn backend_name(&self) -> &'static str;
}
