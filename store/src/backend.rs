use crate::errors::BackendError;
use async_trait::async_trait;

/// Asynchronous string key-value storage.
///
/// This is the only contract the preference services depend on. Any backend
/// that can get, set and remove string values by key can be plugged in: the
/// on-disk [`FileStore`](crate::FileStore), the in-process
/// [`MemoryStore`](crate::MemoryStore), or a scripted double in tests.
///
/// Implementations should report transient conditions (busy files, locked
/// resources) as retryable [`BackendError`] variants and permanent ones
/// (quota exhaustion) as non-retryable, so callers wrapping them in a
/// [`RetryPolicy`](crate::RetryPolicy) behave correctly.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), BackendError>;

    /// Human readable backend name used in log lines.
    fn backend_name(&self) -> &'static str;
}
