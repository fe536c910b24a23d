use std::fmt;
use thiserror::Error;

/// Failures reported by a [`KeyValueStore`](crate::KeyValueStore) backend.
///
/// Each variant carries enough context to be logged on its own. The retry
/// policy only looks at [`BackendError::is_retryable`] to decide whether
/// another attempt is worthwhile.
///
/// # Retry classification
///
/// - [`QuotaExceeded`] - permanent, retrying cannot free space
/// - [`InvalidValue`] - permanent, the caller handed in bad data
/// - [`Corrupt`] - permanent, the container itself cannot be decoded
/// - [`Unavailable`] / [`Io`] - transient, retried with backoff
///
/// [`QuotaExceeded`]: BackendError::QuotaExceeded
/// [`InvalidValue`]: BackendError::InvalidValue
/// [`Corrupt`]: BackendError::Corrupt
/// [`Unavailable`]: BackendError::Unavailable
/// [`Io`]: BackendError::Io
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Storage quota exceeded: {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Storage contents are corrupt: {reason}")]
    Corrupt { reason: String },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl BackendError {
    /// Whether a later attempt of the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            BackendError::QuotaExceeded { .. }
                | BackendError::InvalidValue(_)
                | BackendError::Corrupt { .. }
        )
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Io(err.to_string())
    }
}

/// The storage operation a [`StorageError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    Save,
    Load,
    Clear,
}

impl StorageOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageOperation::Save => "save",
            StorageOperation::Load => "load",
            StorageOperation::Clear => "clear",
        }
    }
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a storage operation, raised once the retry policy
/// gave up or the failure was classified as non-retryable.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StorageError {
    pub message: String,
    pub operation: StorageOperation,
    pub retryable: bool,
    #[source]
    pub source: BackendError,
}

impl StorageError {
    pub fn new(operation: StorageOperation, source: BackendError, attempts: u32) -> Self {
        let message = if attempts > 1 {
            format!("Failed to {operation} preference after {attempts} attempts: {source}")
        } else {
            format!("Failed to {operation} preference: {source}")
        };

        Self {
            message,
            operation,
            retryable: source.is_retryable(),
            source,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self.source, BackendError::QuotaExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_retry_classification() {
        assert!(!BackendError::QuotaExceeded { needed: 10, limit: 5 }.is_retryable());
        assert!(!BackendError::InvalidValue("x".to_string()).is_retryable());
        assert!(
            !BackendError::Corrupt {
                reason: "bad".to_string()
            }
            .is_retryable()
        );
        assert!(BackendError::Unavailable("busy".to_string()).is_retryable());
        assert!(BackendError::Io("denied".to_string()).is_retryable());
    }

    #[test]
    fn test_storage_error_carries_context() {
        let err = StorageError::new(
            StorageOperation::Save,
            BackendError::Unavailable("locked".to_string()),
            3,
        );

        assert_eq!(err.operation, StorageOperation::Save);
        assert!(err.retryable);
        assert!(err.message.contains("save"));
        assert!(err.message.contains("3 attempts"));
        assert!(err.source().is_some());
        assert!(!err.is_quota_exceeded());
    }

    #[test]
    fn test_single_attempt_message() {
        let err = StorageError::new(
            StorageOperation::Clear,
            BackendError::QuotaExceeded { needed: 2, limit: 1 },
            1,
        );

        assert_eq!(
            err.to_string(),
            "Failed to clear preference: Storage quota exceeded: 2 bytes needed, 1 bytes allowed"
        );
        assert!(!err.retryable);
        assert!(err.is_quota_exceeded());
    }
}
