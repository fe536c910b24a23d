use crate::backend::KeyValueStore;
use crate::errors::BackendError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Durable store backed by a single JSON object file.
///
/// The whole file is rewritten on every mutation through a temporary file and
/// a rename, so readers never observe a half-written document. An optional
/// quota bounds the serialized size of the file; writes that would exceed it
/// fail with [`BackendError::QuotaExceeded`].
pub struct FileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes: None,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, BackendError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| BackendError::Corrupt {
            reason: format!("'{}' is not a JSON object of strings: {e}", self.path.display()),
        })
    }

    // Mutations start from an empty document when the existing file cannot
    // be decoded, which replaces the corrupt file on the next write.
    async fn read_entries_for_update(&self) -> Result<BTreeMap<String, String>, BackendError> {
        match self.read_entries().await {
            Err(BackendError::Corrupt { reason }) => {
                log::warn!("Discarding corrupt preference file: {reason}");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), BackendError> {
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|e| BackendError::InvalidValue(e.to_string()))?;

        if let Some(limit) = self.quota_bytes {
            if serialized.len() > limit {
                return Err(BackendError::QuotaExceeded {
                    needed: serialized.len(),
                    limit,
                });
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serialized.as_bytes()).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let entries = self.read_entries().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    // A corrupt file has nothing to keep, so removing any key from it
    // rewrites it as an empty document.
    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = match self.read_entries().await {
            Err(BackendError::Corrupt { reason }) => {
                log::warn!("Replacing corrupt preference file: {reason}");
                return self.write_entries(&BTreeMap::new()).await;
            }
            other => other?,
        };
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
