use crate::theme::types::ThemeId;
use crate::theme::validation::{ThemeIdValidator, is_valid_theme_id};
use crate::validation::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use store::{BackendError, KeyValueStore, RetryPolicy, StorageError, StorageOperation};

pub const DEFAULT_STORAGE_KEY: &str = "cargotower.theme";
pub const RECORD_VERSION: &str = "1.0.0";

/// Stored form of the theme preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedThemeRecord {
    pub theme_id: ThemeId,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub version: String,
}

impl PersistedThemeRecord {
    pub fn new(theme_id: ThemeId) -> Self {
        Self {
            theme_id,
            timestamp: chrono::Utc::now().timestamp_millis(),
            version: RECORD_VERSION.to_string(),
        }
    }

    /// Decode a stored record, rejecting anything that is not exactly the
    /// expected shape.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| format!("unparsable record: {e}"))?;

        let Some(object) = value.as_object() else {
            return Err("record is not an object".to_string());
        };

        let theme_id = object.get("themeId").unwrap_or(&Value::Null);
        let well_typed = theme_id.is_string()
            && object.get("timestamp").is_some_and(Value::is_i64)
            && object.get("version").is_some_and(Value::is_string);
        if !well_typed {
            return Err("record has missing or mistyped fields".to_string());
        }

        if !is_valid_theme_id(theme_id) {
            return Err(format!("record names unknown theme {theme_id}"));
        }

        serde_json::from_value(value).map_err(|e| format!("record could not be decoded: {e}"))
    }
}

/// Persists the current theme preference under a single key.
///
/// Backend calls run under a [`RetryPolicy`]. Corrupt records are removed
/// and reported as "nothing stored", and a load that keeps failing is logged
/// and reported the same way, so callers can always fall back to a default.
#[derive(Clone)]
pub struct ThemeStorageService {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    retry: RetryPolicy,
}

impl ThemeStorageService {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            key: DEFAULT_STORAGE_KEY.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub async fn save(&self, theme_id: &str) -> Result<(), StorageError> {
        let id = ThemeIdValidator.validate(theme_id).map_err(|e| {
            StorageError::new(
                StorageOperation::Save,
                BackendError::InvalidValue(e.user_message()),
                1,
            )
        })?;

        let record = PersistedThemeRecord::new(id);
        let serialized = serde_json::to_string(&record).map_err(|e| {
            StorageError::new(
                StorageOperation::Save,
                BackendError::InvalidValue(e.to_string()),
                1,
            )
        })?;

        self.retry
            .run(StorageOperation::Save, || self.backend.set(&self.key, &serialized))
            .await?;

        log::debug!(
            "Saved theme preference '{id}' to {} store",
            self.backend.backend_name()
        );
        Ok(())
    }

    pub async fn load(&self) -> Option<ThemeId> {
        self.load_record().await.map(|record| record.theme_id)
    }

    pub async fn load_record(&self) -> Option<PersistedThemeRecord> {
        let raw = match self
            .retry
            .run(StorageOperation::Load, || self.backend.get(&self.key))
            .await
        {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) if matches!(e.source, BackendError::Corrupt { .. }) => {
                log::warn!("Discarding corrupt theme preference: {e}");
                self.clear_corrupt().await;
                return None;
            }
            Err(e) => {
                log::error!("{e}");
                return None;
            }
        };

        match PersistedThemeRecord::parse(&raw) {
            Ok(record) => {
                if record.version != RECORD_VERSION {
                    log::debug!(
                        "Theme preference written by record version {}",
                        record.version
                    );
                }
                Some(record)
            }
            Err(reason) => {
                log::warn!("Discarding corrupt theme preference: {reason}");
                self.clear_corrupt().await;
                None
            }
        }
    }

    async fn clear_corrupt(&self) {
        if let Err(e) = self.clear().await {
            log::warn!("Failed to clear corrupt theme preference: {e}");
        }
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.retry
            .run(StorageOperation::Clear, || self.backend.remove(&self.key))
            .await?;
        log::debug!("Cleared theme preference");
        Ok(())
    }
}
