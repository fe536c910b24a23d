use super::validation::ConfigValidationError;
use crate::theme::registry::DEFAULT_THEME_ID;
use crate::theme::storage::DEFAULT_STORAGE_KEY;
use crate::theme::types::ThemeId;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use store::RetryPolicy;

pub const MIN_RETRY_ATTEMPTS: u32 = 1;
pub const MAX_RETRY_ATTEMPTS: u32 = RetryPolicy::DEFAULT_MAX_ATTEMPTS;

/// Main application configuration
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    theme: ThemeSettings,
    #[serde(default)]
    retry: RetrySettings,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Some(configured) = &self.theme.default_theme {
            if configured.parse::<ThemeId>().is_err() {
                errors.push(ConfigValidationError::DefaultTheme {
                    configured: configured.clone(),
                });
            }
        }

        if self
            .theme
            .storage_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            errors.push(ConfigValidationError::EmptyStorageKey);
        }

        let attempts = self.retry.max_attempts();
        if !(MIN_RETRY_ATTEMPTS..=MAX_RETRY_ATTEMPTS).contains(&attempts) {
            errors.push(ConfigValidationError::RetryAttempts {
                configured: attempts,
                min_limit: MIN_RETRY_ATTEMPTS,
                max_limit: MAX_RETRY_ATTEMPTS,
            });
        }

        if self.retry.max_delay_ms() < self.retry.base_delay_ms() {
            errors.push(ConfigValidationError::RetryDelays {
                base_delay_ms: self.retry.base_delay_ms(),
                max_delay_ms: self.retry.max_delay_ms(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn retry(&self) -> &RetrySettings {
        &self.retry
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

/// Theme preference configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeSettings {
    default_theme: Option<String>,
    storage_key: Option<String>,
    storage_path: Option<PathBuf>,
    quota_bytes: Option<usize>,
}

impl ThemeSettings {
    /// Theme used when nothing valid is stored
    pub fn default_theme(&self) -> ThemeId {
        self.default_theme
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_THEME_ID)
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    /// Preference file location (default: `<config dir>/cargotower/preferences.json`)
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join("cargotower"))
                .unwrap_or_else(|| PathBuf::from(".cargotower"))
                .join("preferences.json")
        })
    }

    pub fn quota_bytes(&self) -> Option<usize> {
        self.quota_bytes
    }
}

/// Storage retry configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RetrySettings {
    max_attempts: Option<u32>,
    base_delay_ms: Option<u64>,
    max_delay_ms: Option<u64>,
}

impl RetrySettings {
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(RetryPolicy::DEFAULT_MAX_ATTEMPTS)
    }

    pub fn base_delay_ms(&self) -> u64 {
        self.base_delay_ms
            .unwrap_or(RetryPolicy::DEFAULT_BASE_DELAY.as_millis() as u64)
    }

    pub fn max_delay_ms(&self) -> u64 {
        self.max_delay_ms
            .unwrap_or(RetryPolicy::DEFAULT_MAX_DELAY.as_millis() as u64)
    }

    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts(),
            Duration::from_millis(self.base_delay_ms()),
            Duration::from_millis(self.max_delay_ms()),
        )
    }
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
