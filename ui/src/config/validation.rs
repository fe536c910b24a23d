use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid theme.default_theme: '{configured}'")]
    DefaultTheme { configured: String },
    #[error("Invalid theme.storage_key: key cannot be empty")]
    EmptyStorageKey,
    #[error("Invalid retry.max_attempts: {configured} (min: {min_limit}, max: {max_limit})")]
    RetryAttempts {
        configured: u32,
        min_limit: u32,
        max_limit: u32,
    },
    #[error("Invalid retry delays: max_delay_ms {max_delay_ms} < base_delay_ms {base_delay_ms}")]
    RetryDelays {
        base_delay_ms: u64,
        max_delay_ms: u64,
    },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::DefaultTheme { configured } => {
                format!(
                    "Unknown default theme!\n\n\
                    Your configured value: {configured}\n\
                    Valid themes: business, premium, fresh, tech\n\n\
                    Please update default_theme in the [theme] section of cargotower.toml."
                )
            }
            ConfigValidationError::EmptyStorageKey => {
                "Theme storage key is empty!\n\n\
                Please set storage_key in the [theme] section of cargotower.toml \
                or remove it to use the default."
                    .to_string()
            }
            ConfigValidationError::RetryAttempts {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Retry attempts out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update max_attempts in the [retry] section of cargotower.toml."
                )
            }
            ConfigValidationError::RetryDelays {
                base_delay_ms,
                max_delay_ms,
            } => {
                format!(
                    "Retry delay cap is below the base delay!\n\n\
                    base_delay_ms: {base_delay_ms}\n\
                    max_delay_ms: {max_delay_ms}\n\n\
                    Please make max_delay_ms at least as large as base_delay_ms."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
