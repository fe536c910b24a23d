use config::{Config, Environment, File};
use std::path::Path;

pub mod app;
pub mod validation;

pub use app::{AppConfig, LoggingConfig, RetrySettings, ThemeSettings};
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Configuration file looked up in the working directory when no path is
/// given. Unlike an explicit path it may be absent.
pub const DEFAULT_CONFIG_FILE: &str = "cargotower.toml";

/// Load configuration from a TOML file and `CARGOTOWER__*` environment
/// variables (e.g. `CARGOTOWER__THEME__DEFAULT_THEME=tech`). Environment
/// entries override file values.
pub fn load_config(path: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let file_source = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    let env_source = Environment::with_prefix("CARGOTOWER")
        .separator("__")
        .try_parsing(true);

    let config = match Config::builder()
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. \
                Please check your configuration file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => {
            if let Err(validation_errors) = app_config.validate() {
                let error_messages: Vec<String> =
                    validation_errors.iter().map(|e| e.user_message()).collect();
                return ConfigLoadResult::DeserializeError(format!(
                    "Configuration validation failed:\n{}",
                    error_messages.join("\n\n")
                ));
            }
            ConfigLoadResult::Success(Box::new(app_config))
        }
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}
