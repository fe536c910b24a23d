use std::fmt::Display;
use store::StorageError;

/// Application-wide error types for the Cargotower admin console.
///
/// # Error Categories
///
/// - [`Config`] - Configuration loading and validation errors
/// - [`Storage`] - Preference persistence failures that survived retrying
/// - [`Theme`] - Invalid theme identifiers or configurations
/// - [`State`] - Misuse of session state, such as reading the theme outside
///   a provider scope in development builds
/// - [`Io`] - File system failures outside the preference store
///
/// Theme and storage failures are normally absorbed by the provider, which
/// falls back to the default theme. They only reach callers through the
/// CLI and through direct use of the storage service.
///
/// # Examples
///
/// ```no_run
/// use cargotower::error::{AppError, AppResult};
///
/// fn load_theme_file(path: &str) -> AppResult<String> {
///     std::fs::read_to_string(path)
///         .map_err(|e| AppError::Io(format!("Failed to read '{path}': {e}")))
/// }
/// ```
///
/// [`Config`]: AppError::Config
/// [`Storage`]: AppError::Storage
/// [`Theme`]: AppError::Theme
/// [`State`]: AppError::State
/// [`Io`]: AppError::Io
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Config(String),

    Storage(String),

    Theme(String),

    State(String),

    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Storage(msg) => write!(f, "Storage Error: {msg}"),
            AppError::Theme(msg) => write!(f, "Theme Error: {msg}"),
            AppError::State(msg) => write!(f, "State Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
