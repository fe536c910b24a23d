//! # Cargotower Console Library
//!
//! Theme configuration and preference persistence for the Cargotower
//! freight administration console.
//!
//! ## Modules
//!
//! - [`bootstrap`] - Builds the preference store and theme provider from configuration
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Application error types
//! - [`logger`] - Logging setup
//! - [`theme`] - Presets, validation, persistence and the theme provider
//! - [`validation`] - Shared validator trait

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod theme;
pub mod validation;

pub use error::{AppError, AppResult};
pub use validation::Validator;
