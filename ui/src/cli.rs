//! Command-line interface for `cargotower`.
//!
//! ```bash
//! # List the built-in presets
//! cargotower themes
//!
//! # Switch the console to the tech theme and persist the choice
//! cargotower set tech
//!
//! # Check a custom theme file before shipping it
//! cargotower validate my-theme.toml
//! ```

use crate::error::{AppError, AppResult};
use crate::theme::types::{ThemeConfig, parse_hex_color};
use crate::theme::validation::{ThemeConfigValidator, ThemeIdValidator};
use crate::theme::{
    BuildMode, RecoveryAction, RecoveryOutcome, ThemeErrorBoundary, ThemeProvider,
    get_all_themes, get_theme_config, use_theme,
};
use crate::validation::Validator;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Cargotower theme preferences.
#[derive(Parser, Debug, Clone)]
#[command(name = "cargotower", author, version, about)]
pub struct Cli {
    /// Path to a TOML configuration file (default: ./cargotower.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the built-in theme presets
    Themes,
    /// Print a preset as JSON, or the active theme when no id is given
    Show { id: Option<String> },
    /// Print the active theme and the stored preference
    Current,
    /// Apply a theme and persist the choice
    Set { id: String },
    /// Remove the stored preference
    Clear,
    /// Validate a JSON or TOML theme file
    Validate { file: PathBuf },
}

pub async fn execute(command: &Command, provider: &Arc<ThemeProvider>) -> AppResult<String> {
    match command {
        Command::Themes => Ok(list_themes()),
        Command::Show { id } => {
            let config = match id {
                Some(raw) => get_theme_config(ThemeIdValidator.validate(raw.as_str())?),
                None => {
                    provider.initialize().await;
                    provider.theme_config()
                }
            };
            show_theme(config)
        }
        Command::Current => current(provider).await,
        Command::Set { id } => {
            let theme_id = ThemeIdValidator.validate(id.as_str())?;
            provider.initialize().await;
            provider.set_theme(theme_id.as_str()).await;

            if provider.storage().load().await != Some(theme_id) {
                return Err(AppError::Storage(format!(
                    "Theme '{theme_id}' is active for this session but could not be saved"
                )));
            }
            Ok(format!(
                "Theme set to {} ({})",
                theme_id,
                provider.theme_config().name
            ))
        }
        Command::Clear => {
            provider.storage().clear().await?;
            Ok("Theme preference cleared".to_string())
        }
        Command::Validate { file } => validate_file(file),
    }
}

fn list_themes() -> String {
    let mut out = String::new();
    for config in get_all_themes() {
        let _ = writeln!(
            out,
            "{:<10} {:<16} {}",
            config.id.as_str(),
            config.name,
            config.colors.primary
        );
    }
    out.trim_end().to_string()
}

fn show_theme(config: &ThemeConfig) -> AppResult<String> {
    let mut out = serde_json::to_string_pretty(config)
        .map_err(|e| AppError::Theme(format!("Failed to serialize theme: {e}")))?;
    out.push('\n');
    for (role, hex) in config.colors.roles() {
        if let Some((r, g, b)) = parse_hex_color(hex) {
            let _ = write!(out, "\n{role:<14} {hex} rgb({r}, {g}, {b})");
        }
    }
    Ok(out)
}

async fn current(provider: &Arc<ThemeProvider>) -> AppResult<String> {
    provider.initialize().await;
    let record = provider.storage().load_record().await;

    let stored = match record {
        Some(record) => {
            let saved_at = chrono::DateTime::from_timestamp_millis(record.timestamp)
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| record.timestamp.to_string());
            format!(
                "Stored preference: {} (saved {saved_at}, format {})",
                record.theme_id, record.version
            )
        }
        None => "Stored preference: none".to_string(),
    };

    let active = {
        let _scope = provider.enter();
        let boundary = ThemeErrorBoundary::new(BuildMode::current());
        let mut retried = false;
        let outcome = boundary.recover(
            || {
                let theme = use_theme()?;
                let config = theme.theme_config();
                Ok(format!("Active theme: {} ({})", config.id, config.name))
            },
            // One retry, then leave the fallback on screen
            |_| (!std::mem::replace(&mut retried, true)).then_some(RecoveryAction::TryAgain),
        );
        match outcome {
            RecoveryOutcome::Rendered(line) => line,
            RecoveryOutcome::Fallback(screen) => screen.render(),
            RecoveryOutcome::ReloadRequested => {
                return Err(AppError::State("Theme reload requested".to_string()));
            }
        }
    };

    Ok(format!("{active}\n{stored}"))
}

fn read_theme_file(path: &Path) -> AppResult<Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read '{}': {e}", path.display())))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        let value: toml::Value = toml::from_str(&text)
            .map_err(|e| AppError::Theme(format!("Invalid TOML in '{}': {e}", path.display())))?;
        serde_json::to_value(value)
            .map_err(|e| AppError::Theme(format!("Unsupported TOML value: {e}")))
    } else {
        serde_json::from_str(&text)
            .map_err(|e| AppError::Theme(format!("Invalid JSON in '{}': {e}", path.display())))
    }
}

fn validate_file(path: &Path) -> AppResult<String> {
    let value = read_theme_file(path)?;
    ThemeConfigValidator.validate(&value)?;
    Ok(format!("{} is a valid theme configuration", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeId, ThemeStorageService};
    use std::io::Write as _;
    use store::MemoryStore;

    fn provider() -> Arc<ThemeProvider> {
        ThemeProvider::new(ThemeStorageService::new(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let args = ["cargotower", "--config", "ops.toml", "set", "tech"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ops.toml")));
        assert_eq!(
            cli.command,
            Command::Set {
                id: "tech".to_string()
            }
        );

        let cli = Cli::try_parse_from(["cargotower", "show"]).unwrap();
        assert_eq!(cli.command, Command::Show { id: None });
    }

    #[tokio::test]
    async fn test_themes_lists_every_preset() {
        let out = execute(&Command::Themes, &provider()).await.unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("Tech Neon"));
    }

    #[tokio::test]
    async fn test_show_rejects_unknown_id() {
        let err = execute(
            &Command::Show {
                id: Some("midnight".to_string()),
            },
            &provider(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Theme(msg) if msg.contains("midnight")));
    }

    #[tokio::test]
    async fn test_show_prints_json_and_swatches() {
        let out = execute(
            &Command::Show {
                id: Some("premium".to_string()),
            },
            &provider(),
        )
        .await
        .unwrap();
        assert!(out.contains("\"name\": \"Premium Gold\""));
        assert!(out.contains("rgb("));
    }

    #[tokio::test]
    async fn test_set_then_current_then_clear() {
        let provider = provider();

        let out = execute(
            &Command::Set {
                id: "fresh".to_string(),
            },
            &provider,
        )
        .await
        .unwrap();
        assert!(out.contains("Fresh Green"));
        assert_eq!(provider.current_theme(), ThemeId::Fresh);

        let out = execute(&Command::Current, &provider).await.unwrap();
        assert!(out.contains("Active theme: fresh"));
        assert!(out.contains("Stored preference: fresh"));

        execute(&Command::Clear, &provider).await.unwrap();
        let out = execute(&Command::Current, &provider).await.unwrap();
        assert!(out.contains("Stored preference: none"));
    }

    #[test]
    fn test_validate_reports_every_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"id = \"tech\"\nname = \"Broken\"\n").unwrap();

        let err = validate_file(file.path()).unwrap_err();
        let AppError::Theme(msg) = err else {
            panic!("expected theme error, got {err:?}");
        };
        assert!(msg.contains("Missing colors configuration"));
        assert!(msg.contains("Missing typography configuration"));
    }

    #[test]
    fn test_validate_accepts_a_preset_as_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let preset = serde_json::to_string(get_theme_config(ThemeId::Business)).unwrap();
        file.write_all(preset.as_bytes()).unwrap();

        let out = validate_file(file.path()).unwrap();
        assert!(out.ends_with("is a valid theme configuration"));
    }
}
