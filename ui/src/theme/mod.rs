//! # Theme System Module
//!
//! Theme presets, validation and the persisted theme preference for the
//! Cargotower admin console.
//!
//! ## Architecture
//!
//! - **[`registry`]** - Built-in presets and total id-to-config lookup
//! - **[`validation`]** - Identifier and configuration checks
//! - **[`ThemeStorageService`]** - Stored preference with retry and
//!   corruption recovery
//! - **[`ThemeProvider`]** - Session state, startup load and theme switching
//! - **[`use_theme`]** - Scoped accessor used by consumers
//! - **[`ThemeErrorBoundary`]** - Fallback screen when applying a theme fails
//!
//! ## Presets
//!
//! - **Business** (default) - Corporate blue, 12 column grid
//! - **Premium** - Dark gold, asymmetric golden-ratio layout
//! - **Fresh** - Green, fluid layout with playful animations
//! - **Tech** - Neon on navy, monospace type, glitch effects
//!
//! ## Basic Usage
//!
//! ```no_run
//! use cargotower::theme::{ThemeProvider, ThemeStorageService, use_theme};
//! use std::sync::Arc;
//! use store::FileStore;
//!
//! # async fn run() -> cargotower::error::AppResult<()> {
//! let backend = Arc::new(FileStore::new("preferences.json"));
//! let provider = ThemeProvider::new(ThemeStorageService::new(backend));
//! provider.initialize().await;
//!
//! let _scope = provider.enter();
//! let theme = use_theme()?;
//! println!("Active theme: {}", theme.theme_config().name);
//!
//! // Applied immediately; awaiting only waits for persistence
//! theme.set_theme("tech").await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling and Fallbacks
//!
//! - **Unknown ids** - Resolve to the default preset
//! - **Corrupt stored data** - Removed, treated as no preference
//! - **Storage outages** - Retried with capped backoff, then default theme
//! - **Failed saves** - Logged; the session keeps the chosen theme

pub mod boundary;
pub mod context;
pub mod provider;
pub mod registry;
pub mod storage;
pub mod types;
pub mod validation;

pub use boundary::{
    BoundaryOutcome, FallbackScreen, RecoveryAction, RecoveryOutcome, ThemeErrorBoundary,
};
pub use context::{BuildMode, ProviderScope, ThemeHandle, use_theme, use_theme_in};
pub use provider::{PendingSave, ThemeContext, ThemeProvider, ThemeState};
pub use registry::{get_all_themes, get_theme_config, resolve_theme_config};
pub use storage::{PersistedThemeRecord, ThemeStorageService};
pub use types::{ThemeConfig, ThemeId};
