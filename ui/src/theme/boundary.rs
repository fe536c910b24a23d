use crate::error::AppResult;
use crate::theme::context::BuildMode;
use crate::theme::registry::default_theme_config;
use crate::theme::types::ThemeConfig;
use std::fmt::Write;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    TryAgain,
    Reload,
}

impl RecoveryAction {
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryAction::TryAgain => "Try again",
            RecoveryAction::Reload => "Reload",
        }
    }
}

/// Minimal screen shown when applying a theme failed. Always styled with the
/// default theme, since the failing theme cannot be trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackScreen {
    pub theme: &'static ThemeConfig,
    pub title: String,
    pub error_summary: Option<String>,
    pub actions: [RecoveryAction; 2],
}

impl FallbackScreen {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} [{}]", self.title, self.theme.name);
        let _ = writeln!(
            out,
            "The theme could not be applied. The default theme is active."
        );
        if let Some(summary) = &self.error_summary {
            let _ = writeln!(out, "Details: {summary}");
        }
        let actions: Vec<&str> = self.actions.iter().map(RecoveryAction::label).collect();
        let _ = write!(out, "[{}]", actions.join("] ["));
        out
    }
}

#[derive(Debug)]
pub enum BoundaryOutcome<T> {
    Rendered(T),
    Fallback(FallbackScreen),
}

impl<T> BoundaryOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, BoundaryOutcome::Fallback(_))
    }
}

/// Result of [`ThemeErrorBoundary::recover`].
#[derive(Debug)]
pub enum RecoveryOutcome<T> {
    Rendered(T),
    /// No action was chosen; the fallback screen stays up.
    Fallback(FallbackScreen),
    /// The user asked for a reload. The caller owns the session and must
    /// rebuild it.
    ReloadRequested,
}

/// Catches failures while a theme is applied, both returned errors and
/// panics, and turns them into a [`FallbackScreen`].
#[derive(Debug, Clone, Copy)]
pub struct ThemeErrorBoundary {
    mode: BuildMode,
}

impl ThemeErrorBoundary {
    pub fn new(mode: BuildMode) -> Self {
        Self { mode }
    }

    pub fn guard<T, F>(&self, render: F) -> BoundaryOutcome<T>
    where
        F: FnOnce() -> AppResult<T>,
    {
        let summary = match panic::catch_unwind(AssertUnwindSafe(render)) {
            Ok(Ok(value)) => return BoundaryOutcome::Rendered(value),
            Ok(Err(e)) => e.to_string(),
            Err(payload) => payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "theme rendering panicked".to_string()),
        };

        log::error!("Theme error boundary caught: {summary}");
        BoundaryOutcome::Fallback(self.fallback_screen(summary))
    }

    /// Like [`guard`](Self::guard), but lets `choose` act on the fallback
    /// screen. [`RecoveryAction::TryAgain`] runs `render` again,
    /// [`RecoveryAction::Reload`] is handed back to the caller and `None`
    /// keeps the fallback.
    pub fn recover<T, F, C>(&self, mut render: F, mut choose: C) -> RecoveryOutcome<T>
    where
        F: FnMut() -> AppResult<T>,
        C: FnMut(&FallbackScreen) -> Option<RecoveryAction>,
    {
        loop {
            let screen = match self.guard(&mut render) {
                BoundaryOutcome::Rendered(value) => return RecoveryOutcome::Rendered(value),
                BoundaryOutcome::Fallback(screen) => screen,
            };

            match choose(&screen) {
                Some(RecoveryAction::TryAgain) => {
                    log::info!("Retrying theme rendering");
                }
                Some(RecoveryAction::Reload) => return RecoveryOutcome::ReloadRequested,
                None => return RecoveryOutcome::Fallback(screen),
            }
        }
    }

    fn fallback_screen(&self, summary: String) -> FallbackScreen {
        FallbackScreen {
            theme: default_theme_config(),
            title: "Theme loading failed".to_string(),
            error_summary: (self.mode == BuildMode::Development).then_some(summary),
            actions: [RecoveryAction::TryAgain, RecoveryAction::Reload],
        }
    }
}
