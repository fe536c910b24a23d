use crate::error::{AppError, AppResult};
use crate::theme::provider::{PendingSave, ThemeContext, ThemeProvider};
use crate::theme::registry::{DEFAULT_THEME_ID, get_theme_config};
use crate::theme::types::{ThemeConfig, ThemeId};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    // Innermost scope last
    static ACTIVE_PROVIDERS: RefCell<Vec<Arc<ThemeProvider>>> = const { RefCell::new(Vec::new()) };
}

/// How misuse of the theme accessor is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Reading the theme outside a provider scope is an error.
    Development,
    /// Reading the theme outside a provider scope logs and yields the
    /// default theme.
    Production,
}

impl BuildMode {
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }
}

/// Guard returned by [`ThemeProvider::enter`]. While it is alive,
/// [`use_theme`] on this thread resolves to that provider. Scopes nest and
/// must be dropped in reverse order of creation; the guard is not `Send`.
#[must_use = "the provider scope ends when the guard is dropped"]
pub struct ProviderScope {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ProviderScope {
    fn drop(&mut self) {
        ACTIVE_PROVIDERS.with(|providers| providers.borrow_mut().truncate(self.depth));
    }
}

impl ThemeProvider {
    /// Make this provider the one [`use_theme`] resolves to on the current
    /// thread until the returned guard is dropped.
    pub fn enter(self: &Arc<Self>) -> ProviderScope {
        let depth = ACTIVE_PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            providers.push(Arc::clone(self));
            providers.len() - 1
        });

        ProviderScope {
            depth,
            _not_send: PhantomData,
        }
    }
}

fn active_provider() -> Option<Arc<ThemeProvider>> {
    ACTIVE_PROVIDERS.with(|providers| providers.borrow().last().cloned())
}

/// Consumer view of the theme, bound either to a provider or, outside any
/// provider in production builds, to the default theme.
#[derive(Clone)]
pub struct ThemeHandle {
    provider: Option<Arc<ThemeProvider>>,
}

impl std::fmt::Debug for ThemeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeHandle")
            .field("detached", &self.is_detached())
            .finish()
    }
}

impl ThemeHandle {
    fn detached() -> Self {
        Self { provider: None }
    }

    pub fn is_detached(&self) -> bool {
        self.provider.is_none()
    }

    pub fn context(&self) -> ThemeContext {
        match &self.provider {
            Some(provider) => provider.context(),
            None => ThemeContext {
                current_theme: DEFAULT_THEME_ID,
                theme_config: get_theme_config(DEFAULT_THEME_ID),
                is_loading: false,
            },
        }
    }

    pub fn current_theme(&self) -> ThemeId {
        self.context().current_theme
    }

    pub fn theme_config(&self) -> &'static ThemeConfig {
        self.context().theme_config
    }

    pub fn is_loading(&self) -> bool {
        self.context().is_loading
    }

    pub fn set_theme(&self, raw: &str) -> PendingSave {
        match &self.provider {
            Some(provider) => provider.set_theme(raw),
            None => {
                log::error!("Ignoring theme change to '{raw}': no theme provider is active");
                PendingSave::ready()
            }
        }
    }
}

/// Theme accessor for consumers, using the build's [`BuildMode`].
pub fn use_theme() -> AppResult<ThemeHandle> {
    use_theme_in(BuildMode::current())
}

pub fn use_theme_in(mode: BuildMode) -> AppResult<ThemeHandle> {
    if let Some(provider) = active_provider() {
        return Ok(ThemeHandle {
            provider: Some(provider),
        });
    }

    match mode {
        BuildMode::Development => Err(AppError::State(
            "use_theme must be called inside a ThemeProvider scope".to_string(),
        )),
        BuildMode::Production => {
            log::error!("use_theme called outside a ThemeProvider scope, using default theme");
            Ok(ThemeHandle::detached())
        }
    }
}
