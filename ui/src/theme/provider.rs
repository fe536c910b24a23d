use crate::theme::registry::{DEFAULT_THEME_ID, get_theme_config};
use crate::theme::storage::ThemeStorageService;
use crate::theme::types::{ThemeConfig, ThemeId};
use crate::theme::validation::ThemeIdValidator;
use crate::validation::Validator;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use tokio::sync::{OnceCell, watch};
use tokio::task::JoinHandle;

/// Session theme state owned by a [`ThemeProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub current_theme: ThemeId,
    pub is_loading: bool,
}

/// Snapshot handed to consumers: the active theme resolved to its
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeContext {
    pub current_theme: ThemeId,
    pub theme_config: &'static ThemeConfig,
    pub is_loading: bool,
}

impl From<ThemeState> for ThemeContext {
    fn from(state: ThemeState) -> Self {
        Self {
            current_theme: state.current_theme,
            theme_config: get_theme_config(state.current_theme),
            is_loading: state.is_loading,
        }
    }
}

/// Persistence task started by [`ThemeProvider::set_theme`].
///
/// The in-memory theme is already switched and the write is already running
/// on the tokio runtime when this is returned. Awaiting it only waits for the
/// write to finish; dropping it does not cancel the write. It never fails.
#[derive(Debug)]
pub struct PendingSave {
    task: Option<JoinHandle<()>>,
}

impl PendingSave {
    fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => Self {
                task: Some(runtime.spawn(work)),
            },
            Err(_) => {
                log::error!("No tokio runtime is running, theme preference was not persisted");
                Self::ready()
            }
        }
    }

    /// A save with nothing left to do.
    pub(crate) fn ready() -> Self {
        Self { task: None }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Future for PendingSave {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let Some(task) = self.task.as_mut() else {
            return Poll::Ready(());
        };

        match Pin::new(task).poll(cx) {
            Poll::Ready(result) => {
                if let Err(e) = result {
                    log::error!("Theme persistence task failed: {e}");
                }
                self.task = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Single source of truth for the active theme of a session.
///
/// The provider starts in the loading state with the default theme. The
/// first call to [`initialize`](Self::initialize) reads the stored
/// preference and moves it to ready; every failure on that path ends in the
/// default theme. Ready is final for the lifetime of the provider.
///
/// Theme changes are applied to memory immediately and persisted in the
/// background. A failed write is logged and the session keeps the chosen
/// theme. A theme chosen while the initial load is still running takes
/// precedence over the stored one.
pub struct ThemeProvider {
    storage: ThemeStorageService,
    default_theme: ThemeId,
    state: watch::Sender<ThemeState>,
    initialized: OnceCell<()>,
    selected: AtomicBool,
}

impl ThemeProvider {
    pub fn new(storage: ThemeStorageService) -> Arc<Self> {
        Self::with_default_theme(storage, DEFAULT_THEME_ID)
    }

    pub fn with_default_theme(storage: ThemeStorageService, default_theme: ThemeId) -> Arc<Self> {
        let (state, _) = watch::channel(ThemeState {
            current_theme: default_theme,
            is_loading: true,
        });

        Arc::new(Self {
            storage,
            default_theme,
            state,
            initialized: OnceCell::new(),
            selected: AtomicBool::new(false),
        })
    }

    /// Spawn [`initialize`](Self::initialize) on the tokio runtime.
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let provider = Arc::clone(self);
        tokio::spawn(async move { provider.initialize().await })
    }

    /// Load the stored preference once. Concurrent and later calls wait for
    /// the first load and then return without touching storage again.
    pub async fn initialize(&self) {
        self.initialized
            .get_or_init(|| self.load_initial_theme())
            .await;
    }

    async fn load_initial_theme(&self) {
        let loaded = AssertUnwindSafe(self.storage.load()).catch_unwind().await;

        let theme = match loaded {
            Ok(Some(id)) => {
                log::info!("Restored theme preference: {id}");
                id
            }
            Ok(None) => {
                log::debug!("No stored theme preference, using {}", self.default_theme);
                self.default_theme
            }
            Err(_) => {
                log::error!(
                    "Loading the theme preference panicked, using {}",
                    self.default_theme
                );
                self.default_theme
            }
        };

        self.state.send_modify(|state| {
            if self.selected.load(Ordering::SeqCst) {
                log::debug!("Keeping theme {} selected during startup", state.current_theme);
            } else {
                state.current_theme = theme;
            }
            state.is_loading = false;
        });
    }

    /// Switch the session theme to `raw`.
    ///
    /// Valid identifiers are applied before this returns and a save is
    /// started. Invalid identifiers reset the session to the default theme
    /// and a clear of the stored preference is started instead.
    pub fn set_theme(&self, raw: &str) -> PendingSave {
        let storage = self.storage.clone();
        self.selected.store(true, Ordering::SeqCst);

        match ThemeIdValidator.validate(raw) {
            Ok(id) => {
                self.state.send_modify(|state| state.current_theme = id);
                log::info!("Switched to theme: {id}");

                PendingSave::spawn(async move {
                    if let Err(e) = storage.save(id.as_str()).await {
                        log::error!("Theme '{id}' is active but was not persisted: {e}");
                    }
                })
            }
            Err(e) => {
                let fallback = self.default_theme;
                log::warn!(
                    "{}\n\nFalling back to theme '{fallback}'",
                    e.user_message()
                );
                self.state.send_modify(|state| state.current_theme = fallback);

                PendingSave::spawn(async move {
                    if let Err(e) = storage.clear().await {
                        log::warn!("Failed to clear theme preference: {e}");
                    }
                })
            }
        }
    }

    pub fn state(&self) -> ThemeState {
        *self.state.borrow()
    }

    pub fn context(&self) -> ThemeContext {
        self.state().into()
    }

    pub fn current_theme(&self) -> ThemeId {
        self.state().current_theme
    }

    pub fn theme_config(&self) -> &'static ThemeConfig {
        get_theme_config(self.current_theme())
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn default_theme(&self) -> ThemeId {
        self.default_theme
    }

    pub fn storage(&self) -> &ThemeStorageService {
        &self.storage
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.state.subscribe()
    }
}
