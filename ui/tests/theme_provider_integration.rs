use cargotower::AppError;
use cargotower::theme::storage::DEFAULT_STORAGE_KEY;
use cargotower::theme::{
    BoundaryOutcome, BuildMode, ThemeErrorBoundary, ThemeId, ThemeProvider, ThemeStorageService,
    use_theme, use_theme_in,
};
use claims::*;
use std::sync::Arc;
use std::time::Duration;
use store::BackendError;
use store::testing::{ScriptedStore, StoreCall};

fn provider_with(store: &Arc<ScriptedStore>) -> Arc<ThemeProvider> {
    ThemeProvider::new(ThemeStorageService::new(store.clone()))
}

fn unavailable() -> BackendError {
    BackendError::Unavailable("storage offline".to_string())
}

#[tokio::test(start_paused = true)]
async fn test_boot_recovers_from_transient_read_failures() {
    let store = Arc::new(ScriptedStore::new());
    store
        .seed(
            DEFAULT_STORAGE_KEY,
            r#"{"themeId":"premium","timestamp":1700000000000,"version":"1.0.0"}"#,
        )
        .await;
    store.fail_next(StoreCall::Get, unavailable());
    store.fail_next(StoreCall::Get, unavailable());

    let provider = provider_with(&store);
    let started = tokio::time::Instant::now();
    provider.initialize().await;

    assert_eq!(provider.current_theme(), ThemeId::Premium);
    assert_eq!(store.count(StoreCall::Get), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(300));
}

#[tokio::test]
async fn test_set_theme_is_visible_to_scoped_consumers_before_save() {
    let store = Arc::new(ScriptedStore::new());
    let provider = provider_with(&store);
    provider.initialize().await;

    let pending = {
        let _scope = provider.enter();
        let theme = assert_ok!(use_theme());
        let pending = theme.set_theme("fresh");
        assert_eq!(theme.current_theme(), ThemeId::Fresh);
        assert_eq!(theme.theme_config().name, "Fresh Green");
        pending
    };
    assert_eq!(store.count(StoreCall::Set), 0);

    pending.await;
    let saved = store.calls().into_iter().find(|c| c.call == StoreCall::Set);
    let saved = saved.unwrap();
    assert!(saved.value.unwrap().contains(r#""themeId":"fresh""#));
}

#[tokio::test(start_paused = true)]
async fn test_failed_save_does_not_roll_back() {
    let store = Arc::new(ScriptedStore::new());
    store.fail_always(StoreCall::Set, unavailable());
    let provider = provider_with(&store);
    provider.initialize().await;

    provider.set_theme("tech").await;

    assert_eq!(provider.current_theme(), ThemeId::Tech);
    assert_eq!(store.count(StoreCall::Set), 3);
    assert_none!(store.peek(DEFAULT_STORAGE_KEY).await);
}

#[tokio::test]
async fn test_unknown_stored_theme_boots_default_and_is_cleared() {
    let store = Arc::new(ScriptedStore::new());
    store
        .seed(
            DEFAULT_STORAGE_KEY,
            r#"{"themeId":"midnight","timestamp":1,"version":"1.0.0"}"#,
        )
        .await;

    let provider = provider_with(&store);
    provider.initialize().await;

    assert_eq!(provider.current_theme(), ThemeId::Business);
    assert_none!(store.peek(DEFAULT_STORAGE_KEY).await);
}

#[test]
fn test_hook_outside_provider_depends_on_build_mode() {
    let err = use_theme_in(BuildMode::Development).unwrap_err();
    assert!(matches!(err, AppError::State(_)));

    let handle = assert_ok!(use_theme_in(BuildMode::Production));
    assert!(handle.is_detached());
    assert_eq!(handle.current_theme(), ThemeId::Business);
    assert!(!handle.is_loading());
}

#[tokio::test]
async fn test_boundary_falls_back_when_consumer_fails() {
    let store = Arc::new(ScriptedStore::new());
    let provider = provider_with(&store);
    provider.initialize().await;
    provider.set_theme("tech").await;

    let _scope = provider.enter();
    let boundary = ThemeErrorBoundary::new(BuildMode::Development);
    let outcome = boundary.guard::<(), _>(|| {
        let theme = use_theme()?;
        Err(AppError::Theme(format!(
            "font '{}' is not installed",
            theme.theme_config().typography.font_family
        )))
    });

    let BoundaryOutcome::Fallback(screen) = outcome else {
        panic!("expected fallback screen");
    };
    assert_eq!(screen.theme.id, ThemeId::Business);
    assert!(screen.render().contains("is not installed"));
    assert_eq!(provider.current_theme(), ThemeId::Tech);
}
