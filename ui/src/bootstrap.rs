use crate::config::AppConfig;
use crate::theme::{ThemeProvider, ThemeStorageService};
use std::sync::Arc;
use store::{FileStore, KeyValueStore};

/// File-backed preference store described by the `[theme]` section.
pub fn build_store(config: &AppConfig) -> FileStore {
    let settings = config.theme();
    let store = FileStore::new(settings.storage_path());
    match settings.quota_bytes() {
        Some(quota) => store.with_quota(quota),
        None => store,
    }
}

pub fn build_storage_service(
    config: &AppConfig,
    backend: Arc<dyn KeyValueStore>,
) -> ThemeStorageService {
    ThemeStorageService::new(backend)
        .with_key(config.theme().storage_key())
        .with_retry_policy(config.retry().policy())
}

/// Provider wired to the configured store. Not yet initialized.
pub fn build_provider(config: &AppConfig) -> Arc<ThemeProvider> {
    let backend: Arc<dyn KeyValueStore> = Arc::new(build_store(config));
    log::debug!(
        "Using {} preference store at {}",
        backend.backend_name(),
        config.theme().storage_path().display()
    );
    let storage = build_storage_service(config, backend);
    ThemeProvider::with_default_theme(storage, config.theme().default_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeId;

    fn config_for(path: &std::path::Path) -> AppConfig {
        let src = format!(
            "[theme]\n\
            default_theme = \"premium\"\n\
            storage_key = \"test.theme\"\n\
            storage_path = \"{}\"\n\n\
            [retry]\n\
            max_attempts = 2\n",
            path.display()
        );
        toml::from_str(&src).unwrap()
    }

    #[tokio::test]
    async fn test_provider_uses_configured_default_and_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("prefs.json"));

        let provider = build_provider(&config);
        provider.initialize().await;

        assert_eq!(provider.current_theme(), ThemeId::Premium);
        assert_eq!(provider.storage().key(), "test.theme");
        assert_eq!(provider.storage().retry_policy().max_attempts(), 2);
    }

    #[tokio::test]
    async fn test_saved_choice_survives_a_new_provider() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("prefs.json"));

        let first = build_provider(&config);
        first.initialize().await;
        first.set_theme("fresh").await;

        let second = build_provider(&config);
        second.initialize().await;
        assert_eq!(second.current_theme(), ThemeId::Fresh);
    }
}
