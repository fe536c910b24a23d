use cargotower::theme::{ThemeId, ThemeProvider, ThemeStorageService};
use claims::*;
use std::path::Path;
use std::sync::Arc;
use store::{FileStore, KeyValueStore, RetryPolicy};
use tempfile::TempDir;

const KEY: &str = "cargotower.theme";

fn service_at(path: &Path) -> ThemeStorageService {
    ThemeStorageService::new(Arc::new(FileStore::new(path)))
}

fn read_document(path: &Path) -> serde_json::Map<String, serde_json::Value> {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_preference_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    let first = ThemeProvider::new(service_at(&path));
    first.initialize().await;
    assert_eq!(first.current_theme(), ThemeId::Business);
    first.set_theme("tech").await;
    drop(first);

    let second = ThemeProvider::new(service_at(&path));
    second.initialize().await;
    assert_eq!(second.current_theme(), ThemeId::Tech);
    assert!(!second.is_loading());
}

#[tokio::test]
async fn test_record_is_stored_as_versioned_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    assert_ok!(service_at(&path).save("premium").await);

    let document = read_document(&path);
    let raw = document[KEY].as_str().unwrap();
    let record: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(record["themeId"], "premium");
    assert_eq!(record["version"], "1.0.0");
    assert!(record["timestamp"].is_i64());
}

#[tokio::test]
async fn test_corrupt_record_on_disk_is_removed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    let store = FileStore::new(&path);
    store.set(KEY, "{not json").await.unwrap();
    store.set("cargotower.sidebar", "collapsed").await.unwrap();

    let service = service_at(&path);
    assert_none!(service.load().await);

    let document = read_document(&path);
    assert!(!document.contains_key(KEY));
    assert_eq!(document["cargotower.sidebar"], "collapsed");
}

#[tokio::test]
async fn test_corrupt_file_is_repaired_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "garbage").unwrap();

    let provider = ThemeProvider::new(service_at(&path));
    provider.initialize().await;
    assert_eq!(provider.current_theme(), ThemeId::Business);
    assert!(read_document(&path).is_empty());

    provider.set_theme("fresh").await;
    assert_some_eq!(service_at(&path).load().await, ThemeId::Fresh);
}

#[tokio::test(start_paused = true)]
async fn test_quota_exceeded_keeps_session_theme() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&path).with_quota(16));
    let service = ThemeStorageService::new(backend).with_retry_policy(RetryPolicy::default());

    let err = service.save("tech").await.unwrap_err();
    assert!(err.is_quota_exceeded());
    assert!(!err.retryable);

    let provider = ThemeProvider::new(service);
    provider.initialize().await;
    provider.set_theme("tech").await;
    assert_eq!(provider.current_theme(), ThemeId::Tech);
    assert!(!path.exists());
}
