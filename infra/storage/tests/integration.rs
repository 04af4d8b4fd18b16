use ksync_storage::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_path_traversal_blocked() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    assert!(storage.resolve("../etc/passwd").is_err());
    assert!(storage.resolve("foo/../../bar").is_err());
    assert!(storage.resolve("/etc/passwd").is_err());
}

#[tokio::test]
async fn test_write_read_roundtrip() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    storage.write("sites/settings.json", br#"{"site_name":"Acme"}"#).await.unwrap();
    assert!(storage.exists("sites/settings.json").unwrap());

    let data = storage.read("sites/settings.json").await.unwrap();
    assert_eq!(data, br#"{"site_name":"Acme"}"#);

    let meta = storage.metadata("sites/settings.json").await.unwrap();
    assert_eq!(meta.len(), data.len() as u64);
}

#[tokio::test]
async fn test_overwrite_replaces_content() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    storage.write("settings.json", b"first").await.unwrap();
    storage.write("settings.json", b"second").await.unwrap();

    assert_eq!(storage.read("settings.json").await.unwrap(), b"second");
    let leftovers = std::fs::read_dir(storage.root())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(".ksynctmp."))
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_missing_files() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    assert!(storage.read_optional("nope.json").await.unwrap().is_none());
    let err = storage.read("nope.json").await.unwrap_err();
    assert_eq!(err.kind(), "file_not_found");
    assert!(matches!(storage.delete("nope.json").await, Err(StorageError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_delete_and_exists() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    storage.write("tmp/file.txt", b"x").await.unwrap();
    assert!(storage.exists("tmp/file.txt").unwrap());

    storage.delete("tmp/file.txt").await.unwrap();
    assert!(!storage.exists("tmp/file.txt").unwrap());
}

#[tokio::test]
async fn test_connect_without_create_requires_existing_root() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent");

    let err = Storage::builder().root(&missing).create(false).connect().await.unwrap_err();
    assert_eq!(err.kind(), "io");
}

#[tokio::test]
async fn test_connect_purges_orphaned_tmp_files() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("settings.json.ksynctmp.9"), b"{").unwrap();

    let _storage = Storage::builder()
        .root(temp.path())
        .tmp_grace(std::time::Duration::ZERO)
        .connect()
        .await
        .unwrap();

    assert!(!temp.path().join("settings.json.ksynctmp.9").exists());
}

#[tokio::test]
async fn test_failed_swap_drops_temp_file() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
    std::fs::create_dir(temp.path().join("settings.json")).unwrap();

    let err = storage.write("settings.json", b"{}").await.unwrap_err();
    assert_eq!(err.kind(), "io");

    let leftovers = std::fs::read_dir(storage.root())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(".ksynctmp."))
        .count();
    assert_eq!(leftovers, 0);
}
