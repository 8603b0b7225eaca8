//! Persistence tests for `FileStorage`.
//!
//! These tests verify that the key record survives storage close/reopen
//! cycles, simulating app restarts.

use keyfold_core::{FileStorage, KeyStorage};
use tempfile::tempdir;

const RECORD: &str = r#"{"privateKey":"...","publicKey":"...","fingerprint":"0123456789abcdef"}"#;

#[tokio::test]
async fn record_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("identity.json");

    // Save the record, then drop the storage handle
    {
        let storage = FileStorage::new(&path);
        storage.save(RECORD).await.unwrap();
    }

    // Reopen at the same path and verify
    {
        let storage = FileStorage::new(&path);
        assert_eq!(storage.load().await.unwrap().as_deref(), Some(RECORD));
    }
}

#[tokio::test]
async fn load_on_fresh_path_returns_none() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("missing.json"));
    assert_eq!(storage.load().await.unwrap(), None);
}

#[tokio::test]
async fn save_replaces_previous_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("identity.json");
    let storage = FileStorage::new(&path);

    storage.save("first").await.unwrap();
    storage.save("second").await.unwrap();

    assert_eq!(storage.load().await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn clear_removes_record_and_tolerates_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("identity.json");
    let storage = FileStorage::new(&path);

    storage.save(RECORD).await.unwrap();
    storage.clear().await.unwrap();
    assert_eq!(storage.load().await.unwrap(), None);

    // Clearing again must not fail
    storage.clear().await.unwrap();
}

#[tokio::test]
async fn save_leaves_no_tmp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("identity.json");
    let storage = FileStorage::new(&path);

    storage.save(RECORD).await.unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("identity.json")]);
}
