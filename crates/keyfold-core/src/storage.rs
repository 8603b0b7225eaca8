//! Storage port for the persisted key record.
//!
//! Decouples the identity service from where the record lives. Production
//! code uses [`FileStorage`]; tests use [`MemoryStorage`], whose clones
//! share one backing cell so a "restarted" service observes earlier writes.

use std::{io, path::PathBuf, sync::Arc};

use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised by key record storage adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Underlying I/O failure while reading or writing the record
    #[error("storage i/o error: {0}")]
    Io(String),

    /// The key record could not be converted to or from its stored form
    #[error("record serialization error: {0}")]
    Serialize(String),
}

/// Convert `io::Error` to `StorageError` (adapters surface raw I/O this way)
impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Convert `serde_json::Error` to `StorageError`
impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Where the serialized key record lives.
///
/// One record per storage: `save` overwrites, `load` returns the latest
/// saved record, `clear` removes it.
///
/// # Invariants
///
/// - `save` MUST be atomic with respect to crashes: an interrupted save
///   leaves behind either the old record or the new one, never a truncated
///   mix of both.
/// - `clear` MUST succeed when no record exists.
pub trait KeyStorage: Clone + Send + Sync + 'static {
    /// Loads the stored record, or `None` if nothing has been saved.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Saves `record`, replacing any previous one.
    fn save(
        &self,
        record: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Removes the stored record.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}

/// In-memory storage backed by a shared cell.
///
/// Clones share the cell, so a test can hand one clone to a service, drop
/// the service, and open another over the second clone to simulate an app
/// restart without touching the filesystem.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    record: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.record.lock().await.clone())
    }

    async fn save(&self, record: &str) -> Result<(), StorageError> {
        *self.record.lock().await = Some(record.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.record.lock().await = None;
        Ok(())
    }
}

/// File-backed storage keeping the record at a single path.
///
/// Saves write a sibling `.tmp` file first and rename it over the target,
/// so a crash mid-write leaves the previous record intact.
#[derive(Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `path`. The parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl KeyStorage for FileStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, record: &str) -> Result<(), StorageError> {
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, record).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
