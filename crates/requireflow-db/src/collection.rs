//! Whole-document JSON collections.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::{DbError, DbResult};

/// A collection of records persisted as one JSON array document.
///
/// Mutations go through [`JsonCollection::modify`], which holds the
/// collection's write lock for the full read-modify-write cycle. Every handle
/// on the same path shares one lock, so two writers in the same process can
/// never both base their change on the same snapshot.
pub struct JsonCollection<T> {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a collection to its document path. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            write_lock: shared_lock(&path),
            path,
            _marker: PhantomData,
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scratch file a write goes through before it is renamed over the document.
    pub fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("collection");
        self.path
            .with_file_name(format!(".{}.tmp.{}", file_name, std::process::id()))
    }

    /// Whether the backing document exists.
    pub async fn exists(&self) -> DbResult<bool> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| DbError::Read {
                path: self.path.clone(),
                source,
            })
    }

    /// Load the full collection. A missing document is an empty collection.
    pub async fn load(&self) -> DbResult<Vec<T>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Document missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                error!(path = %self.path.display(), %source, "Failed to read document");
                return Err(DbError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| {
            error!(path = %self.path.display(), %source, "Document is not a valid collection");
            DbError::Malformed {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Replace the full collection.
    pub async fn replace(&self, items: &[T]) -> DbResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_document(items).await
    }

    /// Read the collection, apply `f`, and persist the result.
    ///
    /// When `f` fails nothing is written and its error is returned. When the
    /// write fails the document on disk still holds the prior collection.
    pub async fn modify<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<DbError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.write_document(&items).await?;
        Ok(out)
    }

    /// Write `items` only when no document exists yet. Returns whether it wrote.
    pub async fn seed_if_missing<F>(&self, items: F) -> DbResult<bool>
    where
        F: FnOnce() -> Vec<T>,
    {
        let _guard = self.write_lock.lock().await;
        if self.exists().await? {
            return Ok(false);
        }
        self.write_document(&items()).await?;
        Ok(true)
    }

    async fn write_document(&self, items: &[T]) -> DbResult<()> {
        let json = serde_json::to_vec_pretty(items)?;
        self.write_atomic(&json).await.map_err(|source| {
            error!(path = %self.path.display(), %source, "Failed to write document");
            DbError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = %self.path.display(), count = items.len(), "Document written");
        Ok(())
    }

    async fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        let tmp = self.temp_path();
        let result = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if result.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        result
    }
}

/// The write lock for `path`, shared by every handle opened on it.
fn shared_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_insert_with(|| Arc::new(Mutex::new(()))))
}
