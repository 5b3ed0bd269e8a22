use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::AppError;

/// Trait for blob storage of uploaded files.
///
/// Abstracted as a trait so tests can swap the backing directory or use a mock.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Write content under the given key, replacing any previous object.
    async fn put_object(&self, key: &str, content: Vec<u8>) -> Result<(), AppError>;

    /// Remove the object under the given key. A missing object is not an error.
    async fn delete_object(&self, key: &str) -> Result<(), AppError>;
}

/// Local-disk implementation of StorageClient.
///
/// Keys are relative paths below `root`, which is normally the static root so
/// stored objects are served by the `/static/` passthrough.
pub struct LocalStorageClient {
    root: PathBuf,
}

impl LocalStorageClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !safe {
            return Err(AppError::Storage(format!("Invalid object key '{key}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl StorageClient for LocalStorageClient {
    async fn put_object(&self, key: &str, content: Vec<u8>) -> Result<(), AppError> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create '{}': {}", parent.display(), e)))?;
        }

        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to put object '{}': {}", key, e)))?;

        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        let path = self.resolve(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to delete object '{}': {}",
                key, e
            ))),
        }
    }
}
