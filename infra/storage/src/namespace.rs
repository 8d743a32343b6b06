use crate::engine::Storage;
use crate::error::{StorageError, StorageErrorExt};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// A validated namespace directory name: non-empty, `[A-Za-z0-9_-]` only.
///
/// Case is preserved so that collection names such as `legalCategories` map one-to-one
/// onto directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceName(pub String);

impl TryFrom<String> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.is_empty() {
            return Err(StorageError::PathTraversalAttempt {
                message: "EMPTY".into(),
                context: Some("Namespace cannot be empty".into()),
            });
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(StorageError::PathTraversalAttempt {
                message: value.to_owned().into(),
                context: Some("Namespace contains illegal characters".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for NamespaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scoped view of the storage engine rooted at `<root>/<namespace>/`.
///
/// Inherits compression and sandboxing from the parent [`Storage`]; cloning is cheap.
#[derive(Debug, Clone)]
pub struct NamespacedStorage {
    storage: Storage,
    namespace: Arc<str>,
}

impl NamespacedStorage {
    pub(crate) fn new(storage: Storage, namespace: impl Into<Arc<str>>) -> Self {
        Self { storage, namespace: namespace.into() }
    }

    /// The namespace this view is scoped to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.namespace
    }

    /// Resolves a path relative to the namespace directory.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if the path escapes the sandbox.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        self.storage.resolve_internal(Some(&*self.namespace), path)
    }

    /// Reads a file of this namespace. See [`Storage::read`].
    ///
    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if the file does not exist.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        self.storage.read_internal(Some(&*self.namespace), path).await
    }

    /// Atomically writes a file of this namespace. See [`Storage::write`].
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] on disk failures.
    pub async fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        self.storage.write_internal(Some(&*self.namespace), path, data).await
    }

    /// Deletes a file of this namespace.
    ///
    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if the file does not exist.
    pub async fn delete(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        self.storage.delete_internal(Some(&*self.namespace), path).await
    }

    /// Checks whether a file exists in this namespace.
    ///
    /// # Errors
    /// Fails only when path resolution fails.
    pub fn exists(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        Ok(self.storage.resolve_internal(Some(&*self.namespace), path)?.is_file())
    }

    /// Lists the sorted stems of files with the given extension (without the dot).
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the directory exists but cannot be scanned.
    pub async fn list(&self, extension: &str) -> Result<Vec<String>, StorageError> {
        self.storage.list_internal(&self.namespace, extension).await
    }

    /// Filesystem metadata of a stored file. With compression on, `len()` is the
    /// compressed size.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the file is missing or unreadable.
    pub async fn metadata(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<std::fs::Metadata, StorageError> {
        let resolved = self.resolve(path)?;
        fs::metadata(&resolved)
            .await
            .context(format!("Failed to get metadata: {}", resolved.display()))
    }
}
