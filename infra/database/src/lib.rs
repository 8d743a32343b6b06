//! # Database Infrastructure
//!
//! A small document store for Cabinet content: named collections of JSON documents,
//! addressed by id, behind the [`DocumentStore`] trait.
//!
//! ## Engines
//! - `mem://`: an in-process map, for tests and dry experiments.
//! - `file://<dir>`: one JSON file per document under `<dir>/<collection>/<id>.json`,
//!   written atomically (and optionally LZ4-compressed) through `cab-storage`.
//!
//! ## Example
//!
//! ```rust
//! use cab_database::{Database, DatabaseError, Document, DocumentStore};
//! use serde_json::json;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder().url("mem://").init().await?;
//!
//!     let (_, data) = Document::from_value(json!({ "title": "Droit de la famille" }))?;
//!     db.insert("services", Document::new("family-law", data)).await?;
//!
//!     let docs = db.list("services").await?;
//!     assert_eq!(docs[0].id, "family-law");
//!     Ok(())
//! }
//! ```

mod document;
mod error;
mod file;
mod memory;
mod store;

pub use document::{Document, Fields};
pub use error::{DatabaseError, DatabaseErrorExt};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::DocumentStore;

use cab_storage::{Compression, Storage};
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

const MEMORY_SCHEME: &str = "mem://";
const FILE_SCHEME: &str = "file://";

/// The engine selected by the connection URL.
#[derive(Debug, Clone)]
pub enum Engine {
    Memory(MemoryStore),
    File(FileStore),
}

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    engine: Engine,
    url: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(url = %self.url, "Document store handle dropped");
    }
}

/// Cheaply clonable handle to the configured document store.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// The URL this store was opened with.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.url
    }
}

impl Deref for Database {
    type Target = Engine;

    fn deref(&self) -> &Self::Target {
        &self.inner.engine
    }
}

impl DocumentStore for Database {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DatabaseError> {
        match &self.inner.engine {
            Engine::Memory(store) => store.list(collection).await,
            Engine::File(store) => store.list(collection).await,
        }
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DatabaseError> {
        match &self.inner.engine {
            Engine::Memory(store) => store.get(collection, id).await,
            Engine::File(store) => store.get(collection, id).await,
        }
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError> {
        match &self.inner.engine {
            Engine::Memory(store) => store.insert(collection, document).await,
            Engine::File(store) => store.insert(collection, document).await,
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Document, DatabaseError> {
        match &self.inner.engine {
            Engine::Memory(store) => store.update(collection, id, patch).await,
            Engine::File(store) => store.update(collection, id, patch).await,
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DatabaseError> {
        match &self.inner.engine {
            Engine::Memory(store) => store.delete(collection, id).await,
            Engine::File(store) => store.delete(collection, id).await,
        }
    }
}

/// A fluent builder for opening a document store from a URL.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    compression: bool,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection URL (`mem://` or `file://<dir>`).
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// LZ4-compresses documents written by the file engine. Ignored by `mem://`.
    pub const fn compression(mut self, enabled: bool) -> Self {
        self.compression = enabled;
        self
    }

    /// Consumes the builder and opens the engine named by the URL.
    ///
    /// For `file://` the directory is created when missing and stale temporary files of
    /// interrupted writes are purged.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if no URL was given or the file path is empty.
    /// * [`DatabaseError::Connection`] for unsupported schemes.
    /// * [`DatabaseError::Storage`] if the storage root cannot be prepared.
    #[instrument(skip(self), fields(url = self.url, compression = self.compression))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;

        let engine = if url == MEMORY_SCHEME {
            Engine::Memory(MemoryStore::new())
        } else if let Some(dir) = url.strip_prefix(FILE_SCHEME) {
            if dir.is_empty() {
                return Err(DatabaseError::Validation {
                    message: "file:// URL needs a directory".into(),
                    context: Some(url.into()),
                });
            }
            let compression = if self.compression { Compression::Lz4 } else { Compression::None };
            let storage = Storage::builder()
                .root(PathBuf::from(dir))
                .compression(compression)
                .connect()
                .await
                .context("Opening file engine")?;
            Engine::File(FileStore::new(storage))
        } else {
            return Err(DatabaseError::Connection {
                message: "Unsupported engine, expected mem:// or file://<dir>".into(),
                context: Some(url.into()),
            });
        };

        info!(%url, "Document store ready");
        Ok(Database { inner: Arc::new(DatabaseInner { engine, url }) })
    }
}
