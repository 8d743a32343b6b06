use crate::document::{self, Document, Fields};
use crate::error::{DatabaseError, DatabaseErrorExt};
use crate::store::DocumentStore;
use cab_storage::{NamespacedStorage, Storage, StorageError};
use tracing::{debug, warn};

const EXTENSION: &str = "json";

/// File engine behind `file://<dir>`: `<dir>/<collection>/<id>.json`, one file per
/// document, written atomically through [`Storage`].
#[derive(Debug, Clone)]
pub struct FileStore {
    storage: Storage,
}

impl FileStore {
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    fn collection(&self, collection: &str) -> Result<NamespacedStorage, DatabaseError> {
        document::validate_name("Collection name", collection)?;
        Ok(self.storage.namespace(collection)?)
    }

    async fn read(
        &self,
        ns: &NamespacedStorage,
        id: &str,
    ) -> Result<Option<Fields>, DatabaseError> {
        let bytes = match ns.read(file_name(id)).await {
            Ok(bytes) => bytes,
            Err(StorageError::FileNotFound { .. }) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let data = serde_json::from_slice::<Fields>(&bytes)
            .context(format!("Decoding {}/{id}", ns.name()))?;
        Ok(Some(data))
    }

    async fn write(
        &self,
        ns: &NamespacedStorage,
        id: &str,
        data: &Fields,
    ) -> Result<(), DatabaseError> {
        let bytes = serde_json::to_vec_pretty(data).context("Encoding document")?;
        ns.write(file_name(id), &bytes).await.context(format!("Writing {}/{id}", ns.name()))
    }
}

fn file_name(id: &str) -> String {
    format!("{id}.{EXTENSION}")
}

impl DocumentStore for FileStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DatabaseError> {
        let ns = self.collection(collection)?;
        let ids = ns.list(EXTENSION).await?;

        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            if document::validate_name("Document id", &id).is_err() {
                warn!(collection, file = %id, "Skipping file with an invalid document id");
                continue;
            }
            // A concurrent delete between listing and reading is not an error.
            if let Some(data) = self.read(&ns, &id).await? {
                docs.push(Document::new(id, data));
            }
        }
        debug!(collection, count = docs.len(), "Collection loaded");
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DatabaseError> {
        document::validate_key(collection, id)?;
        let ns = self.collection(collection)?;
        Ok(self.read(&ns, id).await?.map(|data| Document::new(id, data)))
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<(), DatabaseError> {
        document::validate_key(collection, &doc.id)?;
        let ns = self.collection(collection)?;
        self.write(&ns, &doc.id, &doc.data).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Document, DatabaseError> {
        document::validate_key(collection, id)?;
        let ns = self.collection(collection)?;
        let mut data =
            self.read(&ns, id).await?.ok_or_else(|| DatabaseError::not_found(collection, id))?;
        document::merge(&mut data, patch);
        self.write(&ns, id, &data).await?;
        Ok(Document::new(id, data))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DatabaseError> {
        document::validate_key(collection, id)?;
        let ns = self.collection(collection)?;
        match ns.delete(file_name(id)).await {
            Ok(()) => Ok(()),
            Err(StorageError::FileNotFound { .. }) => Err(DatabaseError::not_found(collection, id)),
            Err(err) => Err(err.into()),
        }
    }
}

