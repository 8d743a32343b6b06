use crate::document::{self, Document, Fields};
use crate::error::DatabaseError;
use crate::store::DocumentStore;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

type Collections = FxHashMap<String, BTreeMap<String, Fields>>;

/// In-process engine behind `mem://`. Contents vanish with the last handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.read().values().map(BTreeMap::len).sum()
    }
}

impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DatabaseError> {
        document::validate_name("Collection name", collection)?;
        let guard = self.collections.read();
        Ok(guard.get(collection).map_or_else(Vec::new, |docs| {
            docs.iter().map(|(id, data)| Document::new(id.clone(), data.clone())).collect()
        }))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DatabaseError> {
        document::validate_key(collection, id)?;
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<(), DatabaseError> {
        document::validate_key(collection, &doc.id)?;
        trace!(collection, id = %doc.id, "Inserting document");
        self.collections.write().entry(collection.to_owned()).or_default().insert(doc.id, doc.data);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Document, DatabaseError> {
        document::validate_key(collection, id)?;
        let mut guard = self.collections.write();
        let data = guard
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| DatabaseError::not_found(collection, id))?;
        document::merge(data, patch);
        Ok(Document::new(id, data.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DatabaseError> {
        document::validate_key(collection, id)?;
        self.collections
            .write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(drop)
            .ok_or_else(|| DatabaseError::not_found(collection, id))
    }
}
