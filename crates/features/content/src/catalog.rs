use crate::error::{ContentError, ContentErrorExt};
use crate::views::Localize;
use cab_database::{Document, DocumentStore};
use cab_domain::Language;
use cab_domain::content::ContentEntity;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Typed, read-only access to the content collections of a store.
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    store: S,
}

impl<S: DocumentStore> Catalog<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Every entity of `T`'s collection, by `order` then id.
    ///
    /// Entity fields decode leniently, so an off-domain field reads as its default
    /// rather than hiding the document. A body that still fails to decode is logged and
    /// left out.
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn list<T: ContentEntity>(&self) -> Result<Vec<T>, ContentError> {
        let documents = self.store.list(T::COLLECTION).await.context("Listing collection")?;
        let total = documents.len();

        let mut entities: Vec<T> = documents.into_iter().filter_map(decode::<T>).collect();
        entities.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.id().cmp(b.id())));

        debug!(total, decoded = entities.len(), "Collection listed");
        Ok(entities)
    }

    /// One entity by id; `None` when missing or undecodable.
    pub async fn get<T: ContentEntity>(&self, id: &str) -> Result<Option<T>, ContentError> {
        let document = self.store.get(T::COLLECTION, id).await.context("Loading document")?;
        Ok(document.and_then(decode::<T>))
    }

    /// [`Catalog::list`] rendered in one language.
    pub async fn localized<T>(&self, lang: Language) -> Result<Vec<T::View>, ContentError>
    where
        T: ContentEntity + Localize,
    {
        Ok(self.list::<T>().await?.iter().map(|entity| entity.localize(lang)).collect())
    }
}

fn decode<T: ContentEntity>(document: Document) -> Option<T> {
    let Document { id, data } = document;
    match serde_json::from_value::<T>(Value::Object(data)) {
        Ok(mut entity) => {
            entity.set_id(id);
            Some(entity)
        },
        Err(err) => {
            warn!(collection = T::COLLECTION, %id, error = %err, "Skipping undecodable document");
            None
        },
    }
}
