use crate::error::{ContentError, ContentErrorExt};
use cab_database::{Document, DocumentStore};
use cab_kernel::safe_nanoid;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{info, instrument};

/// Documents to load into a store, grouped by collection.
///
/// The JSON shape is `{ "<collection>": [ { "id": "...", ... } ] }`. Entries without a
/// string `id` get a generated one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed {
    collections: BTreeMap<String, Vec<Document>>,
}

/// Documents written per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: BTreeMap<String, usize>,
}

impl SeedReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.inserted.values().sum()
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (collection, count) in &self.inserted {
            writeln!(f, "{collection:<18} {count:>6}")?;
        }
        write!(f, "{:<18} {:>6}", "total", self.total())
    }
}

impl Seed {
    /// Builds a seed from parsed JSON.
    ///
    /// # Errors
    /// Returns [`ContentError::Seed`] when the top level is not an object of arrays of
    /// objects.
    pub fn from_value(value: Value) -> Result<Self, ContentError> {
        let Value::Object(groups) = value else {
            return Err(invalid("top level must be an object keyed by collection"));
        };

        let mut collections = BTreeMap::new();
        for (collection, entries) in groups {
            let Value::Array(entries) = entries else {
                return Err(invalid(format!("'{collection}' must be an array of documents")));
            };

            let mut documents = Vec::with_capacity(entries.len());
            for entry in entries {
                let (id, data) = Document::from_value(entry)
                    .context(format!("Entry of '{collection}'"))?;
                documents.push(Document::new(id.unwrap_or_else(|| safe_nanoid!()), data));
            }
            collections.insert(collection, documents);
        }

        Ok(Self { collections })
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    /// Returns [`ContentError::Io`] if the file cannot be read, [`ContentError::Json`] if it
    /// is not JSON, and [`ContentError::Seed`] if it is not shaped as a seed.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let bytes =
            tokio::fs::read(path).await.context(format!("Reading seed {}", path.display()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .context(format!("Parsing seed {}", path.display()))?;
        Self::from_value(value)
    }

    /// Collections in the seed, sorted.
    pub fn collections(&self) -> impl Iterator<Item = (&str, &[Document])> {
        self.collections.iter().map(|(name, docs)| (name.as_str(), docs.as_slice()))
    }

    /// Inserts (or replaces) every document, collection by collection.
    ///
    /// # Errors
    /// Stops at the first store error, which names the offending document.
    #[instrument(skip_all, fields(collections = self.collections.len()))]
    pub async fn apply<S: DocumentStore>(&self, store: &S) -> Result<SeedReport, ContentError> {
        let mut report = SeedReport::default();

        for (collection, documents) in &self.collections {
            for document in documents {
                store
                    .insert(collection, document.clone())
                    .await
                    .context(format!("Seeding {collection}/{}", document.id))?;
            }
            info!(%collection, count = documents.len(), "Collection seeded");
            report.inserted.insert(collection.clone(), documents.len());
        }

        Ok(report)
    }
}

fn invalid(message: impl Into<std::borrow::Cow<'static, str>>) -> ContentError {
    ContentError::Seed { message: message.into(), context: None }
}
