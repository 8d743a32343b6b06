use crate::document::{Document, Fields};
use crate::error::DatabaseError;
use std::future::Future;

/// Collection-oriented access to stored documents.
///
/// Every engine validates collection names and ids before touching its backend.
/// Implementations must be cheap to share across tasks.
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, sorted by id. Unknown collections are empty.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Document>, DatabaseError>> + Send;

    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, DatabaseError>> + Send;

    /// Creates the document or replaces it wholesale.
    fn insert(
        &self,
        collection: &str,
        document: Document,
    ) -> impl Future<Output = Result<(), DatabaseError>> + Send;

    /// Merges `patch` into the top level of an existing document and returns the result.
    ///
    /// Fails with [`DatabaseError::NotFound`] when the document does not exist.
    fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> impl Future<Output = Result<Document, DatabaseError>> + Send;

    /// Fails with [`DatabaseError::NotFound`] when the document does not exist.
    fn delete(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), DatabaseError>> + Send;
}
