use cab_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[cab_derive::cab_error]
pub enum DatabaseError {
    /// Invalid collection names, document ids or builder settings.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when the engine named by the URL cannot be started.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The addressed document does not exist.
    #[error("Document not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for the file engine's storage errors.
    #[error("Storage error{}: {source}", format_context(.context))]
    Storage {
        #[source]
        source: StorageError,
        context: Option<Cow<'static, str>>,
    },

    /// A stored document is not a JSON object, or a document could not be encoded.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DatabaseError {
    pub(crate) fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound { message: format!("{collection}/{id}").into(), context: None }
    }
}
