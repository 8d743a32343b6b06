use cab_database::DatabaseError;
use std::borrow::Cow;

/// A specialized [`LocalizationError`] enum of this crate.
#[cab_derive::cab_error]
pub enum LocalizationError {
    /// The schema is structurally invalid.
    #[error("Invalid localization schema{}: {message}", format_context(.context))]
    Schema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The schema file could not be read or parsed.
    #[error("Schema source error{}: {source}", format_context(.context))]
    Source {
        #[source]
        source: config::ConfigError,
        context: Option<Cow<'static, str>>,
    },

    /// A requested collection is neither a name nor an alias of the schema.
    #[error("Unknown collection{}: {message}", format_context(.context))]
    UnknownCollection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal localization error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
