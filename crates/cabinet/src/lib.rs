//! Facade crate for Cabinet features and shared modules.
//! Re-exports the domain, kernel, infrastructure and feature crates so apps depend on one
//! crate. Keep it thin: it composes other crates and holds no business logic.

pub use cab_database as database;
pub use cab_domain as domain;
pub use cab_kernel as kernel;
pub use cab_logger as logger;
pub use cab_storage as storage;

/// Feature slices.
pub mod features {
    pub use cab_content as content;
    pub use cab_localization as localization;
}

use cab_database::{Database, DatabaseError};
use cab_domain::config::AppConfig;

/// Opens the document store described by `config.database`.
///
/// # Errors
/// Forwards [`DatabaseError`] from the store builder.
pub async fn open_store(config: &AppConfig) -> Result<Database, DatabaseError> {
    Database::builder()
        .url(config.database.url.clone())
        .compression(config.database.compression)
        .init()
        .await
}
