//! # Localization
//!
//! Translatable content fields are stored either as legacy plain strings or as `{fr, en}`
//! records. This crate holds the two operations built on that contract:
//!
//! * [`resolver`]: reads one display string out of a raw JSON field with a deterministic
//!   fallback (the typed equivalent lives in `cab_domain::localized`);
//! * [`migrator`]: upgrades legacy strings to records across the collections named by a
//!   declarative [`schema`], idempotently and with a dry-run mode.
//!
//! ## Example
//!
//! ```rust
//! use cab_database::{Database, Document, DocumentStore};
//! use cab_localization::{MigrateOptions, Migrator};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::builder().url("mem://").init().await?;
//! let (_, data) = Document::from_value(json!({ "title": "Bonjour" }))?;
//! db.insert("announcements", Document::new("welcome", data)).await?;
//!
//! let summary = Migrator::default().run(&db, &MigrateOptions::default()).await?;
//! assert_eq!(summary.updated(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod migrator;
pub mod resolver;
pub mod schema;
pub mod summary;

pub use crate::error::{LocalizationError, LocalizationErrorExt};
pub use migrator::{MigrateOptions, Migrator, migrate_document};
pub use resolver::{resolve_field, resolve_list_value, resolve_value};
pub use schema::{CollectionSchema, FieldKind, FieldSpec, LocalizationSchema};
pub use summary::{CollectionSummary, DocumentFailure, MigrationSummary};
