//! # Content
//!
//! The read side of the site's collections: a typed [`Catalog`] over any
//! [`DocumentStore`](cab_database::DocumentStore), single-language [`views`] built through
//! the localized resolver, and the [`Seed`] loader that fills a store from a JSON file.
//!
//! ```rust
//! use cab_content::{Catalog, Seed};
//! use cab_database::Database;
//! use cab_domain::Language;
//! use cab_domain::content::Service;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::builder().url("mem://").init().await?;
//! Seed::from_value(json!({
//!     "services": [{ "id": "family", "title": { "fr": "Famille", "en": "Family" } }]
//! }))?
//! .apply(&db)
//! .await?;
//!
//! let services = Catalog::new(db).localized::<Service>(Language::En).await?;
//! assert_eq!(services[0].title, "Family");
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod seed;
pub mod views;

pub use crate::catalog::Catalog;
pub use crate::error::{ContentError, ContentErrorExt};
pub use crate::seed::{Seed, SeedReport};
pub use crate::views::{ContentView, Localize};
