//! # Domain Models
//!
//! Pure types shared by every Cabinet crate: supported languages, the localized string
//! shape with its read-time resolution, the content entities of each collection, and the
//! application configuration tree.
//! Keep it lean: no I/O and no storage concerns, just data and small helpers.

pub mod config;
pub mod constants;
pub mod content;
pub mod language;
pub mod localized;

pub use language::Language;
pub use localized::{LocalizedString, LocalizedText, resolve, resolve_list};
