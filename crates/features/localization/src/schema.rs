//! Which fields of which collections are localized.
//!
//! The mapping is data, not code: [`LocalizationSchema::builtin`] covers the site's six
//! collections, and a TOML file with the same shape can replace it.
//!
//! ```toml
//! [[collections]]
//! name = "legalCategories"
//! fields = [
//!   { path = "title", kind = "text" },
//!   { path = "steps", kind = "nested", fields = ["title", "description"] },
//! ]
//! ```

use crate::error::{LocalizationError, LocalizationErrorExt};
use cab_domain::constants;
use config::{Config, File, FileFormat};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Expected shape of a localized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A single localized string.
    Text,
    /// An array whose elements are localized strings.
    TextList,
    /// An array of sub-records whose listed `fields` are localized strings.
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Top-level key in the document body.
    pub path: String,
    pub kind: FieldKind,
    /// Localized keys of each sub-record; `nested` only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl FieldSpec {
    pub fn text(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: FieldKind::Text, fields: Vec::new() }
    }

    pub fn text_list(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: FieldKind::TextList, fields: Vec::new() }
    }

    pub fn nested<I, S>(path: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            kind: FieldKind::Nested,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    /// Other spellings accepted when selecting this collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub fields: Vec<FieldSpec>,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self { name: name.into(), aliases: Vec::new(), fields }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationSchema {
    pub collections: Vec<CollectionSchema>,
}

impl Default for LocalizationSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LocalizationSchema {
    /// The localized fields of every content collection, in display order.
    #[must_use]
    pub fn builtin() -> Self {
        use FieldSpec as F;

        Self {
            collections: vec![
                CollectionSchema::new(
                    constants::SERVICES,
                    vec![
                        F::text("title"),
                        F::text("description"),
                        F::text("shortDescription"),
                        F::text("pricing"),
                        F::text("duration"),
                        F::text("metaTitle"),
                        F::text("metaDescription"),
                        F::text_list("features"),
                        F::text_list("benefits"),
                    ],
                ),
                CollectionSchema::new(constants::TEAM, vec![F::text("role"), F::text("bio")]),
                CollectionSchema::new(
                    constants::PROCESSES,
                    vec![F::text("title"), F::text("description")],
                )
                .with_alias(constants::PROCESS_ALIAS),
                CollectionSchema::new(
                    constants::TESTIMONIALS,
                    vec![F::text("content"), F::text("role")],
                ),
                CollectionSchema::new(
                    constants::ANNOUNCEMENTS,
                    vec![F::text("title"), F::text("content")],
                ),
                CollectionSchema::new(
                    constants::LEGAL_CATEGORIES,
                    vec![
                        F::text("title"),
                        F::text("description"),
                        F::nested("steps", ["title", "description"]),
                    ],
                ),
            ],
        }
    }

    /// Parses and validates a TOML schema.
    ///
    /// # Errors
    /// Returns [`LocalizationError::Source`] for unparsable input and
    /// [`LocalizationError::Schema`] when validation fails.
    pub fn from_toml_str(source: &str) -> Result<Self, LocalizationError> {
        Self::load(File::from_str(source, FileFormat::Toml))
    }

    /// Loads and validates a schema file; the format follows the extension (TOML expected).
    ///
    /// # Errors
    /// Returns [`LocalizationError::Source`] if the file is missing or unparsable and
    /// [`LocalizationError::Schema`] when validation fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LocalizationError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading localization schema");
        Self::load(File::from(path).required(true))
            .context(format!("Schema file {}", path.display()))
    }

    fn load<S>(source: S) -> Result<Self, LocalizationError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let schema = Config::builder().add_source(source).build()?.try_deserialize::<Self>()?;
        schema.validate()?;
        Ok(schema)
    }

    /// Checks names and paths.
    ///
    /// Rejects empty or duplicated collection names and aliases, empty, duplicated or
    /// dotted field paths, and sub-fields anywhere but on `nested` fields (which need at
    /// least one).
    ///
    /// # Errors
    /// Returns [`LocalizationError::Schema`] describing the first problem found.
    pub fn validate(&self) -> Result<(), LocalizationError> {
        let mut names = FxHashSet::default();

        for collection in &self.collections {
            for name in std::iter::once(&collection.name).chain(&collection.aliases) {
                if name.trim().is_empty() {
                    return Err(invalid("Collection names cannot be empty", &collection.name));
                }
                if !names.insert(name.as_str()) {
                    return Err(invalid(format!("Duplicate collection name '{name}'"), name));
                }
            }

            let mut paths = FxHashSet::default();
            for field in &collection.fields {
                check_path(&field.path, &collection.name)?;
                if !paths.insert(field.path.as_str()) {
                    return Err(invalid(
                        format!("Duplicate field '{}'", field.path),
                        &collection.name,
                    ));
                }
                match (field.kind, field.fields.is_empty()) {
                    (FieldKind::Nested, true) => {
                        return Err(invalid(
                            format!("Nested field '{}' lists no sub-fields", field.path),
                            &collection.name,
                        ));
                    },
                    (FieldKind::Nested, false) => {
                        for sub in &field.fields {
                            check_path(sub, &collection.name)?;
                        }
                    },
                    (_, false) => {
                        return Err(invalid(
                            format!("Only nested fields take sub-fields ('{}')", field.path),
                            &collection.name,
                        ));
                    },
                    (_, true) => {},
                }
            }
        }

        Ok(())
    }

    /// The collection answering to `name`, by name or alias.
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&CollectionSchema> {
        self.collections.iter().find(|c| c.answers_to(name))
    }

    /// The collections named by `filter` in schema order, or all of them when empty.
    /// Repeated or aliased names select a collection once.
    ///
    /// # Errors
    /// Returns [`LocalizationError::UnknownCollection`] for a name the schema lacks.
    pub fn select<S: AsRef<str>>(
        &self,
        filter: &[S],
    ) -> Result<Vec<&CollectionSchema>, LocalizationError> {
        if filter.is_empty() {
            return Ok(self.collections.iter().collect());
        }

        let mut wanted = FxHashSet::default();
        for name in filter {
            let name = name.as_ref();
            let collection =
                self.collection(name).ok_or_else(|| LocalizationError::UnknownCollection {
                    message: name.to_owned().into(),
                    context: None,
                })?;
            wanted.insert(collection.name.as_str());
        }

        Ok(self.collections.iter().filter(|c| wanted.contains(c.name.as_str())).collect())
    }
}

fn check_path(path: &str, collection: &str) -> Result<(), LocalizationError> {
    if path.trim().is_empty() {
        return Err(invalid("Field paths cannot be empty", collection));
    }
    if path.contains('.') {
        return Err(invalid(format!("Field path '{path}' must be a top-level key"), collection));
    }
    Ok(())
}

fn invalid(
    message: impl Into<std::borrow::Cow<'static, str>>,
    collection: &str,
) -> LocalizationError {
    LocalizationError::Schema {
        message: message.into(),
        context: Some(format!("collection '{collection}'").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid_and_complete() {
        let schema = LocalizationSchema::builtin();
        assert!(schema.validate().is_ok());

        let names: Vec<_> = schema.collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, constants::COLLECTIONS);
    }

    #[test]
    fn process_alias_resolves() {
        let schema = LocalizationSchema::builtin();
        assert_eq!(schema.collection("process").map(|c| c.name.as_str()), Some("processes"));
        assert!(schema.collection("blog").is_none());
    }

    #[test]
    fn select_dedupes_and_keeps_schema_order() {
        let schema = LocalizationSchema::builtin();
        let picked = schema.select(&["legalCategories", "process", "processes"]).unwrap();
        let names: Vec<_> = picked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["processes", "legalCategories"]);

        assert_eq!(schema.select::<&str>(&[]).unwrap().len(), 6);
        assert!(matches!(
            schema.select(&["blog"]),
            Err(LocalizationError::UnknownCollection { .. })
        ));
    }

    #[test]
    fn validation_rejects_bad_shapes() {
        let dup = LocalizationSchema {
            collections: vec![
                CollectionSchema::new("team", vec![FieldSpec::text("bio")]),
                CollectionSchema::new("staff", vec![]).with_alias("team"),
            ],
        };
        assert!(dup.validate().is_err());

        let dotted = LocalizationSchema {
            collections: vec![CollectionSchema::new("team", vec![FieldSpec::text("bio.fr")])],
        };
        assert!(dotted.validate().is_err());

        let empty_nested = LocalizationSchema {
            collections: vec![CollectionSchema::new(
                "legalCategories",
                vec![FieldSpec::nested("steps", Vec::<String>::new())],
            )],
        };
        assert!(empty_nested.validate().is_err());

        let stray_subfields = LocalizationSchema {
            collections: vec![CollectionSchema::new(
                "team",
                vec![FieldSpec { fields: vec!["x".to_owned()], ..FieldSpec::text("bio") }],
            )],
        };
        assert!(stray_subfields.validate().is_err());
    }
}
