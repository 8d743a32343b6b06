//! One-shot upgrade of legacy plain strings to `{fr, en}` records.
//!
//! The transformation is a pure function of a document's current body
//! ([`migrate_document`]), so runs are idempotent: once a store has converged a second
//! run finds nothing to write. Writes are partial updates carrying only the changed
//! top-level fields, one per changed document.

use crate::error::LocalizationError;
use crate::schema::{CollectionSchema, FieldKind, LocalizationSchema};
use crate::summary::{CollectionSummary, DocumentFailure, MigrationSummary};
use cab_database::{DocumentStore, Fields};
use cab_domain::Language;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

/// Run settings; the default is a live run over every schema collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Compute and report, write nothing.
    pub dry_run: bool,
    /// Logged for the record. Both slots receive the same source text, so it never
    /// changes the outcome.
    pub lang_fallback: Language,
    /// Names or aliases to restrict the run to; empty means all.
    pub collections: Vec<String>,
}

impl MigrateOptions {
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    #[must_use]
    pub const fn lang_fallback(mut self, lang: Language) -> Self {
        self.lang_fallback = lang;
        self
    }

    #[must_use]
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collections.push(name.into());
        self
    }
}

/// Applies a [`LocalizationSchema`] to a document store.
#[derive(Debug, Clone, Default)]
pub struct Migrator {
    schema: LocalizationSchema,
}

impl Migrator {
    #[must_use]
    pub const fn new(schema: LocalizationSchema) -> Self {
        Self { schema }
    }

    #[must_use]
    pub const fn schema(&self) -> &LocalizationSchema {
        &self.schema
    }

    /// Migrates every selected collection, sequentially in schema order and by document id
    /// inside a collection.
    ///
    /// Failures do not stop the run: a collection that cannot be listed or a document
    /// that cannot be updated is logged, recorded in
    /// [`MigrationSummary::failures`] and skipped. Nothing is rolled back.
    ///
    /// # Errors
    /// Returns [`LocalizationError::UnknownCollection`] before touching the store when the
    /// filter names a collection the schema lacks.
    #[instrument(
        skip(self, store, options),
        fields(dry_run = options.dry_run, lang_fallback = %options.lang_fallback)
    )]
    pub async fn run<S>(
        &self,
        store: &S,
        options: &MigrateOptions,
    ) -> Result<MigrationSummary, LocalizationError>
    where
        S: DocumentStore,
    {
        let selected = self.schema.select(options.collections.as_slice())?;
        info!(collections = selected.len(), "Starting localized content migration");

        let mut summary =
            MigrationSummary { dry_run: options.dry_run, ..MigrationSummary::default() };
        for collection in selected {
            let counts =
                migrate_collection(store, collection, options.dry_run, &mut summary.failures)
                    .await;
            info!(
                collection = %counts.collection,
                scanned = counts.scanned,
                updated = counts.updated,
                failed = counts.failed,
                "Collection migrated"
            );
            summary.collections.push(counts);
        }

        info!(
            scanned = summary.scanned(),
            updated = summary.updated(),
            failures = summary.failures.len(),
            "Localized content migration finished"
        );
        Ok(summary)
    }
}

async fn migrate_collection<S: DocumentStore>(
    store: &S,
    schema: &CollectionSchema,
    dry_run: bool,
    failures: &mut Vec<DocumentFailure>,
) -> CollectionSummary {
    let mut counts = CollectionSummary::new(&schema.name);

    let documents = match store.list(&schema.name).await {
        Ok(documents) => documents,
        Err(err) => {
            warn!(
                collection = %schema.name,
                error = %err,
                kind = err.kind(),
                "Listing failed, skipping collection"
            );
            counts.failed += 1;
            failures.push(DocumentFailure {
                collection: schema.name.clone(),
                id: None,
                reason: err.to_string(),
            });
            return counts;
        },
    };

    for document in documents {
        counts.scanned += 1;
        let Some(patch) = migrate_document(schema, &document.data) else {
            continue;
        };

        let fields: Vec<&str> = patch.keys().map(String::as_str).collect();
        debug!(
            collection = %schema.name,
            id = %document.id,
            ?fields,
            dry_run,
            "Document needs migration"
        );

        if dry_run {
            counts.updated += 1;
            continue;
        }

        match store.update(&schema.name, &document.id, patch).await {
            Ok(_) => counts.updated += 1,
            Err(err) => {
                warn!(
                    collection = %schema.name,
                    id = %document.id,
                    error = %err,
                    kind = err.kind(),
                    "Update failed, skipping document"
                );
                counts.failed += 1;
                failures.push(DocumentFailure {
                    collection: schema.name.clone(),
                    id: Some(document.id),
                    reason: err.to_string(),
                });
            },
        }
    }

    counts
}

/// The partial update a document needs: only the top-level fields whose shape changes.
/// `None` when the document is already migrated.
#[must_use]
pub fn migrate_document(schema: &CollectionSchema, data: &Fields) -> Option<Fields> {
    let mut patch = Map::new();

    for field in &schema.fields {
        let Some(value) = data.get(&field.path) else {
            continue;
        };
        let migrated = match field.kind {
            FieldKind::Text => migrate_text(value),
            FieldKind::TextList => migrate_list(value),
            FieldKind::Nested => migrate_nested(value, &field.fields),
        };
        if let Some(migrated) = migrated {
            patch.insert(field.path.clone(), migrated);
        }
    }

    (!patch.is_empty()).then_some(patch)
}

/// Upgrades one localized value; `None` means "leave as is".
///
/// * a string becomes `{fr: s, en: s}`;
/// * a record with both slots as strings is final;
/// * a record with exactly one string slot gets the other slot filled with the same text,
///   keeping any extra keys;
/// * an array is upgraded element by element, non-text elements kept (see
///   [`migrate_list`] for fields declared as lists);
/// * anything else is not ours to touch.
#[must_use]
pub fn migrate_text(value: &Value) -> Option<Value> {
    match value {
        Value::String(text) => Some(record(text)),
        Value::Object(map) => repair_record(map),
        Value::Array(items) => {
            let mut changed = false;
            let upgraded: Vec<Value> = items
                .iter()
                .map(|item| match item {
                    Value::String(_) | Value::Object(_) => migrate_text(item).map_or_else(
                        || item.clone(),
                        |migrated| {
                            changed = true;
                            migrated
                        },
                    ),
                    _ => item.clone(),
                })
                .collect();
            changed.then_some(Value::Array(upgraded))
        },
        _ => None,
    }
}

/// [`migrate_text`] for a field declared as a list.
///
/// A lone string, or a record with a string slot, is upgraded and wrapped into a
/// one-element list so the field ends up in its declared shape. Anything else that is
/// not an array is left alone.
#[must_use]
pub fn migrate_list(value: &Value) -> Option<Value> {
    let element = match value {
        Value::Array(_) => return migrate_text(value),
        Value::String(_) => migrate_text(value)?,
        Value::Object(map) if has_text_slot(map) => {
            migrate_text(value).unwrap_or_else(|| value.clone())
        },
        _ => return None,
    };
    Some(Value::Array(vec![element]))
}

fn has_text_slot(map: &Map<String, Value>) -> bool {
    Language::ALL.iter().any(|lang| map.get(lang.code()).is_some_and(Value::is_string))
}

fn migrate_nested(value: &Value, fields: &[String]) -> Option<Value> {
    let Value::Array(items) = value else {
        return None;
    };

    let mut changed = false;
    let upgraded: Vec<Value> = items
        .iter()
        .map(|item| {
            let Value::Object(sub) = item else {
                return item.clone();
            };
            let mut sub = sub.clone();
            for field in fields {
                let Some(migrated) = sub.get(field).and_then(migrate_text) else {
                    continue;
                };
                sub.insert(field.clone(), migrated);
                changed = true;
            }
            Value::Object(sub)
        })
        .collect();

    changed.then_some(Value::Array(upgraded))
}

fn record(text: &str) -> Value {
    let mut map = Map::new();
    for lang in Language::ALL {
        map.insert(lang.code().to_owned(), Value::String(text.to_owned()));
    }
    Value::Object(map)
}

fn repair_record(map: &Map<String, Value>) -> Option<Value> {
    let slots: Vec<(Language, Option<&str>)> = Language::ALL
        .iter()
        .map(|&lang| (lang, map.get(lang.code()).and_then(Value::as_str)))
        .collect();

    let present = slots.iter().find_map(|(_, text)| *text)?;
    if slots.iter().all(|(_, text)| text.is_some()) {
        return None;
    }

    let mut repaired = map.clone();
    for (lang, text) in &slots {
        if text.is_none() {
            repaired.insert(lang.code().to_owned(), Value::String(present.to_owned()));
        }
    }
    Some(Value::Object(repaired))
}
