use serde::Serialize;
use std::fmt;

/// Counters of one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub collection: String,
    /// Documents visited.
    pub scanned: usize,
    /// Documents with at least one field upgraded (or that would be, on a dry run).
    pub updated: usize,
    /// Documents whose update failed, never counted in `updated`, plus one when the
    /// collection itself could not be listed.
    pub failed: usize,
}

impl CollectionSummary {
    pub fn new(collection: impl Into<String>) -> Self {
        Self { collection: collection.into(), ..Self::default() }
    }
}

/// A document, or a whole collection when `id` is `None`, that could not be migrated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub collection: String,
    pub id: Option<String>,
    pub reason: String,
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}/{id}: {}", self.collection, self.reason),
            None => write!(f, "{}: {}", self.collection, self.reason),
        }
    }
}

/// Outcome of a migration run, per collection in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub dry_run: bool,
    pub collections: Vec<CollectionSummary>,
    pub failures: Vec<DocumentFailure>,
}

impl MigrationSummary {
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&CollectionSummary> {
        self.collections.iter().find(|c| c.collection == name)
    }

    #[must_use]
    pub fn scanned(&self) -> usize {
        self.collections.iter().map(|c| c.scanned).sum()
    }

    #[must_use]
    pub fn updated(&self) -> usize {
        self.collections.iter().map(|c| c.updated).sum()
    }

    /// Sum of the per-collection `failed` cells; always `failures.len()`.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.collections.iter().map(|c| c.failed).sum()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Renders the operator-facing table.
impl fmt::Display for MigrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.dry_run { "dry run" } else { "live" };
        writeln!(f, "Localized content migration ({mode})")?;
        writeln!(f, "{:<18} {:>8} {:>8} {:>8}", "collection", "scanned", "updated", "failed")?;
        for c in &self.collections {
            writeln!(f, "{:<18} {:>8} {:>8} {:>8}", c.collection, c.scanned, c.updated, c.failed)?;
        }
        write!(
            f,
            "{:<18} {:>8} {:>8} {:>8}",
            "total",
            self.scanned(),
            self.updated(),
            self.failed()
        )?;
        for failure in &self.failures {
            write!(f, "\n  ! {failure}")?;
        }
        Ok(())
    }
}
