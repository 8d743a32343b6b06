use crate::language::Language;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a Cabinet binary reads from its config file and environment.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub localization: LocalizationConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Document store selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `mem://` or `file://<dir>`.
    pub url: String,
    /// LZ4-compress documents written by the file engine.
    pub compression: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Locale tag used when a caller does not ask for a language; normalized on read.
    pub default_language: String,
    /// TOML schema replacing the built-in collection mapping.
    pub schema: Option<PathBuf>,
}

impl LocalizationConfig {
    #[must_use]
    pub fn language(&self) -> Language {
        Language::normalize(&self.default_language)
    }
}

// --- Default ---

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: "mem://".to_owned(), compression: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), path: None, json: false }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self { default_language: Language::default().code().to_owned(), schema: None }
    }
}
