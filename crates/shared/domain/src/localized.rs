//! Translatable text fields.
//!
//! A field is stored either as a legacy plain string, valid for every language, or as a
//! `{fr, en}` record. Stored content never converges fully on the record shape, so
//! readers must accept both forever and go through [`LocalizedString::resolve`] (or the
//! free [`resolve`]) rather than picking a slot themselves.
//!
//! Decoding is total. Any stored shape reads as *something*: off-domain values (numbers,
//! booleans, arrays, records without a string slot) become an empty field that resolves
//! to `""`, so one malformed field never hides the document around it.

use crate::language::Language;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The migrated `{fr, en}` shape. Both slots always exist; an unknown translation holds
/// the other language's text rather than being left out.
///
/// Missing or non-string slots deserialize as empty strings so that partially written
/// historical records stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LocalizedText {
    pub fr: String,
    pub en: String,
}

impl LocalizedText {
    #[must_use]
    pub fn new(fr: impl Into<String>, en: impl Into<String>) -> Self {
        Self { fr: fr.into(), en: en.into() }
    }

    /// The same text in both slots; what a legacy string becomes on migration.
    #[must_use]
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { en: text.clone(), fr: text }
    }

    /// The raw slot for `lang`, possibly empty.
    #[must_use]
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Fr => &self.fr,
            Language::En => &self.en,
        }
    }

    /// The `lang` slot if non-empty, else the other slot, else `""`.
    #[must_use]
    pub fn resolve(&self, lang: Language) -> &str {
        let preferred = self.get(lang);
        if preferred.is_empty() { self.get(lang.other()) } else { preferred }
    }

    fn from_record(record: &Map<String, Value>) -> Self {
        let slot = |lang: Language| {
            record.get(lang.code()).and_then(Value::as_str).unwrap_or_default().to_owned()
        };
        Self { fr: slot(Language::Fr), en: slot(Language::En) }
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(record) => Ok(Self::from_record(&record)),
            _ => Ok(Self::default()),
        }
    }
}

/// A translatable field in either of its two persisted shapes.
///
/// Serializes untagged. Deserializes from any JSON value: strings are `Plain`, objects
/// are `Localized`, anything else is an empty `Plain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum LocalizedString {
    /// Legacy shape: one untranslated string.
    Plain(String),
    /// Migrated shape.
    Localized(LocalizedText),
}

impl LocalizedString {
    /// Display text for `lang`. Plain strings are returned verbatim whatever the language.
    #[must_use]
    pub fn resolve(&self, lang: Language) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Localized(text) => text.resolve(lang),
        }
    }

    #[must_use]
    pub const fn is_migrated(&self) -> bool {
        matches!(self, Self::Localized(_))
    }

    /// The record shape of this field; plain strings are copied into both slots.
    #[must_use]
    pub fn into_localized(self) -> LocalizedText {
        match self {
            Self::Plain(text) => LocalizedText::uniform(text),
            Self::Localized(text) => text,
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Plain(text),
            Value::Object(record) => Self::Localized(LocalizedText::from_record(&record)),
            _ => Self::default(),
        }
    }
}

impl<'de> Deserialize<'de> for LocalizedString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Default for LocalizedString {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for LocalizedString {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_owned())
    }
}

impl From<String> for LocalizedString {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<LocalizedText> for LocalizedString {
    fn from(value: LocalizedText) -> Self {
        Self::Localized(value)
    }
}

/// Resolves an optional field; an absent field resolves to `""`.
#[must_use]
pub fn resolve(field: Option<&LocalizedString>, lang: Language) -> String {
    field.map(|f| f.resolve(lang)).unwrap_or_default().to_owned()
}

/// Resolves every element of an array field, keeping element order.
#[must_use]
pub fn resolve_list(fields: &[LocalizedString], lang: Language) -> Vec<String> {
    fields.iter().map(|f| f.resolve(lang).to_owned()).collect()
}

/// Lenient decoding for entity fields.
///
/// Stored documents are written by hand, by older front ends and by the migrator, so a
/// field may hold any JSON shape. These helpers read what they can and default the rest
/// instead of failing the whole document.
pub mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Decodes `T`, falling back to `T::default()` when the stored shape does not fit.
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Decodes a list of `T`, dropping elements that do not decode.
    ///
    /// A lone string or object counts as a one-element list; any other non-array is empty.
    /// Elements of [`LocalizedString`](super::LocalizedString) always decode, off-domain
    /// ones as `""`.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            single @ (Value::String(_) | Value::Object(_)) => vec![single],
            _ => Vec::new(),
        };
        Ok(items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect())
    }
}
