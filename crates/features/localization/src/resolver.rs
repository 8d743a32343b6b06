//! Read path over raw JSON.
//!
//! Same rule as [`cab_domain::LocalizedString::resolve`], applied to untyped values so
//! that callers holding a [`Document`](cab_database::Document) do not need a typed model.
//! Anything that is neither a string nor an object with a string slot resolves to `""`.

use cab_domain::Language;
use serde_json::{Map, Value};

/// Display text of a field in either persisted shape.
#[must_use]
pub fn resolve_value(value: Option<&Value>, lang: Language) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Object(record)) => {
            slot(record, lang).or_else(|| slot(record, lang.other())).unwrap_or_default().to_owned()
        },
        _ => String::new(),
    }
}

/// Resolves each element of an array field. A lone string or record is a one-element
/// list; any other value resolves to no elements.
#[must_use]
pub fn resolve_list_value(value: Option<&Value>, lang: Language) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => {
            items.iter().map(|item| resolve_value(Some(item), lang)).collect()
        },
        Some(single @ (Value::String(_) | Value::Object(_))) => {
            vec![resolve_value(Some(single), lang)]
        },
        _ => Vec::new(),
    }
}

/// Resolves `field` of a document body.
#[must_use]
pub fn resolve_field(data: &Map<String, Value>, field: &str, lang: Language) -> String {
    resolve_value(data.get(field), lang)
}

fn slot(record: &Map<String, Value>, lang: Language) -> Option<&str> {
    record.get(lang.code()).and_then(Value::as_str).filter(|text| !text.is_empty())
}
