use crate::error::DatabaseError;
use serde_json::{Map, Value};

/// JSON body of a document, without its id.
pub type Fields = Map<String, Value>;

/// A stored document: its id plus the JSON object it holds.
///
/// The id lives beside the body rather than inside it; [`Document::from_value`] lifts an
/// inline `"id"` key out when importing external JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self { id: id.into(), data }
    }

    /// Splits a JSON object carrying an optional `"id"` key into a document.
    ///
    /// Returns `None` for the id when the key is missing or not a string; callers decide
    /// how to assign one.
    ///
    /// # Errors
    /// Returns [`DatabaseError::Validation`] if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<(Option<String>, Fields), DatabaseError> {
        let Value::Object(mut data) = value else {
            return Err(DatabaseError::Validation {
                message: "Document must be a JSON object".into(),
                context: None,
            });
        };
        let id = match data.remove("id") {
            Some(Value::String(id)) => Some(id),
            _ => None,
        };
        Ok((id, data))
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// The body with the id folded back in as an `"id"` key.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut data = self.data;
        data.insert("id".to_owned(), Value::String(self.id));
        Value::Object(data)
    }
}

/// Checks a collection name or document id: non-empty, `[A-Za-z0-9_-]` only.
///
/// Both become path segments in the file engine, so the rule is the same for every engine.
pub(crate) fn validate_name(kind: &'static str, name: &str) -> Result<(), DatabaseError> {
    if name.is_empty() {
        return Err(DatabaseError::Validation {
            message: format!("{kind} cannot be empty").into(),
            context: None,
        });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(DatabaseError::Validation {
            message: format!("{kind} contains illegal characters: {name}").into(),
            context: None,
        });
    }
    Ok(())
}

pub(crate) fn validate_key(collection: &str, id: &str) -> Result<(), DatabaseError> {
    validate_name("Collection name", collection)?;
    validate_name("Document id", id)
}

/// Overwrites the top-level keys of `data` present in `patch`; other keys are kept.
pub(crate) fn merge(data: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        data.insert(key, value);
    }
}
