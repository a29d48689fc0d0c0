//! Document record and builder.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::document::field_value::FieldValue;
use crate::error::{CcoError, Result};

/// Key under which the identifier is stored in the JSON representation.
pub const ID_FIELD: &str = "id";

/// A document to be indexed.
///
/// The identifier is optional at construction time so that a missing id can be
/// reported by [`CcoIndex::add_document`](crate::index::CcoIndex::add_document)
/// rather than silently defaulted. Fields are kept in name order, which makes
/// id assignment during ingestion deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    id: Option<String>,
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Create a new document with the given identifier and no fields.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Document {
            id: Some(id.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Get the external identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the external identifier.
    pub fn set_id<S: Into<String>>(&mut self, id: S) {
        self.id = Some(id.into());
    }

    /// Add a field value, replacing any previous value of the same field.
    pub fn add_field<S: Into<String>, V: Into<FieldValue>>(&mut self, name: S, value: V) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field value from the document.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Get the number of fields, not counting the identifier.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert a JSON object into a document.
    ///
    /// The `id` key becomes the identifier (numbers are accepted and rendered as
    /// text, a missing or null id leaves it unset). Every other key becomes a
    /// field when its value converts through [`FieldValue::from_json`]; keys that
    /// do not convert are skipped with a warning.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(CcoError::invalid_document(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            )));
        };

        let mut doc = Document::default();
        for (key, val) in map {
            if key == ID_FIELD {
                doc.id = match val {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Null => None,
                    other => {
                        return Err(CcoError::invalid_document(format!(
                            "document id must be a string or number, got {}",
                            json_type_name(other)
                        )));
                    }
                };
                continue;
            }

            match FieldValue::from_json(val) {
                Some(field_value) => {
                    doc.fields.insert(key.clone(), field_value);
                }
                None => warn!(
                    field = %key,
                    "Skipping field with unsupported value type {}",
                    json_type_name(val)
                ),
            }
        }

        Ok(doc)
    }
}

/// Name of a JSON value's type for diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    /// Set the document identifier.
    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.document.set_id(id);
        self
    }

    /// Add a raw text field, split by the index tokenizer when ingested.
    pub fn add_text<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.document.add_field(name, FieldValue::Text(value.into()));
        self
    }

    /// Add a pre-tokenized field.
    pub fn add_tokens<S, I, T>(mut self, name: S, tokens: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect();
        self.document.add_field(name, FieldValue::Tokens(tokens));
        self
    }

    /// Add a field with a generic value.
    pub fn add_field<S: Into<String>>(mut self, name: S, value: FieldValue) -> Self {
        self.document.add_field(name, value);
        self
    }

    /// Build the final document.
    pub fn build(self) -> Document {
        self.document
    }
}
