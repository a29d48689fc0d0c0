//! Field value types for documents and queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::tokenizer::Tokenizer;

/// The value of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Raw text, split by the index tokenizer.
    Text(String),
    /// Tokens used as-is.
    Tokens(Vec<String>),
}

impl FieldValue {
    /// Produce the tokens of this value.
    ///
    /// Pre-tokenized values are returned unchanged; text goes through `tokenizer`.
    pub fn tokens<'a>(&'a self, tokenizer: &dyn Tokenizer) -> Vec<&'a str> {
        match self {
            FieldValue::Text(text) => tokenizer.tokenize(text),
            FieldValue::Tokens(tokens) => tokens.iter().map(String::as_str).collect(),
        }
    }

    /// Convert a JSON value.
    ///
    /// Strings become text, arrays of strings become tokens. Numbers and
    /// booleans are accepted as their text rendering. Anything else (null,
    /// objects, arrays holding non-strings) has no field value.
    pub fn from_json(value: &Value) -> Option<FieldValue> {
        match value {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(FieldValue::Tokens),
            Value::Null | Value::Object(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(tokens: Vec<String>) -> Self {
        FieldValue::Tokens(tokens)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(tokens: Vec<&str>) -> Self {
        FieldValue::Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}
