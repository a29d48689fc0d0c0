//! Query-time retrieval against a frozen score index.
//!
//! A [`Query`] maps field names to text or tokens. Scores of every matched
//! term are summed per document across all queried fields, the best `limit`
//! documents are kept, and their scores are optionally normalized to sum to 1.
//!
//! Normalization divides by the sum of the *returned* scores, so it describes
//! the visible top-k window rather than the whole candidate pool.
//!
//! # Examples
//!
//! ```
//! use ccoindex::document::Document;
//! use ccoindex::index::CcoIndex;
//! use ccoindex::search::{Query, SearchRequest};
//!
//! let mut index = CcoIndex::new();
//! index.add_field("body").unwrap();
//! index
//!     .add_document(&Document::builder().id("a").add_text("body", "x,y").build())
//!     .unwrap();
//!
//! let request = SearchRequest::new(Query::new().with_field("body", "x")).limit(5);
//! let hits = index.search_request(&request);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, "a");
//! assert_eq!(hits[0].score, 1.0);
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::FieldValue;
use crate::document::document::json_type_name;
use crate::error::{CcoError, Result};

pub mod collector;
pub mod searcher;

pub use searcher::Searcher;

/// Default number of hits returned by a search.
pub const DEFAULT_LIMIT: usize = 10;

/// A mapping of field name to query text or tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    fields: BTreeMap<String, FieldValue>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Query::default()
    }

    /// Add a queried field, replacing any previous value for it.
    pub fn with_field<S: Into<String>, V: Into<FieldValue>>(mut self, name: S, value: V) -> Self {
        self.add_field(name, value);
        self
    }

    /// Add a queried field in place.
    pub fn add_field<S: Into<String>, V: Into<FieldValue>>(&mut self, name: S, value: V) {
        self.fields.insert(name.into(), value.into());
    }

    /// Iterate over queried fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of queried fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the query names no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert an untyped JSON value.
    ///
    /// The value must be an object whose members are strings or arrays of
    /// strings (numbers and booleans are accepted as text); anything else is an
    /// [`CcoError::InvalidQueryShape`].
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(CcoError::invalid_query(format!(
                "query should be an object with fields, got {}",
                json_type_name(value)
            )));
        };

        let mut query = Query::new();
        for (field, val) in map {
            let field_value = FieldValue::from_json(val).ok_or_else(|| {
                CcoError::invalid_query(format!(
                    "field {field} must be text or a list of tokens, got {}",
                    json_type_name(val)
                ))
            })?;
            query.add_field(field.clone(), field_value);
        }
        Ok(query)
    }
}

impl FromStr for Query {
    type Err = CcoError;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Query::from_json(&value)
    }
}

impl TryFrom<&Value> for Query {
    type Error = CcoError;

    fn try_from(value: &Value) -> Result<Self> {
        Query::from_json(value)
    }
}

/// A query plus the retrieval options.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// The query to execute.
    pub query: Query,
    /// Maximum number of hits to return.
    pub limit: usize,
    /// Whether returned scores are divided by their sum.
    pub normalize: bool,
}

impl SearchRequest {
    /// Create a new search request with the default limit and normalization.
    pub fn new(query: Query) -> Self {
        SearchRequest {
            query,
            limit: DEFAULT_LIMIT,
            normalize: true,
        }
    }

    /// Set the maximum number of hits to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set whether scores are normalized.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The external document identifier.
    pub id: String,
    /// The accumulated (and possibly normalized) relevance score.
    pub score: f64,
}
