//! The multi-field index and its two-state lifecycle.
//!
//! An index starts in [`IndexMode::Building`], where fields are registered and
//! documents ingested into raw per-field accounting. [`CcoIndex::optimize`]
//! turns that accounting into frozen BM25-derived scores and moves the index to
//! [`IndexMode::Optimized`], after which only searching is allowed. The
//! transition is one-way.
//!
//! # Examples
//!
//! ```
//! use ccoindex::document::Document;
//! use ccoindex::index::{CcoIndex, IndexMode};
//! use ccoindex::search::Query;
//!
//! let mut index = CcoIndex::new();
//! index.add_field("viewed").unwrap();
//! index
//!     .add_document(&Document::builder().id("user-1").add_text("viewed", "a,b").build())
//!     .unwrap();
//! index
//!     .add_document(&Document::builder().id("user-2").add_text("viewed", "b,c").build())
//!     .unwrap();
//!
//! let hits = index.search(&Query::new().with_field("viewed", "a"), 10, true);
//! assert_eq!(index.mode(), IndexMode::Optimized);
//! assert_eq!(hits[0].id, "user-1");
//! assert!(index.add_field("purchased").is_err());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::tokenizer::{DelimiterTokenizer, Tokenizer};
use crate::config::IndexConfig;
use crate::document::{Document, FieldValue};
use crate::error::{CcoError, Result};
use crate::intern::{Interner, StringId};
use crate::persistence::PersistedIndex;
use crate::scoring::bm25::Bm25Scorer;
use crate::search::{Query, SearchHit, SearchRequest, Searcher};

pub mod field_store;
pub mod optimizer;
pub mod score_index;

use field_store::FieldStore;
use score_index::ScoreIndex;

/// Lifecycle stage of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Accepting fields and documents.
    Building,
    /// Frozen scores, searchable.
    Optimized,
}

/// Data owned by each stage. Exactly one exists at a time.
#[derive(Debug, Clone)]
enum IndexState {
    Building(FieldStore),
    Optimized(ScoreIndex),
}

/// An in-memory multi-field inverted index with frozen relevance scores.
#[derive(Debug, Clone)]
pub struct CcoIndex {
    config: IndexConfig,
    interner: Interner,
    tokenizer: Arc<dyn Tokenizer>,
    scorer: Bm25Scorer,
    state: IndexState,
}

impl Default for CcoIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CcoIndex {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self::build(
            IndexConfig::default(),
            Interner::new(),
            IndexState::Building(FieldStore::new()),
        )
    }

    /// Create an empty index with a validated configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            config,
            Interner::new(),
            IndexState::Building(FieldStore::new()),
        ))
    }

    fn build(config: IndexConfig, interner: Interner, state: IndexState) -> Self {
        CcoIndex {
            tokenizer: Arc::new(DelimiterTokenizer::new(config.delimiter)),
            scorer: Bm25Scorer::new(config.scoring.clone()),
            config,
            interner,
            state,
        }
    }

    /// Replace the tokenizer used for raw text values.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Get the current lifecycle stage.
    pub fn mode(&self) -> IndexMode {
        match self.state {
            IndexState::Building(_) => IndexMode::Building,
            IndexState::Optimized(_) => IndexMode::Optimized,
        }
    }

    /// Check whether the index has been optimized.
    pub fn is_optimized(&self) -> bool {
        self.mode() == IndexMode::Optimized
    }

    /// Get the string table.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Get the frozen scores, once optimized.
    pub fn score_index(&self) -> Option<&ScoreIndex> {
        match &self.state {
            IndexState::Optimized(scores) => Some(scores),
            IndexState::Building(_) => None,
        }
    }

    /// Get the raw accounting, while building.
    pub fn field_store(&self) -> Option<&FieldStore> {
        match &self.state {
            IndexState::Building(store) => Some(store),
            IndexState::Optimized(_) => None,
        }
    }

    /// Register a field as indexable.
    ///
    /// Registering a name again resets the accounting collected for it so far.
    pub fn add_field(&mut self, name: &str) -> Result<()> {
        let IndexState::Building(store) = &mut self.state else {
            return Err(CcoError::AlreadyOptimized);
        };

        let field_id = self.interner.intern_or_insert(name);
        store.register(field_id);
        Ok(())
    }

    /// Ingest a document.
    ///
    /// Fields that were never registered are skipped with a warning. Returns
    /// `Ok(false)` when no field of the document is indexable, in which case
    /// nothing (not even the document id) is recorded.
    pub fn add_document(&mut self, doc: &Document) -> Result<bool> {
        let IndexState::Building(store) = &mut self.state else {
            return Err(CcoError::AlreadyOptimized);
        };
        let Some(external_id) = doc.id() else {
            return Err(CcoError::MissingDocumentId);
        };

        let mut indexable: Vec<(StringId, &FieldValue)> = Vec::with_capacity(doc.len());
        for (name, value) in doc.fields() {
            match self.interner.get(name).filter(|&id| store.contains(id)) {
                Some(field_id) => indexable.push((field_id, value)),
                None => warn!(
                    field = name,
                    document = external_id,
                    "Document field is not indexable"
                ),
            }
        }

        if indexable.is_empty() {
            warn!(document = external_id, "Not indexing empty document");
            return Ok(false);
        }

        let doc_id = self.interner.intern_or_insert(external_id);
        for (field_id, value) in indexable {
            let tokens: Vec<StringId> = value
                .tokens(self.tokenizer.as_ref())
                .into_iter()
                .map(|token| self.interner.intern_or_insert(token))
                .collect();

            if let Some(field) = store.field_mut(field_id) {
                field.record(doc_id, &tokens);
            }
        }

        Ok(true)
    }

    /// Ingest a batch of documents, stopping at the first contract violation.
    ///
    /// Returns the number of documents that were indexed.
    pub fn add_documents<'a, I>(&mut self, docs: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut indexed = 0;
        for doc in docs {
            if self.add_document(doc)? {
                indexed += 1;
            }
        }
        Ok(indexed)
    }

    /// Freeze raw counts into scores. A no-op on an optimized index.
    ///
    /// The score index is built from the consumed accounting and installed in
    /// one state replacement, so no caller can observe a partially optimized
    /// index.
    pub fn optimize(&mut self) {
        let IndexState::Building(store) = &mut self.state else {
            return;
        };

        let store = std::mem::take(store);
        let field_count = store.len();
        let scores = optimizer::optimize(store, &self.scorer);
        self.state = IndexState::Optimized(scores);

        info!(
            fields = field_count,
            strings = self.interner.len(),
            "Index optimized"
        );
    }

    /// A read-only searcher, available once the index is optimized.
    pub fn searcher(&self) -> Option<Searcher<'_>> {
        self.score_index()
            .map(|scores| Searcher::new(&self.interner, scores, self.tokenizer.as_ref()))
    }

    /// Search the index, optimizing it first if it is still building.
    pub fn search(&mut self, query: &Query, limit: usize, normalize: bool) -> Vec<SearchHit> {
        self.optimize();
        match self.searcher() {
            Some(searcher) => searcher.search(query, limit, normalize),
            None => Vec::new(),
        }
    }

    /// Search with a [`SearchRequest`].
    pub fn search_request(&mut self, request: &SearchRequest) -> Vec<SearchHit> {
        self.search(&request.query, request.limit, request.normalize)
    }

    /// Snapshot of the index shape.
    ///
    /// While building, `documents` counts every document that recorded a
    /// value for the field, empty values included. After optimization it
    /// counts documents that hold at least one scored posting, so documents
    /// whose values were all empty no longer appear.
    pub fn stats(&self) -> IndexStats {
        let name_of = |field_id: StringId| {
            self.interner
                .unintern(field_id)
                .unwrap_or_default()
                .to_string()
        };

        let mut fields: Vec<FieldSummary> = match &self.state {
            IndexState::Building(store) => store
                .iter()
                .map(|(field_id, stats)| FieldSummary {
                    name: name_of(field_id),
                    terms: stats.term_count(),
                    documents: stats.doc_count(),
                    postings: stats.posting_count(),
                })
                .collect(),
            IndexState::Optimized(scores) => scores
                .fields()
                .map(|(field_id, terms)| {
                    let mut docs: Vec<StringId> =
                        terms.values().flat_map(|postings| postings.keys().copied()).collect();
                    let postings = docs.len();
                    docs.sort_unstable();
                    docs.dedup();
                    FieldSummary {
                        name: name_of(field_id),
                        terms: terms.len(),
                        documents: docs.len(),
                        postings,
                    }
                })
                .collect(),
        };
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        IndexStats {
            mode: self.mode(),
            strings: self.interner.len(),
            fields,
        }
    }

    /// Export the persisted form. An index that is still building exports the
    /// empty form.
    pub fn to_persisted(&self) -> Result<PersistedIndex> {
        match &self.state {
            IndexState::Building(_) => Ok(PersistedIndex::default()),
            IndexState::Optimized(scores) => {
                PersistedIndex::from_scores(&self.interner, scores, self.config.intern)
            }
        }
    }

    /// Rebuild an optimized index from its persisted form.
    pub fn from_persisted(persisted: PersistedIndex, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let (interner, scores) = persisted.into_scores()?;
        info!(
            fields = scores.field_count(),
            strings = interner.len(),
            "Index loaded"
        );
        Ok(Self::build(config, interner, IndexState::Optimized(scores)))
    }

    /// Serialize the persisted form as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_persisted()?)?)
    }

    /// Deserialize an index from JSON produced by [`CcoIndex::to_json`].
    pub fn from_json(json: &str, config: IndexConfig) -> Result<Self> {
        let persisted: PersistedIndex = serde_json::from_str(json)?;
        Self::from_persisted(persisted, config)
    }
}

/// Shape of an index, as reported by [`CcoIndex::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub mode: IndexMode,
    /// Size of the string table.
    pub strings: usize,
    /// Per-field counts, in field name order.
    pub fields: Vec<FieldSummary>,
}

/// Counts for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub name: String,
    pub terms: usize,
    pub documents: usize,
    pub postings: usize,
}
