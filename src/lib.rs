//! # ccoindex
//!
//! An in-memory, multi-field inverted index with frozen BM25-derived scores,
//! built as the scoring core of a cross-cooccurrence recommender.
//!
//! ## Features
//!
//! - Shared string interning for field names, document ids and terms
//! - Per-field term and length accounting during ingestion
//! - One-way optimization into a compact `field -> term -> doc -> score` table
//! - Additive multi-field scoring with bounded top-k retrieval
//! - JSON persistence, optionally zstd-compressed
//!
//! ## Example
//!
//! ```
//! use ccoindex::prelude::*;
//!
//! let mut index = CcoIndex::new();
//! index.add_field("body")?;
//! index.add_document(&Document::builder().id("a").add_text("body", "x,y").build())?;
//!
//! let hits = index.search(&Query::new().with_field("body", "x"), 10, true);
//! assert_eq!(hits, vec![SearchHit { id: "a".to_string(), score: 1.0 }]);
//! # Ok::<(), ccoindex::error::CcoError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod intern;
pub mod persistence;
pub mod scoring;
pub mod search;

pub mod prelude {
    pub use crate::config::IndexConfig;
    pub use crate::document::{Document, FieldValue};
    pub use crate::error::{CcoError, Result};
    pub use crate::index::{CcoIndex, IndexMode};
    pub use crate::scoring::bm25::ScoringConfig;
    pub use crate::search::{Query, SearchHit, SearchRequest};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
