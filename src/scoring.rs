//! Scoring algorithms for search relevance.
//!
//! This module provides the BM25-derived formula used to freeze raw term
//! frequencies into per-document scores when an index is optimized.

pub mod bm25;
