//! BM25-derived relevance scoring.
//!
//! A term's score in a document is `boost * idf * tf`, where
//!
//! ```text
//! idf = ln(1 + (N - n + 0.5) / (n + 0.5))
//! tf  = freq / (freq + k1 * (1 - b + b * dl / avgdl))
//! ```
//!
//! `N` is the number of documents carrying the field, `n` the number of those
//! containing the term, `freq` the occurrences of the term in the document,
//! `dl` the document's token length for the field and `avgdl` the mean token
//! length over the field. Scores are rounded to `score_digits` decimals so that
//! a serialized index is stable across runs.

use serde::{Deserialize, Serialize};

use crate::error::{CcoError, Result};

/// Largest rounding precision that still fits in an `f64` mantissa.
const MAX_SCORE_DIGITS: u32 = 15;

/// Configuration for the scoring formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// K1 parameter for BM25 (term frequency saturation).
    pub k1: f64,

    /// B parameter for BM25 (field length normalization).
    pub b: f64,

    /// Fixed multiplier applied to every field score.
    pub boost: f64,

    /// Number of decimal digits kept in a frozen score.
    pub score_digits: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            k1: 1.2,
            b: 0.75,
            boost: 2.2,
            score_digits: 4,
        }
    }
}

impl ScoringConfig {
    /// Check that the parameters produce finite, positive scores.
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(CcoError::invalid_config(format!(
                "k1 must be a finite non-negative number, got {}",
                self.k1
            )));
        }
        if !self.b.is_finite() || !(0.0..=1.0).contains(&self.b) {
            return Err(CcoError::invalid_config(format!(
                "b must be within [0, 1], got {}",
                self.b
            )));
        }
        if !self.boost.is_finite() || self.boost <= 0.0 {
            return Err(CcoError::invalid_config(format!(
                "boost must be a finite positive number, got {}",
                self.boost
            )));
        }
        if self.score_digits > MAX_SCORE_DIGITS {
            return Err(CcoError::invalid_config(format!(
                "score_digits must be at most {MAX_SCORE_DIGITS}, got {}",
                self.score_digits
            )));
        }
        Ok(())
    }
}

/// Per-field statistics the formula needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStatistics {
    /// Number of distinct documents carrying the field (`N`).
    pub doc_count: usize,
    /// Mean token length of the field over those documents (`avgdl`).
    pub avg_doc_length: f64,
}

impl FieldStatistics {
    /// Compute statistics from the token lengths of every document in a field.
    pub fn from_lengths<I>(lengths: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut doc_count = 0usize;
        let mut total: u64 = 0;
        for length in lengths {
            doc_count += 1;
            total += u64::from(length);
        }

        let avg_doc_length = if doc_count == 0 {
            0.0
        } else {
            total as f64 / doc_count as f64
        };

        FieldStatistics {
            doc_count,
            avg_doc_length,
        }
    }
}

/// The BM25-derived scorer with its parameters bound.
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    config: ScoringConfig,
}

impl Bm25Scorer {
    /// Create a scorer from the given parameters.
    pub fn new(config: ScoringConfig) -> Self {
        Bm25Scorer { config }
    }

    /// Inverse document frequency of a term found in `doc_freq` of `doc_count` documents.
    pub fn idf(doc_count: usize, doc_freq: usize) -> f64 {
        let n = doc_freq as f64;
        (1.0 + (doc_count as f64 - n + 0.5) / (n + 0.5)).ln()
    }

    /// Saturated, length-normalized term frequency.
    pub fn tf(&self, freq: u32, doc_length: u32, avg_doc_length: f64) -> f64 {
        let freq = f64::from(freq);
        let k1 = self.config.k1;
        let b = self.config.b;
        freq / (freq + k1 * (1.0 - b + b * f64::from(doc_length) / avg_doc_length))
    }

    /// Final rounded score for one (term, document) pair given a precomputed idf.
    pub fn score(&self, idf: f64, freq: u32, doc_length: u32, stats: &FieldStatistics) -> f64 {
        let tf = self.tf(freq, doc_length, stats.avg_doc_length);
        round_score(self.config.boost * idf * tf, self.config.score_digits)
    }
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Bm25Scorer::new(ScoringConfig::default())
    }
}

/// Round a score to a fixed number of decimal digits.
pub fn round_score(score: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (score * factor).round() / factor
}
