//! One-way transformation of raw accounting into frozen scores.

use std::collections::BTreeMap;

use tracing::debug;

use crate::index::field_store::{FieldStats, FieldStore};
use crate::index::score_index::{FieldScores, Postings, ScoreIndex};
use crate::intern::StringId;
use crate::scoring::bm25::{Bm25Scorer, FieldStatistics};

/// Build a score index from the raw accounting, consuming it.
///
/// The result is constructed fresh; the store is dropped once every field has
/// been scored, so raw frequencies and lengths never outlive this call.
pub fn optimize(store: FieldStore, scorer: &Bm25Scorer) -> ScoreIndex {
    let mut fields = BTreeMap::new();
    for (field_id, stats) in store.into_fields() {
        fields.insert(field_id, score_field(field_id, &stats, scorer));
    }
    ScoreIndex::from_fields(fields)
}

/// Score every (term, document) pair of one field.
fn score_field(field_id: StringId, stats: &FieldStats, scorer: &Bm25Scorer) -> FieldScores {
    let field_stats = FieldStatistics::from_lengths(stats.doc_lengths());
    debug!(
        field_id,
        docs = field_stats.doc_count,
        avgdl = field_stats.avg_doc_length,
        terms = stats.term_count(),
        "Scoring field"
    );

    let mut scores = FieldScores::new();
    for (term_id, docs) in stats.terms() {
        let idf = Bm25Scorer::idf(field_stats.doc_count, docs.len());

        let mut postings = Postings::new();
        for (&doc_id, &freq) in docs {
            // Every document with a posting had its length recorded alongside it.
            let doc_length = stats.doc_length(doc_id).unwrap_or(0);
            let score = scorer.score(idf, freq, doc_length, &field_stats);
            // A field whose recorded lengths are all zero has avgdl = 0.
            if !score.is_finite() {
                debug!(field_id, term_id, doc_id, "Dropping non-finite score");
                continue;
            }
            postings.insert(doc_id, score);
        }
        if !postings.is_empty() {
            scores.insert(term_id, postings);
        }
    }
    scores
}
