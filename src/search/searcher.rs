//! Read-only search over an optimized index.

use std::collections::BTreeMap;

use tracing::warn;

use crate::analysis::tokenizer::Tokenizer;
use crate::index::score_index::ScoreIndex;
use crate::intern::{Interner, StringId};
use crate::search::collector::TopDocsCollector;
use crate::search::{Query, SearchHit};

/// Executes queries against a frozen score index.
///
/// Holds only shared borrows, so any number of searchers may run over the
/// same optimized index at once.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    interner: &'a Interner,
    scores: &'a ScoreIndex,
    tokenizer: &'a dyn Tokenizer,
}

impl<'a> Searcher<'a> {
    /// Create a searcher over an interner and its score index.
    pub fn new(interner: &'a Interner, scores: &'a ScoreIndex, tokenizer: &'a dyn Tokenizer) -> Self {
        Searcher {
            interner,
            scores,
            tokenizer,
        }
    }

    /// Run a search with explicit options.
    pub fn search(&self, query: &Query, limit: usize, normalize: bool) -> Vec<SearchHit> {
        let candidates = self.accumulate(query);

        let mut collector = TopDocsCollector::new(limit);
        for (doc_id, score) in candidates {
            collector.collect(doc_id, score);
        }

        let mut hits: Vec<SearchHit> = collector
            .into_results()
            .into_iter()
            .filter_map(|doc| match self.interner.unintern(doc.doc_id) {
                Some(id) => Some(SearchHit {
                    id: id.to_string(),
                    score: doc.score,
                }),
                None => {
                    warn!(doc_id = doc.doc_id, "Dropping hit with unknown document id");
                    None
                }
            })
            .collect();

        if normalize {
            let sum: f64 = hits.iter().map(|hit| hit.score).sum();
            for hit in &mut hits {
                hit.score /= sum;
            }
        }

        hits
    }

    /// Sum term scores per document across every queried field and term.
    fn accumulate(&self, query: &Query) -> BTreeMap<StringId, f64> {
        let mut hits: BTreeMap<StringId, f64> = BTreeMap::new();

        for (field, value) in query.fields() {
            let Some(field_scores) = self
                .interner
                .get(field)
                .and_then(|field_id| self.scores.field(field_id))
            else {
                warn!(field, "Field is not indexed");
                continue;
            };

            // Unknown terms are an expected miss at query time.
            for term in value.tokens(self.tokenizer) {
                let Some(postings) = self
                    .interner
                    .get(term)
                    .and_then(|term_id| field_scores.get(&term_id))
                else {
                    continue;
                };

                for (&doc_id, &score) in postings {
                    *hits.entry(doc_id).or_insert(0.0) += score;
                }
            }
        }

        hits
    }
}
