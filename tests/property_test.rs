//! Property tests for interning, top-k selection and normalization.

use std::collections::BTreeMap;

use ccoindex::intern::Interner;
use ccoindex::prelude::*;
use ccoindex::search::collector::TopDocsCollector;
use proptest::prelude::*;

proptest! {
    #[test]
    fn interned_ids_are_dense_and_stable(words in prop::collection::vec("[a-e]{0,3}", 0..50)) {
        let mut interner = Interner::new();
        let mut first_seen: BTreeMap<String, u32> = BTreeMap::new();

        for word in &words {
            let id = interner.intern_or_insert(word);
            let next = first_seen.len() as u32;
            let expected = *first_seen.entry(word.clone()).or_insert(next);
            prop_assert_eq!(id, expected);
            prop_assert_eq!(interner.unintern(id), Some(word.as_str()));
        }
        prop_assert_eq!(interner.len(), first_seen.len());

        let rebuilt = Interner::from_strings(interner.strings().to_vec());
        for (word, id) in &first_seen {
            prop_assert_eq!(rebuilt.get(word), Some(*id));
        }
    }

    #[test]
    fn collector_matches_full_sort(
        scores in prop::collection::vec(0.0f64..100.0, 0..200),
        limit in 0usize..30,
    ) {
        let mut collector = TopDocsCollector::new(limit);
        for (doc_id, &score) in scores.iter().enumerate() {
            collector.collect(doc_id as u32, score);
        }
        let actual: Vec<(u32, f64)> = collector
            .into_results()
            .into_iter()
            .map(|doc| (doc.doc_id, doc.score))
            .collect();

        let mut expected: Vec<(u32, f64)> = scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score > 0.0)
            .map(|(doc_id, &score)| (doc_id as u32, score))
            .collect();
        expected.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        expected.truncate(limit);

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn normalized_scores_sum_to_one(
        docs in prop::collection::vec(prop::collection::vec("[a-f]", 1..6), 1..20),
        query in prop::collection::vec("[a-f]", 1..4),
        limit in 1usize..10,
    ) {
        let mut index = CcoIndex::new();
        index.add_field("items").unwrap();
        for (i, tokens) in docs.iter().enumerate() {
            let doc = Document::builder()
                .id(format!("doc-{i}"))
                .add_tokens("items", tokens.iter().cloned())
                .build();
            index.add_document(&doc).unwrap();
        }

        let query = Query::new().with_field("items", query);
        let raw = index.search(&query, limit, false);
        let normalized = index.search(&query, limit, true);

        prop_assert!(raw.len() <= limit);
        prop_assert_eq!(raw.len(), normalized.len());
        for pair in raw.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for (r, n) in raw.iter().zip(&normalized) {
            prop_assert_eq!(&r.id, &n.id);
            prop_assert!(n.score > 0.0 && n.score <= 1.0);
        }
        if !normalized.is_empty() {
            let total: f64 = normalized.iter().map(|hit| hit.score).sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
