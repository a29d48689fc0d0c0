//! Collector implementations for gathering search results.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::intern::StringId;

/// A fixed-capacity priority structure that keeps the greatest items seen.
///
/// Internally a min-heap: the smallest retained item sits on top so a new
/// candidate only has to be compared against it.
#[derive(Debug, Clone)]
pub struct BoundedMinHeap<T: Ord> {
    capacity: usize,
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> BoundedMinHeap<T> {
    /// Create a heap that retains at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        BoundedMinHeap {
            capacity,
            heap: BinaryHeap::new(),
        }
    }

    /// Offer an item. Returns whether it was retained.
    ///
    /// Below capacity the item is always kept; at capacity it replaces the
    /// current minimum only if it is strictly greater.
    pub fn push(&mut self, item: T) -> bool {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(item));
            true
        } else {
            self.replace_if_greater(item)
        }
    }

    /// Replace the minimum with `item` if `item` is strictly greater.
    pub fn replace_if_greater(&mut self, item: T) -> bool {
        match self.heap.peek_mut() {
            Some(mut min) if item > min.0 => {
                *min = Reverse(item);
                true
            }
            _ => false,
        }
    }

    /// Consume the heap, returning items from greatest to smallest.
    pub fn into_sorted_desc(self) -> Vec<T> {
        // Ascending order of Reverse<T> is descending order of T.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(item)| item)
            .collect()
    }

    /// Number of retained items.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// A document and its accumulated score.
#[derive(Debug, Clone, Copy)]
pub struct ScoredDoc {
    pub doc_id: StringId,
    pub score: f64,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher score ranks first; on equal scores the lower doc id ranks first.
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.doc_id.cmp(&self.doc_id))
    }
}

/// A collector that keeps the top N documents by score.
///
/// Scores that are NaN or not positive never take a slot.
#[derive(Debug)]
pub struct TopDocsCollector {
    hits: BoundedMinHeap<ScoredDoc>,
}

impl TopDocsCollector {
    /// Create a new top docs collector.
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            hits: BoundedMinHeap::new(max_docs),
        }
    }

    /// Offer a document.
    pub fn collect(&mut self, doc_id: StringId, score: f64) {
        if score.is_nan() || score <= 0.0 {
            return;
        }
        self.hits.push(ScoredDoc { doc_id, score });
    }

    /// Consume the collector, returning hits sorted by descending score.
    pub fn into_results(self) -> Vec<ScoredDoc> {
        self.hits.into_sorted_desc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_heap_keeps_greatest() {
        let mut heap = BoundedMinHeap::new(3);
        for value in [5, 1, 9, 3, 7, 2] {
            heap.push(value);
        }

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.into_sorted_desc(), vec![9, 7, 5]);
    }

    #[test]
    fn test_replace_requires_strictly_greater() {
        let mut heap = BoundedMinHeap::new(1);
        assert!(heap.push(4));
        assert!(!heap.replace_if_greater(4));
        assert!(!heap.push(3));
        assert!(heap.replace_if_greater(6));
        assert_eq!(heap.into_sorted_desc(), vec![6]);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut heap = BoundedMinHeap::new(0);
        assert!(!heap.push(1));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_scored_doc_ordering() {
        let a = ScoredDoc { doc_id: 1, score: 0.5 };
        let b = ScoredDoc { doc_id: 2, score: 0.5 };
        let c = ScoredDoc { doc_id: 3, score: 0.9 };
        assert!(c > a);
        assert!(a > b);
    }

    #[test]
    fn test_top_docs_collector() {
        let mut collector = TopDocsCollector::new(2);
        collector.collect(1, 0.3);
        collector.collect(2, 0.9);
        collector.collect(3, 0.5);
        collector.collect(4, 0.1);

        let results = collector.into_results();
        let ids: Vec<StringId> = results.iter().map(|doc| doc.doc_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_collector_skips_invalid_scores() {
        let mut collector = TopDocsCollector::new(5);
        collector.collect(1, f64::NAN);
        collector.collect(2, 0.0);
        collector.collect(3, -1.0);
        collector.collect(4, 0.2);

        let results = collector.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, 4);
    }

    #[test]
    fn test_unbounded_limit_does_not_preallocate() {
        let mut collector = TopDocsCollector::new(usize::MAX);
        collector.collect(1, 0.4);
        collector.collect(2, 0.8);

        let ids: Vec<StringId> = collector.into_results().iter().map(|doc| doc.doc_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
