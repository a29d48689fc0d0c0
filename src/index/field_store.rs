//! Raw per-field accounting built during ingestion.

use ahash::AHashMap;

use crate::intern::StringId;

/// Raw counts for one registered field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStats {
    /// term -> document -> raw frequency
    terms: AHashMap<StringId, AHashMap<StringId, u32>>,
    /// document -> token length
    documents: AHashMap<StringId, u32>,
}

impl FieldStats {
    /// Create empty accounting for a field.
    pub fn new() -> Self {
        FieldStats::default()
    }

    /// Record one occurrence of a field value in a document.
    ///
    /// The token length is kept from the first occurrence of the (document,
    /// field) pair. Frequencies keep accumulating on later occurrences.
    pub fn record(&mut self, doc_id: StringId, tokens: &[StringId]) {
        self.documents
            .entry(doc_id)
            .or_insert(tokens.len() as u32);

        for &term_id in tokens {
            *self
                .terms
                .entry(term_id)
                .or_default()
                .entry(doc_id)
                .or_insert(0) += 1;
        }
    }

    /// Raw frequency of a term in a document.
    pub fn frequency(&self, term_id: StringId, doc_id: StringId) -> Option<u32> {
        self.terms.get(&term_id)?.get(&doc_id).copied()
    }

    /// Recorded token length of a document.
    pub fn doc_length(&self, doc_id: StringId) -> Option<u32> {
        self.documents.get(&doc_id).copied()
    }

    /// Number of distinct documents carrying the field.
    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of (term, document) pairs.
    pub fn posting_count(&self) -> usize {
        self.terms.values().map(|docs| docs.len()).sum()
    }

    /// Iterate over terms and their per-document frequencies.
    pub fn terms(&self) -> impl Iterator<Item = (StringId, &AHashMap<StringId, u32>)> {
        self.terms.iter().map(|(&term_id, docs)| (term_id, docs))
    }

    /// Iterate over document token lengths.
    pub fn doc_lengths(&self) -> impl Iterator<Item = u32> + '_ {
        self.documents.values().copied()
    }
}

/// Accounting for every registered field, keyed by interned field name.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    fields: AHashMap<StringId, FieldStats>,
}

impl FieldStore {
    /// Create an empty store.
    pub fn new() -> Self {
        FieldStore::default()
    }

    /// Register a field, resetting any accounting it already had.
    pub fn register(&mut self, field_id: StringId) {
        self.fields.insert(field_id, FieldStats::new());
    }

    /// Check whether a field is registered.
    pub fn contains(&self, field_id: StringId) -> bool {
        self.fields.contains_key(&field_id)
    }

    /// Get a field's accounting.
    pub fn field(&self, field_id: StringId) -> Option<&FieldStats> {
        self.fields.get(&field_id)
    }

    /// Get a field's accounting for update.
    pub fn field_mut(&mut self, field_id: StringId) -> Option<&mut FieldStats> {
        self.fields.get_mut(&field_id)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field is registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over registered fields.
    pub fn iter(&self) -> impl Iterator<Item = (StringId, &FieldStats)> {
        self.fields.iter().map(|(&field_id, stats)| (field_id, stats))
    }

    /// Consume the store, yielding every field's accounting.
    pub fn into_fields(self) -> impl Iterator<Item = (StringId, FieldStats)> {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_frequencies() {
        let mut stats = FieldStats::new();
        stats.record(10, &[1, 2, 1]);

        assert_eq!(stats.frequency(1, 10), Some(2));
        assert_eq!(stats.frequency(2, 10), Some(1));
        assert_eq!(stats.frequency(3, 10), None);
        assert_eq!(stats.doc_length(10), Some(3));
        assert_eq!(stats.doc_count(), 1);
        assert_eq!(stats.term_count(), 2);
        assert_eq!(stats.posting_count(), 2);
    }

    #[test]
    fn test_length_is_kept_from_first_occurrence() {
        let mut stats = FieldStats::new();
        stats.record(10, &[1]);
        stats.record(10, &[1, 2, 3]);

        assert_eq!(stats.doc_length(10), Some(1));
        assert_eq!(stats.frequency(1, 10), Some(2));
        assert_eq!(stats.frequency(3, 10), Some(1));
    }

    #[test]
    fn test_empty_token_list_records_zero_length() {
        let mut stats = FieldStats::new();
        stats.record(10, &[]);
        assert_eq!(stats.doc_length(10), Some(0));
        assert_eq!(stats.term_count(), 0);
    }

    #[test]
    fn test_register_resets_field() {
        let mut store = FieldStore::new();
        store.register(0);
        store.field_mut(0).unwrap().record(1, &[2]);
        assert_eq!(store.field(0).unwrap().doc_count(), 1);

        store.register(0);
        assert_eq!(store.field(0).unwrap().doc_count(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fields_do_not_share_accounting() {
        let mut store = FieldStore::new();
        store.register(0);
        store.register(1);
        store.field_mut(0).unwrap().record(5, &[7]);

        assert_eq!(store.field(0).unwrap().posting_count(), 1);
        assert_eq!(store.field(1).unwrap().posting_count(), 0);
        assert!(!store.contains(2));
    }
}
