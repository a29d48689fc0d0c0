//! Frozen relevance scores produced by optimization.

use std::collections::BTreeMap;

use crate::intern::StringId;

/// document -> score for one term.
pub type Postings = BTreeMap<StringId, f64>;

/// term -> postings for one field.
pub type FieldScores = BTreeMap<StringId, Postings>;

/// `field -> term -> document -> score`.
///
/// The index is read-only once built; nothing about raw frequencies or
/// document lengths survives in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreIndex {
    fields: BTreeMap<StringId, FieldScores>,
}

impl ScoreIndex {
    /// Create an empty score index.
    pub fn new() -> Self {
        ScoreIndex::default()
    }

    pub(crate) fn from_fields(fields: BTreeMap<StringId, FieldScores>) -> Self {
        ScoreIndex { fields }
    }

    /// Get the scores of a field.
    pub fn field(&self, field_id: StringId) -> Option<&FieldScores> {
        self.fields.get(&field_id)
    }

    /// Get the postings of a term within a field.
    pub fn postings(&self, field_id: StringId, term_id: StringId) -> Option<&Postings> {
        self.fields.get(&field_id)?.get(&term_id)
    }

    /// Score of a document for a term within a field.
    pub fn score(&self, field_id: StringId, term_id: StringId, doc_id: StringId) -> Option<f64> {
        self.postings(field_id, term_id)?.get(&doc_id).copied()
    }

    /// Iterate over fields in id order.
    pub fn fields(&self) -> impl Iterator<Item = (StringId, &FieldScores)> {
        self.fields.iter().map(|(&field_id, scores)| (field_id, scores))
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Check if the index holds no field at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        let mut postings = Postings::new();
        postings.insert(3, 0.5);
        let mut terms = FieldScores::new();
        terms.insert(2, postings);
        let mut fields = BTreeMap::new();
        fields.insert(1, terms);
        fields.insert(4, FieldScores::new());

        let index = ScoreIndex::from_fields(fields);
        assert_eq!(index.score(1, 2, 3), Some(0.5));
        assert_eq!(index.score(1, 2, 9), None);
        assert!(index.postings(4, 2).is_none());
        assert!(index.field(4).unwrap().is_empty());
        assert_eq!(index.field_count(), 2);
        assert!(ScoreIndex::new().is_empty());
    }
}
