//! Persisted form of an optimized index and its file storage.
//!
//! The serialized object has two members:
//!
//! - `d`: the string table, where position is the interned id
//! - `t`: `field -> term -> document -> score`, keyed by id
//!
//! ```json
//! {"d":["body","a","x","y"],"t":{"0":{"2":{"1":0.2877},"3":{"1":0.2877}}}}
//! ```
//!
//! With interning disabled `d` is empty and `t` is keyed by the original text.
//! Files whose name ends in `.zst` are zstd-compressed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::IndexConfig;
use crate::error::{CcoError, Result};
use crate::index::CcoIndex;
use crate::index::score_index::{FieldScores, Postings, ScoreIndex};
use crate::intern::{Interner, StringId};

/// File extension that selects zstd compression.
pub const COMPRESSED_EXTENSION: &str = "zst";

/// zstd level used when saving compressed indices.
const COMPRESSION_LEVEL: i32 = 19;

/// A `null` score is read back as a missing posting.
type PersistedPostings = BTreeMap<String, Option<f64>>;
type PersistedTerms = BTreeMap<String, PersistedPostings>;

/// The serialized shape of an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedIndex {
    /// String table in id order.
    pub d: Vec<String>,
    /// `field -> term -> document -> score`.
    pub t: BTreeMap<String, PersistedTerms>,
}

impl PersistedIndex {
    /// Build the persisted form of a score index.
    ///
    /// With `intern` set, keys are ids and the string table is included.
    /// Otherwise keys are the original strings and the table is left empty.
    pub fn from_scores(interner: &Interner, scores: &ScoreIndex, intern: bool) -> Result<Self> {
        let key = |id: StringId| -> Result<String> {
            if intern {
                return Ok(id.to_string());
            }
            interner
                .unintern(id)
                .map(str::to_string)
                .ok_or_else(|| CcoError::serialization(format!("id {id} has no interned string")))
        };

        let mut t = BTreeMap::new();
        for (field_id, terms) in scores.fields() {
            let mut persisted_terms = PersistedTerms::new();
            for (&term_id, postings) in terms {
                let mut persisted_postings = PersistedPostings::new();
                for (&doc_id, &score) in postings {
                    persisted_postings.insert(key(doc_id)?, Some(score));
                }
                persisted_terms.insert(key(term_id)?, persisted_postings);
            }
            t.insert(key(field_id)?, persisted_terms);
        }

        let d = if intern {
            interner.strings().to_vec()
        } else {
            Vec::new()
        };

        Ok(PersistedIndex { d, t })
    }

    /// Check whether keys are original strings rather than ids.
    pub fn is_text_keyed(&self) -> bool {
        self.d.is_empty() && !self.t.is_empty()
    }

    /// Rebuild the string table and score index.
    pub fn into_scores(self) -> Result<(Interner, ScoreIndex)> {
        if self.is_text_keyed() {
            return Ok(Self::intern_text_keys(self.t));
        }

        let interner = Interner::from_strings(self.d);
        let string_count = interner.len();
        let parse = |key: &str| -> Result<StringId> {
            let id: StringId = key
                .parse()
                .map_err(|_| CcoError::serialization(format!("key {key:?} is not an id")))?;
            if id as usize >= string_count {
                return Err(CcoError::serialization(format!(
                    "id {id} is outside the string table of {string_count} entries"
                )));
            }
            Ok(id)
        };

        let mut fields = BTreeMap::new();
        for (field, terms) in self.t {
            let mut field_scores = FieldScores::new();
            for (term, docs) in terms {
                let mut postings = Postings::new();
                for (doc, score) in docs {
                    let doc_id = parse(&doc)?;
                    if let Some(score) = score {
                        postings.insert(doc_id, score);
                    }
                }
                field_scores.insert(parse(&term)?, postings);
            }
            fields.insert(parse(&field)?, field_scores);
        }

        Ok((interner, ScoreIndex::from_fields(fields)))
    }

    fn intern_text_keys(t: BTreeMap<String, PersistedTerms>) -> (Interner, ScoreIndex) {
        let mut interner = Interner::new();
        let mut fields = BTreeMap::new();
        for (field, terms) in t {
            let field_id = interner.intern_or_insert(&field);
            let mut field_scores = FieldScores::new();
            for (term, docs) in terms {
                let term_id = interner.intern_or_insert(&term);
                let mut postings = Postings::new();
                for (doc, score) in docs {
                    let doc_id = interner.intern_or_insert(&doc);
                    if let Some(score) = score {
                        postings.insert(doc_id, score);
                    }
                }
                field_scores.insert(term_id, postings);
            }
            fields.insert(field_id, field_scores);
        }
        (interner, ScoreIndex::from_fields(fields))
    }
}

/// Check whether a path selects compressed storage.
pub fn is_compressed_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == COMPRESSED_EXTENSION)
}

/// Write an index to a file.
///
/// An index that is still building is written in the empty form.
pub fn save<P: AsRef<Path>>(index: &CcoIndex, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = index.to_json()?;

    let compressed = is_compressed_path(path);
    let bytes = if compressed {
        zstd::encode_all(json.as_bytes(), COMPRESSION_LEVEL)?
    } else {
        json.into_bytes()
    };
    fs::write(path, &bytes)?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        compressed,
        "Index saved"
    );
    Ok(())
}

/// Read an optimized index from a file.
pub fn load<P: AsRef<Path>>(path: P, config: IndexConfig) -> Result<CcoIndex> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    let json = if is_compressed_path(path) {
        zstd::decode_all(bytes.as_slice())?
    } else {
        bytes
    };
    let persisted: PersistedIndex = serde_json::from_slice(&json)?;
    CcoIndex::from_persisted(persisted, config)
}
