//! Bidirectional string table.
//!
//! Field names, document identifiers and terms are all stored as small
//! sequential integers. Ids are handed out in first-seen order starting at 0,
//! and the id of a string never changes for the lifetime of the table.

use ahash::AHashMap;

/// Identifier assigned to an interned string.
pub type StringId = u32;

/// A string table mapping text to sequential ids and back.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    /// Text to id lookup.
    ids: AHashMap<String, StringId>,
    /// Id to text lookup, position is the id.
    strings: Vec<String>,
}

impl Interner {
    /// Create a new empty interner.
    pub fn new() -> Self {
        Interner::default()
    }

    /// Rebuild an interner from a string table in id order.
    ///
    /// A string that appears more than once keeps the id of its first occurrence
    /// for lookups; later positions still resolve through [`Interner::unintern`].
    pub fn from_strings(strings: Vec<String>) -> Self {
        let mut ids = AHashMap::with_capacity(strings.len());
        for (id, text) in strings.iter().enumerate() {
            ids.entry(text.clone()).or_insert(id as StringId);
        }
        Interner { ids, strings }
    }

    /// Look up `text`, allocating the next id when it is missing and `create` is set.
    ///
    /// Returns `None` only when the string is unknown and `create` is false.
    pub fn intern(&mut self, text: &str, create: bool) -> Option<StringId> {
        if create {
            Some(self.intern_or_insert(text))
        } else {
            self.get(text)
        }
    }

    /// Look up `text`, allocating the next id when it is missing.
    pub fn intern_or_insert(&mut self, text: &str) -> StringId {
        if let Some(&id) = self.ids.get(text) {
            return id;
        }

        let id = self.strings.len() as StringId;
        self.strings.push(text.to_string());
        self.ids.insert(text.to_string(), id);
        id
    }

    /// Look up `text` without allocating.
    pub fn get(&self, text: &str) -> Option<StringId> {
        self.ids.get(text).copied()
    }

    /// Reverse lookup. `None` if the id was never assigned.
    pub fn unintern(&self, id: StringId) -> Option<&str> {
        self.strings.get(id as usize).map(String::as_str)
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if no string has been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// The full string table in id order.
    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}
