//! Tokenizer implementations for field and query values.
//!
//! # Examples
//!
//! ```
//! use ccoindex::analysis::tokenizer::{DelimiterTokenizer, Tokenizer};
//!
//! let tokenizer = DelimiterTokenizer::new(',');
//! assert_eq!(tokenizer.tokenize("item-1,item-2"), vec!["item-1", "item-2"]);
//! ```

/// Trait for tokenizers that split raw text into tokens.
///
/// The trait requires `Send + Sync` so an optimized index can be shared
/// between reader threads.
pub trait Tokenizer: Send + Sync + std::fmt::Debug {
    /// Tokenize the given text. Tokens borrow from the input.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on a single delimiter character.
///
/// Tokens are neither trimmed nor filtered: `"a,,b"` yields `["a", "", "b"]`
/// and the empty string yields one empty token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelimiterTokenizer {
    delimiter: char,
}

impl DelimiterTokenizer {
    /// Create a new delimiter tokenizer.
    pub fn new(delimiter: char) -> Self {
        DelimiterTokenizer { delimiter }
    }

    /// Get the delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for DelimiterTokenizer {
    fn default() -> Self {
        DelimiterTokenizer::new(',')
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(self.delimiter).collect()
    }

    fn name(&self) -> &'static str {
        "delimiter"
    }
}
