//! Text analysis for ccoindex.
//!
//! Field values and query values go through the same tokenization contract:
//! a pre-tokenized sequence is used as-is, raw text is split on a delimiter.

pub mod tokenizer;
