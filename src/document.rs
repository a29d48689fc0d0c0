//! Documents accepted by the index.
//!
//! A [`Document`] is an explicit record: an external identifier plus a
//! mapping from field name to a [`FieldValue`], which is either raw delimited
//! text or a pre-tokenized sequence.
//!
//! # Examples
//!
//! ```
//! use ccoindex::document::{Document, FieldValue};
//!
//! let doc = Document::builder()
//!     .id("user-42")
//!     .add_text("viewed", "item-1,item-7")
//!     .add_tokens("purchased", vec!["item-7"])
//!     .build();
//!
//! assert_eq!(doc.id(), Some("user-42"));
//! assert_eq!(doc.len(), 2);
//! assert_eq!(
//!     doc.get_field("purchased"),
//!     Some(&FieldValue::Tokens(vec!["item-7".to_string()]))
//! );
//! ```

pub mod document;
pub mod field_value;
pub mod jsonl;

pub use document::{Document, DocumentBuilder};
pub use field_value::FieldValue;
pub use jsonl::JsonlDocumentReader;
