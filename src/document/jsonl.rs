//! JSONL document reader.
//!
//! Each non-blank line holds one JSON object:
//! ```jsonl
//! {"id": "user-1", "viewed": "item-1,item-2", "purchased": ["item-2"]}
//! {"id": "user-2", "viewed": "item-2"}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::document::document::Document;
use crate::error::{CcoError, Result};

/// Iterator over the documents of a JSONL stream.
///
/// Items are `(line_number, document)` pairs with 1-based line numbers, so a
/// caller can report and skip a malformed line without stopping the batch.
#[derive(Debug)]
pub struct JsonlDocumentReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl JsonlDocumentReader<BufReader<File>> {
    /// Open a JSONL file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(JsonlDocumentReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlDocumentReader<R> {
    /// Create a reader over any buffered input.
    pub fn new(reader: R) -> Self {
        JsonlDocumentReader {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    fn parse_line(line: &str) -> Result<Document> {
        let value: serde_json::Value = serde_json::from_str(line)?;
        Document::from_json(&value)
    }
}

impl<R: BufRead> Iterator for JsonlDocumentReader<R> {
    type Item = (usize, Result<Document>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) => return Some((self.line_number, Err(CcoError::from(e)))),
            };
            if line.trim().is_empty() {
                continue;
            }

            return Some((self.line_number, Self::parse_line(&line)));
        }
    }
}
