//! Configuration for a [`CcoIndex`](crate::index::CcoIndex).
//!
//! Every setting has a default, so a configuration file only needs to name
//! the values it changes:
//!
//! ```
//! use ccoindex::config::IndexConfig;
//!
//! let config: IndexConfig = serde_json::from_str(r#"{ "scoring": { "k1": 1.5 } }"#).unwrap();
//! assert_eq!(config.scoring.k1, 1.5);
//! assert_eq!(config.scoring.b, 0.75);
//! assert!(config.intern);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CcoError, Result};
use crate::scoring::bm25::ScoringConfig;

/// Index-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Whether persisted indices use integer ids for strings.
    ///
    /// When disabled the serialized form keys every map by the original text
    /// and writes an empty string table. Useful when a stored index has to be
    /// read by a human.
    pub intern: bool,

    /// Delimiter used to split raw text field values into tokens.
    pub delimiter: char,

    /// Parameters of the relevance formula applied by `optimize`.
    pub scoring: ScoringConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            intern: true,
            delimiter: ',',
            scoring: ScoringConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Disable interning in the persisted form.
    pub fn without_interning(mut self) -> Self {
        self.intern = false;
        self
    }

    /// Replace the scoring parameters.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == '\0' {
            return Err(CcoError::invalid_config("delimiter must not be NUL"));
        }
        self.scoring.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert!(config.intern);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.scoring.k1, 1.2);
        assert_eq!(config.scoring.b, 0.75);
        assert_eq!(config.scoring.boost, 2.2);
        assert_eq!(config.scoring.score_digits, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: IndexConfig =
            serde_json::from_str(r#"{ "intern": false, "delimiter": "|" }"#).unwrap();
        assert!(!config.intern);
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "scoring": {{ "boost": 1.0, "score_digits": 2 }} }}"#).unwrap();

        let config = IndexConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scoring.boost, 1.0);
        assert_eq!(config.scoring.score_digits, 2);
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "scoring": {{ "b": 1.5 }} }}"#).unwrap();

        let result = IndexConfig::from_file(file.path());
        assert!(matches!(result, Err(CcoError::InvalidConfig(_))));
    }
}
