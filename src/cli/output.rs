//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{CcoArgs, OutputFormat};
use crate::error::Result;
use crate::index::IndexStats;
use crate::search::SearchHit;

/// Result structure for an index build.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub path: String,
    pub fields: usize,
    pub documents_added: usize,
    pub documents_skipped: usize,
    pub duration_ms: u64,
    pub docs_per_second: f64,
}

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub normalized: bool,
    pub duration_ms: u64,
}

/// Plain-text rendering of a command result.
pub trait HumanDisplay {
    fn render_human(&self) -> String;
}

impl HumanDisplay for BuildResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Index: {}", self.path);
        let _ = writeln!(out, "Fields: {}", self.fields);
        let _ = writeln!(out, "Documents added: {}", self.documents_added);
        if self.documents_skipped > 0 {
            let _ = writeln!(out, "Documents skipped: {}", self.documents_skipped);
        }
        let _ = write!(
            out,
            "Took {}ms ({:.1} docs/s)",
            self.duration_ms, self.docs_per_second
        );
        out
    }
}

impl HumanDisplay for SearchResults {
    fn render_human(&self) -> String {
        if self.hits.is_empty() {
            return "No results found.".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "Found {} results in {}ms:", self.hits.len(), self.duration_ms);
        for (rank, hit) in self.hits.iter().enumerate() {
            let _ = write!(out, "\n{:>3}. {} (score: {:.4})", rank + 1, hit.id, hit.score);
        }
        out
    }
}

impl HumanDisplay for IndexStats {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Mode: {:?}", self.mode);
        let _ = write!(out, "Strings: {}", self.strings);
        for field in &self.fields {
            let _ = write!(
                out,
                "\n  {}: {} terms, {} documents, {} postings",
                field.name, field.terms, field.documents, field.postings
            );
        }
        out
    }
}

/// Output result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &CcoArgs) -> Result<()>
where
    T: Serialize + HumanDisplay,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            println!("{}", result.render_human());
        }
        OutputFormat::Json => println!("{}", render_json(result, args.pretty)?),
    }
    Ok(())
}

/// Serialize a result as JSON.
pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
