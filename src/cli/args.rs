//! Command line argument parsing for the ccoindex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::search::DEFAULT_LIMIT;

/// ccoindex - build and query recommender-optimized inverted indices
#[derive(Parser, Debug, Clone)]
#[command(name = "ccoindex")]
#[command(about = "Build and query recommender-optimized inverted indices")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CcoArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Index configuration file (JSON)
    #[arg(short, long, env = "CCOINDEX_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CcoArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an optimized index from JSON-lines documents
    Build(BuildArgs),

    /// Search an index
    Search(SearchArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Document file (JSONL, one object with an "id" key per line)
    #[arg(short, long, value_name = "DOCUMENT_FILE")]
    pub input: PathBuf,

    /// Index file to write (".zst" compresses it)
    #[arg(short, long, value_name = "INDEX_FILE")]
    pub output: PathBuf,

    /// Fields to index (repeatable or comma-separated)
    #[arg(short = 'F', long = "field", required = true, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index file to load
    #[arg(value_name = "INDEX_FILE")]
    pub index_path: PathBuf,

    /// Query as a JSON object of field to text or tokens
    #[arg(long, conflicts_with_all = ["field", "text"])]
    pub query: Option<String>,

    /// Field to search in
    #[arg(long, requires = "text")]
    pub field: Option<String>,

    /// Delimited text to search for in --field
    #[arg(long, requires = "field")]
    pub text: Option<String>,

    /// Maximum number of results to return
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Return raw scores instead of scores normalized over the results
    #[arg(long)]
    pub no_normalize: bool,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Index file to load
    #[arg(value_name = "INDEX_FILE")]
    pub index_path: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
