//! Command implementations for the ccoindex CLI.

use std::time::Instant;

use anyhow::{Context, bail};
use tracing::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::IndexConfig;
use crate::document::JsonlDocumentReader;
use crate::error::CcoError;
use crate::index::CcoIndex;
use crate::persistence;
use crate::search::Query;

/// Execute a CLI command.
pub fn execute_command(args: CcoArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Build(build_args) => build_index(build_args, config, &args),
        Command::Search(search_args) => search_index(search_args, config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, config, &args),
    }
}

/// Load the index configuration, falling back to defaults.
fn load_config(args: &CcoArgs) -> anyhow::Result<IndexConfig> {
    match &args.config {
        Some(path) => IndexConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(IndexConfig::default()),
    }
}

/// Build an optimized index from a JSONL document file.
fn build_index(args: &BuildArgs, config: IndexConfig, cli_args: &CcoArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut index = CcoIndex::with_config(config)?;
    for field in &args.fields {
        index.add_field(field)?;
    }

    let reader = JsonlDocumentReader::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut added = 0;
    let mut skipped = 0;
    for (line, doc) in reader {
        let outcome = doc.and_then(|doc| index.add_document(&doc));
        match outcome {
            Ok(true) => added += 1,
            Ok(false) => skipped += 1,
            Err(
                e @ (CcoError::Json(_)
                | CcoError::InvalidDocument(_)
                | CcoError::MissingDocumentId),
            ) => {
                warn!(line, error = %e, "Skipping document");
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed at line {line}"));
            }
        }
    }

    index.optimize();
    persistence::save(&index, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let elapsed = start.elapsed();
    info!(added, skipped, "Build finished");

    output_result(
        "Index built successfully",
        &BuildResult {
            path: args.output.display().to_string(),
            fields: args.fields.len(),
            documents_added: added,
            documents_skipped: skipped,
            duration_ms: elapsed.as_millis() as u64,
            docs_per_second: added as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        },
        cli_args,
    )?;
    Ok(())
}

/// Run a query against a saved index.
fn search_index(args: &SearchArgs, config: IndexConfig, cli_args: &CcoArgs) -> anyhow::Result<()> {
    let query = build_query(args)?;

    let index = persistence::load(&args.index_path, config)
        .with_context(|| format!("Failed to load index {}", args.index_path.display()))?;
    let Some(searcher) = index.searcher() else {
        bail!("Index {} is not optimized", args.index_path.display());
    };

    let start = Instant::now();
    let normalize = !args.no_normalize;
    let hits = searcher.search(&query, args.limit, normalize);
    let elapsed = start.elapsed();

    output_result(
        "Search results",
        &SearchResults {
            hits,
            normalized: normalize,
            duration_ms: elapsed.as_millis() as u64,
        },
        cli_args,
    )?;
    Ok(())
}

/// Assemble a query from either `--query` or `--field`/`--text`.
fn build_query(args: &SearchArgs) -> anyhow::Result<Query> {
    match (&args.query, &args.field, &args.text) {
        (Some(json), _, _) => Ok(json.parse::<Query>().context("Invalid --query")?),
        (None, Some(field), Some(text)) => {
            Ok(Query::new().with_field(field.as_str(), text.as_str()))
        }
        _ => bail!("Either --query or both --field and --text are required"),
    }
}

/// Print the shape of a saved index.
fn show_stats(args: &StatsArgs, config: IndexConfig, cli_args: &CcoArgs) -> anyhow::Result<()> {
    let index = persistence::load(&args.index_path, config)
        .with_context(|| format!("Failed to load index {}", args.index_path.display()))?;

    output_result("Index statistics", &index.stats(), cli_args)?;
    Ok(())
}
