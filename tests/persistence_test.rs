//! Integration tests for saving and loading indices.

use std::fs;

use ccoindex::persistence::{self, PersistedIndex};
use ccoindex::prelude::*;
use tempfile::TempDir;

fn optimized_index(config: IndexConfig) -> Result<CcoIndex> {
    let mut index = CcoIndex::with_config(config)?;
    index.add_field("viewed")?;
    index.add_field("purchased")?;
    index.add_document(
        &Document::builder()
            .id("u1")
            .add_text("viewed", "a,b,c")
            .add_text("purchased", "b")
            .build(),
    )?;
    index.add_document(
        &Document::builder()
            .id("u2")
            .add_tokens("viewed", ["c", "d"])
            .build(),
    )?;
    index.optimize();
    Ok(index)
}

fn sample_query() -> Query {
    Query::new()
        .with_field("viewed", "c,d")
        .with_field("purchased", "b")
}

#[test]
fn test_save_and_load_plain_json() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("index.json");

    let mut index = optimized_index(IndexConfig::default())?;
    persistence::save(&index, &path)?;

    let content = fs::read_to_string(&path)?;
    let persisted: PersistedIndex = serde_json::from_str(&content)?;
    assert_eq!(persisted.d[0], "viewed");

    let mut loaded = persistence::load(&path, IndexConfig::default())?;
    assert!(loaded.is_optimized());
    assert_eq!(
        loaded.search(&sample_query(), 10, false),
        index.search(&sample_query(), 10, false)
    );

    Ok(())
}

#[test]
fn test_save_and_load_compressed() -> Result<()> {
    let dir = TempDir::new()?;
    let plain = dir.path().join("index.json");
    let compressed = dir.path().join("index.json.zst");

    let mut index = optimized_index(IndexConfig::default())?;
    persistence::save(&index, &plain)?;
    persistence::save(&index, &compressed)?;

    let bytes = fs::read(&compressed)?;
    assert!(serde_json::from_slice::<PersistedIndex>(&bytes).is_err());
    assert_eq!(zstd::decode_all(bytes.as_slice())?, fs::read(&plain)?);

    let mut loaded = persistence::load(&compressed, IndexConfig::default())?;
    assert_eq!(
        loaded.search(&sample_query(), 10, true),
        index.search(&sample_query(), 10, true)
    );

    Ok(())
}

#[test]
fn test_text_keyed_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("index.json");
    let config = IndexConfig::default().without_interning();

    let mut index = optimized_index(config.clone())?;
    persistence::save(&index, &path)?;

    let persisted: PersistedIndex = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert!(persisted.d.is_empty());
    assert!(persisted.t["viewed"]["c"].contains_key("u2"));

    let mut loaded = persistence::load(&path, config)?;
    let mut expected = index.search(&sample_query(), 10, true);
    let mut actual = loaded.search(&sample_query(), 10, true);
    // Equal scores may swap order after re-interning.
    expected.sort_by(|a, b| a.id.cmp(&b.id));
    actual.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(actual, expected);

    Ok(())
}

#[test]
fn test_building_index_saves_empty_form() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("index.json");

    let mut index = CcoIndex::new();
    index.add_field("viewed")?;
    persistence::save(&index, &path)?;
    assert_eq!(fs::read_to_string(&path)?, r#"{"d":[],"t":{}}"#);

    Ok(())
}

#[test]
fn test_load_errors() -> Result<()> {
    let dir = TempDir::new()?;

    let missing = persistence::load(dir.path().join("missing.json"), IndexConfig::default());
    assert!(matches!(missing, Err(CcoError::Io(_))));

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "not json")?;
    let result = persistence::load(&garbage, IndexConfig::default());
    assert!(matches!(result, Err(CcoError::Json(_))));

    Ok(())
}
