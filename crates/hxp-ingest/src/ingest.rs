//! Ingestion pipeline: source document to delimited attribute table.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::info;

use hxp_model::{HxpError, IngestConfig, Result};

use crate::table::AttributeTable;
use crate::xml::{self, XmlDocument};

/// Everything an ingestion run produces: the duplicate document, the
/// delimited table on disk, and the same table as an in-memory frame.
#[derive(Debug)]
pub struct IngestArtifacts {
    pub duplicate_path: PathBuf,
    pub table_path: PathBuf,
    pub frame: DataFrame,
}

/// Runs one ingestion pass.
///
/// Parses the source document, writes a post-parse duplicate, re-parses
/// that duplicate, extracts every element matching the configured
/// selector, and persists the attribute table as delimited text. The
/// table file is only written once extraction has fully succeeded.
pub fn ingest(config: &IngestConfig) -> Result<IngestArtifacts> {
    info!(source = %config.source_path.display(), "parsing source document");
    let document = xml::parse_document(&config.source_path)?;

    info!(duplicate = %config.duplicate_path.display(), "writing document duplicate");
    ensure_parent_dir(&config.duplicate_path)?;
    xml::write_document(&document, &config.duplicate_path)?;

    // All further work reads the snapshot, not the original.
    let snapshot = xml::parse_document(&config.duplicate_path)?;

    let table = extract_table(&snapshot, &config.selector)?;
    info!(
        selector = %config.selector,
        rows = table.height(),
        columns = table.width(),
        "extracted attribute table"
    );

    let frame = table.to_data_frame()?;

    ensure_parent_dir(&config.table_path)?;
    table.write_csv(&config.table_path)?;
    info!(table = %config.table_path.display(), "wrote delimited table");

    Ok(IngestArtifacts {
        duplicate_path: config.duplicate_path.clone(),
        table_path: config.table_path.clone(),
        frame,
    })
}

/// Selects `selector`-named elements from `document` and flattens their
/// attributes into a table. Zero matches is an error: a selector that
/// finds nothing is almost always a typo, not an empty export.
pub fn extract_table(document: &XmlDocument, selector: &str) -> Result<AttributeTable> {
    let elements = document.select(selector);
    if elements.is_empty() {
        return Err(HxpError::EmptySelection {
            selector: selector.to_string(),
        });
    }
    Ok(AttributeTable::from_elements(&elements))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
