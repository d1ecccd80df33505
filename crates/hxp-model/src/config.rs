//! Pipeline configuration.
//!
//! Every path and the selector tag are required, externally supplied
//! values. Core logic carries no embedded defaults and no environment
//! lookups.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for one ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Path to the source health-export XML document.
    pub source_path: PathBuf,
    /// Where the post-parse duplicate of the document is written.
    pub duplicate_path: PathBuf,
    /// Where the derived delimited table is written.
    pub table_path: PathBuf,
    /// Tag name of the repeating element to extract (e.g. "Record").
    pub selector: String,
}

impl IngestConfig {
    pub fn new(
        source_path: impl Into<PathBuf>,
        duplicate_path: impl Into<PathBuf>,
        table_path: impl Into<PathBuf>,
        selector: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            duplicate_path: duplicate_path.into(),
            table_path: table_path.into(),
            selector: selector.into(),
        }
    }
}

/// Configuration for one cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Delimited table produced by ingestion.
    pub input_path: PathBuf,
    /// Where the cleaned table is written (whole-file overwrite).
    pub output_path: PathBuf,
}

impl CleanConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}
