use std::path::PathBuf;

use thiserror::Error;

use crate::ops::TargetType;

/// Error taxonomy for the ingestion and cleaning pipeline.
///
/// Every fatal variant carries enough context (operation, column, value,
/// path) to diagnose a failure without re-running the pipeline.
#[derive(Debug, Error)]
pub enum HxpError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The referenced document or table file does not exist.
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    /// The document is not well-formed markup.
    #[error("failed to parse {path}: {message}")]
    ParseFailure { path: PathBuf, message: String },

    /// The selector tag matched zero elements in a well-formed document.
    #[error("selector '{selector}' matched no elements")]
    EmptySelection { selector: String },

    /// A cleaning argument violates its expected shape.
    #[error("invalid argument '{argument}': expected {expected}")]
    InvalidArgumentType {
        argument: String,
        expected: &'static str,
    },

    /// An operation referenced a column absent from the current table.
    #[error("{operation}: column '{column}' not found")]
    ColumnNotFound {
        operation: &'static str,
        column: String,
    },

    /// A supported-type conversion could not parse a cell value.
    #[error("cannot convert '{value}' in column '{column}' to {target}")]
    ConversionFailure {
        column: String,
        value: String,
        target: TargetType,
    },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, HxpError>;
