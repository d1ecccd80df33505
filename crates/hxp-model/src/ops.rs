//! Declarative cleaning operations.
//!
//! A cleaning run is an ordered sequence of tagged [`CleanOp`] variants,
//! each carrying its own validated payload. New operation kinds extend the
//! enum without changing the pipeline's call signature.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target type for a retype operation.
///
/// The supported type names form a closed enumeration; unrecognized names
/// fall through [`TargetType::parse`] to `None` and are handled by the
/// retype executor as a non-fatal skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// 64-bit signed integer, base-10 parse.
    Integer,
    /// 64-bit floating point, base-10 parse.
    Float,
    /// Canonical text rendering of every value.
    Text,
    /// Calendar date parsed from the pinned format list.
    Date,
}

impl TargetType {
    /// Resolve a declared type name. Returns `None` for unsupported names.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Some(Self::Integer),
            "float" | "double" | "number" => Some(Self::Float),
            "str" | "string" | "text" => Some(Self::Text),
            "date" | "datetime" => Some(Self::Date),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "string",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declarative transformation step in the cleaning pipeline.
///
/// Operations apply in the fixed order filter, remove-columns, retype.
/// The retype target is kept as the raw declared name so unsupported
/// names reach the executor's warn-and-skip branch instead of failing
/// at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CleanOp {
    /// Keep rows whose value in `column` is a member of `allowed`.
    Filter { column: String, allowed: Vec<String> },
    /// Drop every named column.
    RemoveColumns { columns: Vec<String> },
    /// Convert every cell in `column` to the named target type.
    Retype { column: String, target: String },
}

impl CleanOp {
    /// Operation name used in diagnostics and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Filter { .. } => "filter",
            Self::RemoveColumns { .. } => "remove_columns",
            Self::Retype { .. } => "retype",
        }
    }
}
