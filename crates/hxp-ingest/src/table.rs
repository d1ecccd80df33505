//! Attribute table extraction and delimited persistence.
//!
//! Selected elements become rows; the union of their attribute keys
//! becomes the column set, ordered by first appearance across the
//! selection. Cells missing on a given element are empty strings.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use polars::prelude::{DataFrame, NamedFrom, Series};

use hxp_model::{HxpError, Result};

use crate::xml::XmlElement;

/// A rectangular table of attribute values extracted from one element
/// selection. All cells are text at this stage; typing happens later in
/// the cleaning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl AttributeTable {
    /// Builds a table from the selected elements. Column order follows
    /// the first element that carries each attribute key.
    pub fn from_elements(elements: &[&XmlElement]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for element in elements {
            for (key, _) in &element.attributes {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = elements
            .iter()
            .map(|element| {
                columns
                    .iter()
                    .map(|column| {
                        element
                            .attribute(column)
                            .map(str::to_string)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Converts the table into a Polars frame with one string column per
    /// attribute key.
    pub fn to_data_frame(&self) -> Result<DataFrame> {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<&str> = self.rows.iter().map(|row| row[idx].as_str()).collect();
                Series::new(name.as_str().into(), values).into()
            })
            .collect();
        DataFrame::new(columns).map_err(|err| HxpError::Message(err.to_string()))
    }

    /// Writes the table as a comma-delimited file with a header row.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;
        writer.write_record(&self.columns).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn csv_error(err: csv::Error) -> HxpError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => HxpError::Io(io),
        other => HxpError::Message(format!("csv error: {other:?}")),
    }
}

/// Reads a comma-delimited file back into an [`AttributeTable`]. The
/// first record is the header; every cell stays text.
pub fn read_csv_table(path: &Path) -> Result<AttributeTable> {
    if !path.exists() {
        return Err(HxpError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let parse_error = |err: csv::Error| HxpError::ParseFailure {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(parse_error)?;
    let columns = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(AttributeTable { columns, rows })
}
