//! Cleaning pipeline orchestration.
//!
//! Loads a table, applies an ordered operation list, and persists the
//! result. The output file is only touched after every operation has
//! succeeded; a failing run leaves whatever was on disk before.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::info;

use hxp_common::cell_to_string;
use hxp_ingest::AttributeTable;
use hxp_model::{CleanOp, Result};

use crate::frame::RecordFrame;
use crate::ops::apply;
use crate::retype::polars_error;

/// Where the cleaning pipeline reads its table from.
#[derive(Debug)]
pub enum TableSource {
    /// An in-memory frame, typically handed over by the ingestor.
    Frame(DataFrame),
    /// A delimited file written by an earlier run.
    Path(PathBuf),
}

impl From<DataFrame> for TableSource {
    fn from(frame: DataFrame) -> Self {
        Self::Frame(frame)
    }
}

impl From<PathBuf> for TableSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Runs the cleaning pipeline.
///
/// Applies `ops` in the given order and, when `output` is set, writes
/// the cleaned table as delimited text (whole-file overwrite). A frame
/// with no remaining columns writes an empty file; its record count is
/// still reported on the returned [`RecordFrame`].
pub fn clean(source: TableSource, ops: &[CleanOp], output: Option<&Path>) -> Result<RecordFrame> {
    let mut frame = load(source)?;
    info!(rows = frame.height(), columns = frame.width(), "loaded table");

    for op in ops {
        apply(&mut frame, op)?;
        info!(
            op = op.name(),
            rows = frame.height(),
            columns = frame.width(),
            "operation applied"
        );
    }

    if let Some(path) = output {
        write_frame(&frame, path)?;
        info!(output = %path.display(), "wrote cleaned table");
    }

    Ok(frame)
}

fn load(source: TableSource) -> Result<RecordFrame> {
    match source {
        TableSource::Frame(frame) => Ok(RecordFrame::new(frame)),
        TableSource::Path(path) => {
            let table = hxp_ingest::read_csv_table(&path)?;
            Ok(RecordFrame::new(table.to_data_frame()?))
        }
    }
}

/// Renders the frame back to delimited text through the shared
/// canonical cell formatting, so retyped numbers keep their shortest
/// decimal form and dates print as `YYYY-MM-DD`.
pub fn write_frame(frame: &RecordFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    if frame.width() == 0 {
        fs::write(path, "")?;
        return Ok(());
    }

    let columns = frame.column_names();
    let mut rows = Vec::with_capacity(frame.height());
    for idx in 0..frame.data().height() {
        let row = frame
            .data()
            .get_columns()
            .iter()
            .map(|column| {
                column
                    .get(idx)
                    .map(|value| cell_to_string(&value))
                    .map_err(polars_error)
            })
            .collect::<Result<Vec<String>>>()?;
        rows.push(row);
    }

    AttributeTable { columns, rows }.write_csv(path)
}

#[cfg(test)]
mod tests {
    use super::{TableSource, clean};
    use hxp_model::{CleanOp, HxpError};
    use polars::prelude::{DataFrame, NamedFrom, Series};

    fn frame() -> DataFrame {
        let genre = Series::new("genre".into(), ["Computer", "Fantasy"]);
        let price = Series::new("price".into(), ["44.95", "5.95"]);
        DataFrame::new(vec![genre.into(), price.into()]).expect("frame")
    }

    #[test]
    fn clean_without_ops_round_trips_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("clean.csv");
        let result = clean(TableSource::Frame(frame()), &[], Some(&out)).expect("clean");
        assert_eq!(result.height(), 2);
        let written = std::fs::read_to_string(&out).expect("read");
        assert_eq!(written, "genre,price\nComputer,44.95\nFantasy,5.95\n");
    }

    #[test]
    fn failed_op_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("clean.csv");
        let ops = vec![CleanOp::Filter {
            column: "missing".to_string(),
            allowed: vec![],
        }];
        let err = clean(TableSource::Frame(frame()), &ops, Some(&out)).expect_err("must fail");
        assert!(matches!(err, HxpError::ColumnNotFound { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn zero_column_result_writes_empty_file_but_keeps_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("clean.csv");
        let ops = vec![CleanOp::RemoveColumns {
            columns: vec!["genre".to_string(), "price".to_string()],
        }];
        let result = clean(TableSource::Frame(frame()), &ops, Some(&out)).expect("clean");
        assert_eq!(result.width(), 0);
        assert_eq!(result.height(), 2);
        assert_eq!(std::fs::read_to_string(&out).expect("read"), "");
    }

    #[test]
    fn path_source_reads_delimited_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "genre,price\nComputer,44.95\n").expect("write input");
        let result = clean(TableSource::Path(input), &[], None).expect("clean");
        assert_eq!(result.height(), 1);
        assert_eq!(result.column_names(), vec!["genre", "price"]);
    }

    #[test]
    fn missing_path_source_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = clean(
            TableSource::Path(dir.path().join("absent.csv")),
            &[],
            None,
        )
        .expect_err("must fail");
        assert!(matches!(err, HxpError::NotFound { .. }));
    }
}
