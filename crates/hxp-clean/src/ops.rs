//! Operation executors.
//!
//! Each executor validates its own preconditions against the live frame
//! and either mutates the frame or fails with column-level context.
//! Ordering and persistence are the pipeline's concern.

use polars::prelude::{BooleanChunked, NewChunkedArray};
use tracing::debug;

use hxp_common::cell_to_string;
use hxp_model::{CleanOp, HxpError, Result};

use crate::frame::RecordFrame;
use crate::retype::{polars_error, retype_column};

/// Applies one operation to the frame.
pub fn apply(frame: &mut RecordFrame, op: &CleanOp) -> Result<()> {
    match op {
        CleanOp::Filter { column, allowed } => apply_filter(frame, column, allowed),
        CleanOp::RemoveColumns { columns } => apply_remove_columns(frame, columns),
        CleanOp::Retype { column, target } => retype_column(frame, column, target),
    }
}

/// Keeps rows whose cell in `column` matches any allowed value exactly,
/// preserving order. Cells compare in their canonical text form, so a
/// previously retyped column still filters on what it displays as.
fn apply_filter(frame: &mut RecordFrame, column: &str, allowed: &[String]) -> Result<()> {
    let data = frame.data();
    let Ok(source) = data.column(column) else {
        return Err(HxpError::ColumnNotFound {
            operation: "filter",
            column: column.to_string(),
        });
    };

    let mut keep = Vec::with_capacity(data.height());
    for idx in 0..data.height() {
        let value = source.get(idx).map_err(polars_error)?;
        let text = cell_to_string(&value);
        keep.push(allowed.iter().any(|candidate| *candidate == text));
    }

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = data.filter(&mask).map_err(polars_error)?;
    debug!(column, kept = filtered.height(), of = keep.len(), "filter applied");
    frame.set_data(filtered);
    Ok(())
}

/// Drops each named column. Every name must resolve before anything is
/// removed, so a misspelled name cannot leave a half-applied drop.
fn apply_remove_columns(frame: &mut RecordFrame, columns: &[String]) -> Result<()> {
    for column in columns {
        if frame.data().column(column).is_err() {
            return Err(HxpError::ColumnNotFound {
                operation: "remove_columns",
                column: column.clone(),
            });
        }
    }

    let mut data = frame.data().clone();
    for column in columns {
        data = data.drop(column).map_err(polars_error)?;
    }
    debug!(removed = columns.len(), remaining = data.width(), "columns removed");
    frame.set_data(data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::apply;
    use crate::frame::RecordFrame;
    use hxp_model::{CleanOp, HxpError};
    use polars::prelude::{DataFrame, DataType, NamedFrom, Series};

    fn book_frame() -> RecordFrame {
        let genre = Series::new(
            "genre".into(),
            ["Computer", "Fantasy", "Computer", "Romance"],
        );
        let price = Series::new("price".into(), ["44.95", "5.95", "36.95", "4.95"]);
        let id = Series::new("id".into(), ["bk101", "bk102", "bk103", "bk104"]);
        let data =
            DataFrame::new(vec![genre.into(), price.into(), id.into()]).expect("frame");
        RecordFrame::new(data)
    }

    fn filter(column: &str, allowed: &[&str]) -> CleanOp {
        CleanOp::Filter {
            column: column.to_string(),
            allowed: allowed.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn filter_keeps_matching_rows_in_order() {
        let mut frame = book_frame();
        apply(&mut frame, &filter("genre", &["Computer"])).expect("filter");
        assert_eq!(frame.height(), 2);
        let ids = frame.data().column("id").expect("id column");
        let rendered: Vec<String> = (0..2)
            .map(|idx| hxp_common::cell_to_string(&ids.get(idx).expect("cell")))
            .collect();
        assert_eq!(rendered, vec!["bk101", "bk103"]);
    }

    #[test]
    fn filter_with_no_matches_empties_the_frame() {
        let mut frame = book_frame();
        apply(&mut frame, &filter("genre", &["Horror"])).expect("filter");
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 3);
    }

    #[test]
    fn filter_missing_column_is_column_not_found() {
        let mut frame = book_frame();
        let err = apply(&mut frame, &filter("author", &["x"])).expect_err("must fail");
        assert!(matches!(
            err,
            HxpError::ColumnNotFound { operation: "filter", column } if column == "author"
        ));
    }

    #[test]
    fn remove_columns_drops_named_columns() {
        let mut frame = book_frame();
        let op = CleanOp::RemoveColumns {
            columns: vec!["price".to_string()],
        };
        apply(&mut frame, &op).expect("remove");
        assert_eq!(frame.column_names(), vec!["genre", "id"]);
        assert_eq!(frame.height(), 4);
    }

    #[test]
    fn remove_columns_rejects_unknown_name_without_partial_removal() {
        let mut frame = book_frame();
        let op = CleanOp::RemoveColumns {
            columns: vec!["genre".to_string(), "author".to_string()],
        };
        let err = apply(&mut frame, &op).expect_err("must fail");
        assert!(matches!(
            err,
            HxpError::ColumnNotFound { operation: "remove_columns", column } if column == "author"
        ));
        assert_eq!(frame.width(), 3);
    }

    #[test]
    fn removing_every_column_keeps_the_row_count() {
        let mut frame = book_frame();
        let op = CleanOp::RemoveColumns {
            columns: vec!["genre".to_string(), "price".to_string(), "id".to_string()],
        };
        apply(&mut frame, &op).expect("remove");
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.height(), 4);
    }

    #[test]
    fn retype_to_float_converts_cells() {
        let mut frame = book_frame();
        let op = CleanOp::Retype {
            column: "price".to_string(),
            target: "float".to_string(),
        };
        apply(&mut frame, &op).expect("retype");
        let price = frame.data().column("price").expect("price");
        assert_eq!(price.dtype(), &DataType::Float64);
    }

    #[test]
    fn retype_with_unsupported_target_is_a_no_op() {
        let mut frame = book_frame();
        let op = CleanOp::Retype {
            column: "price".to_string(),
            target: "currency".to_string(),
        };
        apply(&mut frame, &op).expect("retype skips");
        let price = frame.data().column("price").expect("price");
        assert_eq!(price.dtype(), &DataType::String);
    }

    #[test]
    fn retype_failure_names_value_and_target() {
        let mut frame = book_frame();
        let op = CleanOp::Retype {
            column: "id".to_string(),
            target: "int".to_string(),
        };
        let err = apply(&mut frame, &op).expect_err("must fail");
        match err {
            HxpError::ConversionFailure { column, value, .. } => {
                assert_eq!(column, "id");
                assert_eq!(value, "bk101");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
