//! Column retyping.
//!
//! Cells are read in their canonical text form and rebuilt as a typed
//! column. Empty and missing cells become null in the typed column; a
//! non-empty cell that cannot convert aborts the run with the offending
//! column, value, and target named.

use chrono::NaiveDate;
use polars::prelude::{AnyValue, Column, DataType, NamedFrom, Series};
use tracing::warn;

use hxp_common::cell_to_string;
use hxp_model::{HxpError, Result, TargetType};

use crate::frame::RecordFrame;

/// Accepted date layouts, tried in order. Hyphenated two-part-first
/// forms are day-first, slashed forms are month-first, year-first forms
/// always win. Single-digit day and month components are accepted.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Parses a date cell against [`DATE_FORMATS`].
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in &DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

/// Retypes one column in place.
///
/// An unknown target name logs a warning and leaves the column
/// untouched; every other failure is fatal.
pub(crate) fn retype_column(frame: &mut RecordFrame, column: &str, raw_target: &str) -> Result<()> {
    let Some(target) = TargetType::parse(raw_target) else {
        warn!(column, target = raw_target, "unsupported retype target, column left unchanged");
        return Ok(());
    };

    let data = frame.data();
    let Ok(source) = data.column(column) else {
        return Err(HxpError::ColumnNotFound {
            operation: "retype",
            column: column.to_string(),
        });
    };
    let cells = collect_cells(source, data.height())?;

    let series = build_typed_series(column, &cells, target)?;
    let mut updated = frame.data().clone();
    updated.with_column(series).map_err(polars_error)?;
    frame.set_data(updated);
    Ok(())
}

fn build_typed_series(column: &str, cells: &[Option<String>], target: TargetType) -> Result<Series> {
    let fail = |value: &str| HxpError::ConversionFailure {
        column: column.to_string(),
        value: value.to_string(),
        target,
    };

    match target {
        TargetType::Integer => {
            let values = cells
                .iter()
                .map(|cell| convert_cell(cell.as_deref(), hxp_common::parse_i64, fail))
                .collect::<Result<Vec<Option<i64>>>>()?;
            Ok(Series::new(column.into(), values))
        }
        TargetType::Float => {
            let values = cells
                .iter()
                .map(|cell| convert_cell(cell.as_deref(), hxp_common::parse_f64, fail))
                .collect::<Result<Vec<Option<f64>>>>()?;
            Ok(Series::new(column.into(), values))
        }
        TargetType::Text => {
            let values: Vec<Option<&str>> = cells.iter().map(Option::as_deref).collect();
            Ok(Series::new(column.into(), values))
        }
        TargetType::Date => {
            let epoch = NaiveDate::default();
            let values = cells
                .iter()
                .map(|cell| {
                    convert_cell(
                        cell.as_deref(),
                        |text| {
                            parse_date(text)
                                .map(|date| date.signed_duration_since(epoch).num_days() as i32)
                        },
                        fail,
                    )
                })
                .collect::<Result<Vec<Option<i32>>>>()?;
            Series::new(column.into(), values)
                .cast(&DataType::Date)
                .map_err(polars_error)
        }
    }
}

fn convert_cell<T>(
    cell: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    fail: impl Fn(&str) -> HxpError,
) -> Result<Option<T>> {
    match cell {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse(text).map(Some).ok_or_else(|| fail(text)),
    }
}

fn collect_cells(column: &Column, height: usize) -> Result<Vec<Option<String>>> {
    (0..height)
        .map(|idx| {
            let value = column.get(idx).map_err(polars_error)?;
            Ok(match value {
                AnyValue::Null => None,
                other => Some(cell_to_string(&other)),
            })
        })
        .collect()
}

pub(crate) fn polars_error(err: polars::prelude::PolarsError) -> HxpError {
    HxpError::Message(err.to_string())
}
