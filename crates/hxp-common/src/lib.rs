pub mod polars;

pub use crate::polars::{cell_to_string, format_numeric, parse_f64, parse_i64};
