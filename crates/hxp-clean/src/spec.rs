//! Declarative cleaning specification.
//!
//! A cleaning run is described by a small JSON document:
//!
//! ```json
//! {
//!   "filter": { "column": "genre", "values": ["Computer", "Fantasy"] },
//!   "remove_columns": ["description"],
//!   "retype": [["price", "float"], ["publish_date", "date"]]
//! }
//! ```
//!
//! Every key is optional; a missing key is a no-op. Whatever the key
//! order in the document, operations always execute as
//! filter, then remove_columns, then retype. Shape violations are
//! rejected here, before any data is touched.

use std::fs;
use std::path::Path;

use serde_json::Value;

use hxp_common::format_numeric;
use hxp_model::{CleanOp, HxpError, Result};

/// Parses a specification document from a file.
pub fn load_spec(path: &Path) -> Result<Vec<CleanOp>> {
    if !path.exists() {
        return Err(HxpError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|err| HxpError::ParseFailure {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    parse_spec(&value)
}

/// Validates a specification value into an ordered operation list.
pub fn parse_spec(value: &Value) -> Result<Vec<CleanOp>> {
    let Value::Object(map) = value else {
        return Err(invalid("spec", "object"));
    };

    for key in map.keys() {
        if !matches!(key.as_str(), "filter" | "remove_columns" | "retype") {
            return Err(invalid(key, "one of filter, remove_columns, retype"));
        }
    }

    let mut ops = Vec::new();

    if let Some(filter) = map.get("filter") {
        ops.push(parse_filter(filter)?);
    }
    if let Some(remove) = map.get("remove_columns") {
        ops.push(parse_remove_columns(remove)?);
    }
    if let Some(retype) = map.get("retype") {
        ops.extend(parse_retype(retype)?);
    }

    Ok(ops)
}

fn parse_filter(value: &Value) -> Result<CleanOp> {
    let Value::Object(map) = value else {
        return Err(invalid("filter", "object"));
    };
    let Some(Value::String(column)) = map.get("column") else {
        return Err(invalid("filter.column", "string"));
    };
    let Some(Value::Array(values)) = map.get("values") else {
        return Err(invalid("filter.values", "sequence"));
    };
    let allowed = values
        .iter()
        .map(|entry| {
            scalar_to_string(entry).ok_or_else(|| invalid("filter.values", "sequence of scalars"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CleanOp::Filter {
        column: column.clone(),
        allowed,
    })
}

fn parse_remove_columns(value: &Value) -> Result<CleanOp> {
    let Value::Array(entries) = value else {
        return Err(invalid("remove_columns", "sequence"));
    };
    let columns = entries
        .iter()
        .map(|entry| match entry {
            Value::String(name) => Ok(name.clone()),
            _ => Err(invalid("remove_columns", "sequence of strings")),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CleanOp::RemoveColumns { columns })
}

fn parse_retype(value: &Value) -> Result<Vec<CleanOp>> {
    let Value::Array(entries) = value else {
        return Err(invalid("retype", "sequence of [column, type] pairs"));
    };
    entries
        .iter()
        .map(|entry| {
            let Value::Array(pair) = entry else {
                return Err(invalid("retype", "sequence of [column, type] pairs"));
            };
            let [Value::String(column), Value::String(target)] = pair.as_slice() else {
                return Err(invalid("retype", "sequence of [column, type] pairs"));
            };
            Ok(CleanOp::Retype {
                column: column.clone(),
                target: target.clone(),
            })
        })
        .collect()
}

/// Renders a scalar specification value as cell text. Numbers use the
/// same canonical decimal form the table cells do, so a JSON `95`
/// matches a cell ingested as `"95"`.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                n.as_f64().map(format_numeric)
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn invalid(argument: &str, expected: &'static str) -> HxpError {
    HxpError::InvalidArgumentType {
        argument: argument.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_spec;
    use hxp_model::{CleanOp, HxpError};
    use serde_json::json;

    #[test]
    fn parses_full_spec_in_fixed_order() {
        let spec = json!({
            "retype": [["price", "float"], ["id", "int"]],
            "filter": { "column": "genre", "values": ["Computer"] },
            "remove_columns": ["description"],
        });
        let ops = parse_spec(&spec).expect("parse");
        assert_eq!(ops.len(), 4);
        assert!(matches!(ops[0], CleanOp::Filter { .. }));
        assert!(matches!(ops[1], CleanOp::RemoveColumns { .. }));
        assert!(matches!(
            &ops[2],
            CleanOp::Retype { column, target } if column == "price" && target == "float"
        ));
        assert!(matches!(
            &ops[3],
            CleanOp::Retype { column, target } if column == "id" && target == "int"
        ));
    }

    #[test]
    fn empty_spec_is_no_ops() {
        assert!(parse_spec(&json!({})).expect("parse").is_empty());
    }

    #[test]
    fn numeric_filter_values_match_cell_text() {
        let spec = json!({ "filter": { "column": "rating", "values": [95, 4.5] } });
        let ops = parse_spec(&spec).expect("parse");
        let CleanOp::Filter { allowed, .. } = &ops[0] else {
            panic!("expected filter");
        };
        assert_eq!(allowed, &["95", "4.5"]);
    }

    #[test]
    fn rejects_non_object_spec() {
        let err = parse_spec(&json!([1, 2])).expect_err("must fail");
        assert!(matches!(err, HxpError::InvalidArgumentType { .. }));
    }

    #[test]
    fn rejects_unknown_key() {
        let err = parse_spec(&json!({ "rename": {} })).expect_err("must fail");
        assert!(matches!(
            err,
            HxpError::InvalidArgumentType { argument, .. } if argument == "rename"
        ));
    }

    #[test]
    fn rejects_filter_values_that_are_not_a_sequence() {
        let spec = json!({ "filter": { "column": "genre", "values": "Computer" } });
        let err = parse_spec(&spec).expect_err("must fail");
        assert!(matches!(
            err,
            HxpError::InvalidArgumentType { argument, .. } if argument == "filter.values"
        ));
    }

    #[test]
    fn rejects_retype_entry_that_is_not_a_pair() {
        let spec = json!({ "retype": [["price", "float", "extra"]] });
        let err = parse_spec(&spec).expect_err("must fail");
        assert!(matches!(err, HxpError::InvalidArgumentType { .. }));

        let spec = json!({ "retype": [["price"]] });
        assert!(parse_spec(&spec).is_err());

        let spec = json!({ "retype": ["price"] });
        assert!(parse_spec(&spec).is_err());
    }

    #[test]
    fn rejects_remove_columns_with_non_string_entries() {
        let spec = json!({ "remove_columns": ["ok", 3] });
        let err = parse_spec(&spec).expect_err("must fail");
        assert!(matches!(
            err,
            HxpError::InvalidArgumentType { argument, .. } if argument == "remove_columns"
        ));
    }
}
