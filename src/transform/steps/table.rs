//! Whole-table steps: deduplication, null rows, renaming, cleanup, coercion, projection.

use std::collections::{HashMap, HashSet};

use crate::error::{TransformError, TransformResult};
use crate::survey::{CANONICAL_COLUMNS, canonical_name};
use crate::transform::text::is_blank;
use crate::types::{DataSet, DataType, Value};

/// Hashable image of a cell, for exact duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Int64(i64),
    Float64(u64),
    Bool(bool),
    Utf8(&'a str),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Int64(v) => Self::Int64(*v),
            Value::Float64(v) => Self::Float64(v.to_bits()),
            Value::Bool(v) => Self::Bool(*v),
            Value::Utf8(s) => Self::Utf8(s),
        }
    }
}

fn row_key(row: &[Value]) -> Vec<CellKey<'_>> {
    row.iter().map(CellKey::from).collect()
}

/// Outcome of [`deduplicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduplication {
    /// Rows that have at least one exact copy elsewhere (every copy counted).
    pub duplicated_rows: usize,
    /// Rows removed; the first occurrence of each duplicate group is kept.
    pub removed: usize,
}

/// Drop exact duplicate rows, keeping first occurrences in their original order.
pub fn deduplicate(mut ds: DataSet) -> (DataSet, Deduplication) {
    let duplicated_rows = {
        let mut counts: HashMap<Vec<CellKey<'_>>, usize> = HashMap::new();
        for row in &ds.rows {
            *counts.entry(row_key(row)).or_default() += 1;
        }
        counts.values().filter(|&&n| n > 1).sum()
    };

    let before = ds.row_count();
    if duplicated_rows > 0 {
        let mut keep = Vec::with_capacity(before);
        {
            let mut seen = HashSet::new();
            for row in &ds.rows {
                keep.push(seen.insert(row_key(row)));
            }
        }
        let mut keep = keep.into_iter();
        ds.rows.retain(|_| keep.next().unwrap_or(true));
    }

    let removed = before - ds.row_count();
    (
        ds,
        Deduplication {
            duplicated_rows,
            removed,
        },
    )
}

/// Null, empty text, or a floating-point `NaN`.
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Utf8(s) => s.is_empty(),
        Value::Float64(v) => v.is_nan(),
        Value::Int64(_) | Value::Bool(_) => false,
    }
}

/// `true` when every field is missing.
pub fn is_null_row(row: &[Value]) -> bool {
    row.iter().all(is_missing)
}

/// Number of completely null rows.
pub fn count_null_rows(ds: &DataSet) -> usize {
    ds.rows.iter().filter(|row| is_null_row(row)).count()
}

/// Remove completely null rows.
pub fn drop_null_rows(mut ds: DataSet) -> DataSet {
    ds.retain_rows(|row| !is_null_row(row));
    ds
}

/// Rename raw survey headers to short field names. Unknown headers are kept as-is.
pub fn rename_columns(mut ds: DataSet) -> TransformResult<DataSet> {
    ds.rename_columns(|name| canonical_name(name).map(str::to_owned));
    Ok(ds)
}

/// Whitespace-only strings and `NaN` become null, in every column.
pub fn final_cleanup(mut ds: DataSet) -> TransformResult<DataSet> {
    for row in &mut ds.rows {
        for cell in row.iter_mut() {
            let missing = match cell {
                Value::Utf8(s) => is_blank(s),
                Value::Float64(v) => v.is_nan(),
                _ => false,
            };
            if missing {
                *cell = Value::Null;
            }
        }
    }
    Ok(ds)
}

/// Render every remaining value as text so each column holds a single type.
pub fn coerce_to_text(mut ds: DataSet) -> TransformResult<DataSet> {
    for row in &mut ds.rows {
        for cell in row.iter_mut() {
            if !matches!(cell, Value::Null | Value::Utf8(_)) {
                *cell = Value::from_option(cell.to_text());
            }
        }
    }
    for field in &mut ds.schema.fields {
        field.data_type = DataType::Utf8;
    }
    Ok(ds)
}

/// Select the canonical 18 columns in output order, dropping any others.
pub fn project_columns(ds: DataSet) -> TransformResult<DataSet> {
    ds.select_columns(&CANONICAL_COLUMNS)
        .map_err(|column| TransformError::MissingColumn {
            step: "project_columns",
            column: column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Schema;

    fn ds(rows: Vec<Vec<Value>>) -> DataSet {
        DataSet::new(Schema::utf8(["a", "b"]), rows)
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let input = ds(vec![
            vec![Value::from("x"), Value::from("1")],
            vec![Value::from("y"), Value::from("2")],
            vec![Value::from("x"), Value::from("1")],
            vec![Value::from("x"), Value::from("1")],
            vec![Value::from("x"), Value::Null],
        ]);
        let (out, stats) = deduplicate(input);
        assert_eq!(
            stats,
            Deduplication {
                duplicated_rows: 3,
                removed: 2
            }
        );
        assert_eq!(
            out.rows,
            vec![
                vec![Value::from("x"), Value::from("1")],
                vec![Value::from("y"), Value::from("2")],
                vec![Value::from("x"), Value::Null],
            ]
        );
    }

    #[test]
    fn dedup_distinguishes_types_and_matches_nan() {
        let input = ds(vec![
            vec![Value::Int64(1), Value::Float64(f64::NAN)],
            vec![Value::from("1"), Value::Float64(f64::NAN)],
            vec![Value::Int64(1), Value::Float64(f64::NAN)],
        ]);
        let (out, stats) = deduplicate(input);
        assert_eq!(stats.removed, 1);
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn null_rows_are_detected_and_dropped() {
        let input = ds(vec![
            vec![Value::Null, Value::from("")],
            vec![Value::Null, Value::from(" ")],
            vec![Value::Null, Value::Null],
        ]);
        assert_eq!(count_null_rows(&input), 2);
        assert_eq!(drop_null_rows(input).row_count(), 1);
    }

    #[test]
    fn cleanup_and_coercion() {
        let input = ds(vec![vec![Value::from(" \t"), Value::Int64(3)]]);
        let out = coerce_to_text(final_cleanup(input).unwrap()).unwrap();
        assert_eq!(out.rows[0], vec![Value::Null, Value::from("3")]);
        assert!(out.schema.fields.iter().all(|f| f.data_type == DataType::Utf8));
    }

    #[test]
    fn nan_counts_as_missing() {
        let input = ds(vec![
            vec![Value::Float64(f64::NAN), Value::Null],
            vec![Value::Float64(f64::NAN), Value::Float64(2.5)],
        ]);
        assert_eq!(count_null_rows(&input), 1);

        let out = coerce_to_text(final_cleanup(input).unwrap()).unwrap();
        assert_eq!(out.rows[0], vec![Value::Null, Value::Null]);
        assert_eq!(out.rows[1], vec![Value::Null, Value::from("2.5")]);
    }

    #[test]
    fn rename_keeps_unknown_headers() {
        let input = DataSet::new(Schema::utf8(["Job title", "Extra"]), vec![]);
        let out = rename_columns(input).unwrap();
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["Job_Title", "Extra"]
        );
    }

    #[test]
    fn projection_reports_first_missing_column() {
        let input = DataSet::new(Schema::utf8(["Timestamp"]), vec![]);
        let err = project_columns(input).unwrap_err();
        assert_eq!(err.to_string(), "project_columns: missing expected column 'Age'");
    }
}
