//! Column access helpers shared by the cleaning steps.

use crate::error::{TransformError, TransformResult};
use crate::types::{DataSet, DataType, Field, Value};

/// Index of `column`, or [`TransformError::MissingColumn`] attributed to `step`.
pub fn require(ds: &DataSet, step: &'static str, column: &str) -> TransformResult<usize> {
    ds.schema
        .index_of(column)
        .ok_or_else(|| TransformError::MissingColumn {
            step,
            column: column.to_string(),
        })
}

/// Apply a text rule to every cell of `column`.
///
/// `Null` cells are passed as `None`; any non-text value is a
/// [`TransformError::UnsupportedValue`].
pub fn map_text<F>(ds: &mut DataSet, step: &'static str, column: &str, mut f: F) -> TransformResult<()>
where
    F: FnMut(Option<&str>) -> Option<String>,
{
    let idx = require(ds, step, column)?;
    for (row_idx, row) in ds.rows.iter_mut().enumerate() {
        let out = match &row[idx] {
            Value::Null => f(None),
            Value::Utf8(s) => f(Some(s.as_str())),
            other => {
                return Err(TransformError::UnsupportedValue {
                    step,
                    column: column.to_string(),
                    row: row_idx,
                    found: other.type_name(),
                });
            }
        };
        row[idx] = Value::from_option(out);
    }
    ds.schema.fields[idx].data_type = DataType::Utf8;
    Ok(())
}

/// Apply a text rule to every cell of `column`, rendering non-text values as text first.
pub fn map_coerced<F>(ds: &mut DataSet, step: &'static str, column: &str, mut f: F) -> TransformResult<()>
where
    F: FnMut(Option<String>) -> Option<String>,
{
    let idx = require(ds, step, column)?;
    for row in &mut ds.rows {
        let cell = std::mem::replace(&mut row[idx], Value::Null);
        let text = match cell {
            Value::Utf8(s) => Some(s),
            other => other.to_text(),
        };
        row[idx] = Value::from_option(f(text));
    }
    ds.schema.fields[idx].data_type = DataType::Utf8;
    Ok(())
}

/// Apply a rule to every cell of `column`, whatever its type.
pub fn map_values<F>(ds: &mut DataSet, step: &'static str, column: &str, mut f: F) -> TransformResult<()>
where
    F: FnMut(Value) -> Value,
{
    let idx = require(ds, step, column)?;
    for row in &mut ds.rows {
        let cell = std::mem::replace(&mut row[idx], Value::Null);
        row[idx] = f(cell);
    }
    Ok(())
}

/// Overwrite `column` with `values`, appending it as a text column when absent.
pub fn set_column(ds: &mut DataSet, column: &str, values: Vec<Value>) {
    let idx = match ds.schema.index_of(column) {
        Some(idx) => idx,
        None => ds.add_column(Field::utf8(column), Value::Null),
    };
    for (row, value) in ds.rows.iter_mut().zip(values) {
        row[idx] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Schema;

    fn ds() -> DataSet {
        DataSet::new(
            Schema::utf8(["a", "b"]),
            vec![
                vec![Value::from("x"), Value::Int64(7)],
                vec![Value::Null, Value::Float64(2.5)],
            ],
        )
    }

    #[test]
    fn map_text_rejects_non_text() {
        let mut ds = ds();
        map_text(&mut ds, "t", "a", |s| s.map(str::to_uppercase)).unwrap();
        assert_eq!(ds.rows[0][0], Value::from("X"));
        assert_eq!(ds.rows[1][0], Value::Null);

        let err = map_text(&mut ds, "t", "b", |s| s.map(str::to_owned)).unwrap_err();
        assert_eq!(err.to_string(), "t: unsupported int64 value in column 'b' at row 0");
    }

    #[test]
    fn map_coerced_renders_numbers() {
        let mut ds = ds();
        map_coerced(&mut ds, "t", "b", |s| s.map(|s| format!("<{s}>"))).unwrap();
        assert_eq!(ds.rows[0][1], Value::from("<7>"));
        assert_eq!(ds.rows[1][1], Value::from("<2.5>"));
    }

    #[test]
    fn missing_column_names_step() {
        let mut ds = ds();
        let err = map_values(&mut ds, "standardize_city", "City", |v| v).unwrap_err();
        assert_eq!(err.step(), "standardize_city");
        assert!(err.to_string().contains("missing expected column 'City'"));
    }

    #[test]
    fn set_column_appends_when_absent() {
        let mut ds = ds();
        set_column(&mut ds, "c", vec![Value::from("1"), Value::Null]);
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.value(0, "c"), Some(&Value::from("1")));
    }
}
