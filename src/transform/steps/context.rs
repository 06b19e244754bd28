//! Free-text clarification fields.

use crate::error::TransformResult;
use crate::survey::{INCOME_CONTEXT, JOB_CONTEXT};
use crate::transform::column::{map_text, map_values};
use crate::transform::text::squish;
use crate::types::DataSet;

pub fn standardize_income_context(mut ds: DataSet) -> TransformResult<DataSet> {
    map_text(&mut ds, "standardize_income_context", INCOME_CONTEXT, |s| {
        let cleaned = squish(&s.unwrap_or_default().to_lowercase());
        (!cleaned.is_empty()).then_some(cleaned)
    })?;
    Ok(ds)
}

/// Passes values through; only checks the column is there.
pub fn standardize_job_context(mut ds: DataSet) -> TransformResult<DataSet> {
    map_values(&mut ds, "standardize_job_context", JOB_CONTEXT, |v| v)?;
    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Schema, Value};

    #[test]
    fn income_context_is_lowercased_and_squished() {
        let ds = DataSet::new(
            Schema::utf8([INCOME_CONTEXT]),
            vec![
                vec![Value::from("  Includes   OVERTIME\n pay ")],
                vec![Value::from("   ")],
                vec![Value::Null],
            ],
        );
        let out = standardize_income_context(ds).unwrap();
        let col: Vec<_> = out.column(INCOME_CONTEXT).unwrap().cloned().collect();
        assert_eq!(col, vec![Value::from("includes overtime pay"), Value::Null, Value::Null]);
    }

    #[test]
    fn job_context_passes_through() {
        let rows = vec![vec![Value::from("Part time, remote")], vec![Value::Null]];
        let ds = DataSet::new(Schema::utf8([JOB_CONTEXT]), rows.clone());
        assert_eq!(standardize_job_context(ds).unwrap().rows, rows);
    }
}
