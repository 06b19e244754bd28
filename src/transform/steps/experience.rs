//! Years-of-experience ranges.
//!
//! The two experience questions offered slightly different option text, so each column has its
//! own table.

use crate::error::TransformResult;
use crate::survey::{EXPERIENCE, EXPERIENCE_OVERALL};
use crate::transform::column::map_text;
use crate::transform::tables::{
    EXPERIENCE_DEFAULT, EXPERIENCE_RANGES, OVERALL_EXPERIENCE_RANGES, lookup,
};
use crate::types::DataSet;

fn canonical_range(raw: Option<&str>, table: &[(&str, &str)]) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => lookup(table, s).unwrap_or(s).to_string(),
        None => EXPERIENCE_DEFAULT.to_string(),
    }
}

pub fn standardize_experience(mut ds: DataSet) -> TransformResult<DataSet> {
    map_text(&mut ds, "standardize_experience", EXPERIENCE, |s| {
        Some(canonical_range(s, EXPERIENCE_RANGES))
    })?;
    Ok(ds)
}

pub fn standardize_overall_experience(mut ds: DataSet) -> TransformResult<DataSet> {
    map_text(&mut ds, "standardize_overall_experience", EXPERIENCE_OVERALL, |s| {
        Some(canonical_range(s, OVERALL_EXPERIENCE_RANGES))
    })?;
    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Schema, Value};

    #[test]
    fn ranges_are_hyphenated() {
        assert_eq!(canonical_range(Some("1 year or less"), EXPERIENCE_RANGES), "0-1 years");
        assert_eq!(canonical_range(Some(" 2 - 4 years "), EXPERIENCE_RANGES), "2-4 years");
        assert_eq!(canonical_range(Some("41 years or more"), EXPERIENCE_RANGES), "41+ years");
        assert_eq!(canonical_range(Some("  "), EXPERIENCE_RANGES), "0-1 years");
        assert_eq!(canonical_range(None, EXPERIENCE_RANGES), "0-1 years");
    }

    #[test]
    fn thirties_option_text_differs_per_question() {
        assert_eq!(canonical_range(Some("30 - 40 years"), EXPERIENCE_RANGES), "30-40 years");
        assert_eq!(canonical_range(Some("31 - 40 years"), EXPERIENCE_RANGES), "31 - 40 years");
        assert_eq!(
            canonical_range(Some("31 - 40 years"), OVERALL_EXPERIENCE_RANGES),
            "30-40 years"
        );
        assert_eq!(
            canonical_range(Some("30 - 40 years"), OVERALL_EXPERIENCE_RANGES),
            "30 - 40 years"
        );
    }

    #[test]
    fn steps_fill_missing() {
        let ds = DataSet::new(
            Schema::utf8([EXPERIENCE, EXPERIENCE_OVERALL]),
            vec![vec![Value::Null, Value::from("8 - 10 years")]],
        );
        let ds = standardize_experience(ds).unwrap();
        let out = standardize_overall_experience(ds).unwrap();
        assert_eq!(out.rows[0], vec![Value::from("0-1 years"), Value::from("8-10 years")]);
    }
}
