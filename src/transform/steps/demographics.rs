//! Gender, race and education: categorical remapping with defaults.

use crate::error::TransformResult;
use crate::survey::{EDUCATION, GENDER, RACE};
use crate::transform::column::{map_text, map_values};
use crate::transform::tables::{
    EDUCATION_DEFAULT, EDUCATION_LEVELS, GENDER_DEFAULT, GENDER_SYNONYMS, RACE_DEFAULT,
    RACE_SYNONYMS, lookup,
};
use crate::transform::text::{is_blank, title_case};
use crate::types::{DataSet, Value};

/// Blank → default, exact synonym → mapped value, anything else kept.
///
/// Non-text values are left for the final type coercion.
fn remap_category(value: Value, table: &[(&str, &str)], default: &str) -> Value {
    match value {
        Value::Null => Value::text(default),
        Value::Utf8(s) if is_blank(&s) => Value::text(default),
        Value::Utf8(s) => match lookup(table, &s) {
            Some(mapped) => Value::text(mapped),
            None => Value::Utf8(s),
        },
        other => other,
    }
}

pub fn standardize_gender(mut ds: DataSet) -> TransformResult<DataSet> {
    map_values(&mut ds, "standardize_gender", GENDER, |v| {
        remap_category(v, GENDER_SYNONYMS, GENDER_DEFAULT)
    })?;
    Ok(ds)
}

pub fn standardize_race(mut ds: DataSet) -> TransformResult<DataSet> {
    map_text(&mut ds, "standardize_race", RACE, |s| {
        let race = match s.filter(|s| !is_blank(s)) {
            Some(s) => title_case(lookup(RACE_SYNONYMS, s).unwrap_or(s)),
            None => RACE_DEFAULT.to_string(),
        };
        Some(race)
    })?;
    Ok(ds)
}

pub fn standardize_education(mut ds: DataSet) -> TransformResult<DataSet> {
    map_values(&mut ds, "standardize_education", EDUCATION, |v| {
        remap_category(v, EDUCATION_LEVELS, EDUCATION_DEFAULT)
    })?;
    Ok(ds)
}
