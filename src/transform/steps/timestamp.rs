//! Submission timestamp normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::TransformResult;
use crate::survey::TIMESTAMP;
use crate::transform::column::map_values;
use crate::types::{DataSet, DataType, Value};

const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%m/%d/%Y %H:%M:%S %z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a survey timestamp into UTC. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Render as `YYYY-MM-DD HH:MM:SS` in UTC; unparseable input becomes `None`.
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format(OUTPUT_FORMAT).to_string())
}

/// Unparseable values (including non-text ones) become null rather than failing the step.
pub fn change_time_format(mut ds: DataSet) -> TransformResult<DataSet> {
    map_values(&mut ds, "change_time_format", TIMESTAMP, |value| match value {
        Value::Utf8(s) => Value::from_option(normalize_timestamp(&s)),
        _ => Value::Null,
    })?;
    if let Some(idx) = ds.schema.index_of(TIMESTAMP) {
        ds.schema.fields[idx].data_type = DataType::Utf8;
    }
    Ok(ds)
}
