//! Job title normalization and seniority derivation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TransformResult;
use crate::survey::{JOB_TITLE, SENIORITY};
use crate::transform::column::{map_text, require, set_column};
use crate::transform::tables::{SENIORITY_LABELS, lookup};
use crate::transform::text::{squish, truncate_chars};
use crate::types::{DataSet, Value};

const STEP: &str = "normalize_job_titles";

/// Upper bound on the stored seniority label.
pub const SENIORITY_MAX_LEN: usize = 100;

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation regex"));

static SENIORITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(sr|senior|lead|principal|jr|junior|chief|director|manager|assistant|associate|head|coordinator|i{1,3}|iv|v)\b",
    )
    .expect("valid seniority regex")
});

/// Lowercase, strip punctuation, collapse whitespace.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    squish(&PUNCTUATION_RE.replace_all(&lowered, ""))
}

/// Seniority label for an already normalized title: the leftmost keyword wins.
pub fn seniority_of(normalized_title: &str) -> Option<String> {
    let keyword = SENIORITY_RE.find(normalized_title)?;
    lookup(SENIORITY_LABELS, keyword.as_str()).map(|label| truncate_chars(label, SENIORITY_MAX_LEN))
}

/// Normalize `Job_Title` and (re)derive `Seniority` from it.
pub fn normalize_job_titles(mut ds: DataSet) -> TransformResult<DataSet> {
    map_text(&mut ds, STEP, JOB_TITLE, |title| title.map(normalize_title))?;

    let idx = require(&ds, STEP, JOB_TITLE)?;
    let seniority = ds
        .rows
        .iter()
        .map(|row| Value::from_option(row[idx].as_str().and_then(seniority_of)))
        .collect();
    set_column(&mut ds, SENIORITY, seniority);
    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::types::Schema;

    #[test]
    fn titles_lose_case_and_punctuation() {
        assert_eq!(normalize_title("Senior Software Engineer!!"), "senior software engineer");
        assert_eq!(normalize_title("  Sr.  Data-Analyst (Contract) "), "sr dataanalyst contract");
        assert_eq!(normalize_title("R&D Lead"), "rd lead");
        assert_eq!(normalize_title("???"), "");
    }

    #[test]
    fn first_keyword_wins() {
        assert_eq!(seniority_of("senior software engineer").as_deref(), Some("Senior"));
        assert_eq!(seniority_of("associate director of marketing").as_deref(), Some("Associate"));
        assert_eq!(seniority_of("head of people").as_deref(), Some("Executive"));
        assert_eq!(seniority_of("jr developer").as_deref(), Some("Junior"));
        assert_eq!(seniority_of("software engineer").as_deref(), None);
    }

    #[test]
    fn roman_numerals_need_word_boundaries() {
        assert_eq!(seniority_of("engineer ii").as_deref(), Some("Level II"));
        assert_eq!(seniority_of("analyst iii").as_deref(), Some("Level III"));
        assert_eq!(seniority_of("accountant iv").as_deref(), Some("Level IV"));
        assert_eq!(seniority_of("librarian v").as_deref(), Some("Level V"));
        assert_eq!(seniority_of("civil engineer"), None);
        assert_eq!(seniority_of("taxi driver"), None);
        assert_eq!(seniority_of("vivid designer"), None);
    }

    #[test]
    fn step_adds_seniority_column() {
        let ds = DataSet::new(
            Schema::utf8([JOB_TITLE]),
            vec![
                vec![Value::from("Senior Software Engineer!!")],
                vec![Value::from("Barista")],
                vec![Value::Null],
            ],
        );
        let out = normalize_job_titles(ds).unwrap();
        assert_eq!(out.value(0, JOB_TITLE), Some(&Value::from("senior software engineer")));
        assert_eq!(out.value(0, SENIORITY), Some(&Value::from("Senior")));
        assert_eq!(out.value(1, SENIORITY), Some(&Value::Null));
        assert_eq!(out.value(2, JOB_TITLE), Some(&Value::Null));
        assert_eq!(out.value(2, SENIORITY), Some(&Value::Null));
    }

    #[test]
    fn step_overwrites_existing_seniority() {
        let ds = DataSet::new(
            Schema::utf8([SENIORITY, JOB_TITLE]),
            vec![vec![Value::from("stale"), Value::from("Lead Chef")]],
        );
        let out = normalize_job_titles(ds).unwrap();
        assert_eq!(out.column_count(), 2);
        assert_eq!(out.value(0, SENIORITY), Some(&Value::from("Lead")));
    }

    #[test]
    fn numeric_titles_are_rejected() {
        let ds = DataSet::new(Schema::utf8([JOB_TITLE]), vec![vec![Value::Int64(42)]]);
        let err = normalize_job_titles(ds).unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedValue { row: 0, found: "int64", .. }));
    }
}
