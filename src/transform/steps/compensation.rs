//! Salary, additional compensation and currency.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TransformResult;
use crate::survey::{ADDITIONAL_COMP, ANNUAL_SALARY, CURRENCY, CURRENCY_OTHER};
use crate::transform::column::{map_coerced, map_text, require};
use crate::transform::tables::{CURRENCY_CODES, lookup};
use crate::transform::text::squish;
use crate::types::{DataSet, Value};

static NON_NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("valid numeric regex"));

static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("valid parenthetical regex"));

static NON_CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Z/]").expect("valid currency regex"));

/// Keep only digits and `.`.
pub fn digits_only(s: &str) -> String {
    NON_NUMERIC_RE.replace_all(s, "").into_owned()
}

/// Uppercase, drop parentheticals, blank out anything but `A-Z` and `/`, then map known names
/// to codes. Unknown values pass through cleaned; `None` means the value is discarded.
pub fn clean_currency(raw: &str) -> Option<String> {
    let upper = raw.to_uppercase();
    let without_notes = PARENTHETICAL_RE.replace_all(&upper, "");
    let cleaned = squish(&NON_CURRENCY_RE.replace_all(&without_notes, " "));
    match lookup(CURRENCY_CODES, &cleaned) {
        Some(code) => code.map(str::to_owned),
        None => Some(cleaned),
    }
}

pub fn standardize_annual_salaries(mut ds: DataSet) -> TransformResult<DataSet> {
    map_text(&mut ds, "standardize_annual_salaries", ANNUAL_SALARY, |s| {
        s.map(digits_only)
    })?;
    Ok(ds)
}

pub fn standardize_additional_comp(mut ds: DataSet) -> TransformResult<DataSet> {
    map_coerced(&mut ds, "standardize_additional_comp", ADDITIONAL_COMP, |s| {
        s.map(|s| digits_only(&s)).filter(|s| !s.is_empty())
    })?;
    Ok(ds)
}

/// Merge the "Other" clarifier into `Currency`, normalize it, and drop `Currency_Other`.
pub fn standardize_currency(mut ds: DataSet) -> TransformResult<DataSet> {
    const STEP: &str = "standardize_currency";

    let other_idx = require(&ds, STEP, CURRENCY_OTHER)?;
    let others: Vec<Option<String>> = ds.rows.iter().map(|row| row[other_idx].to_text()).collect();

    let mut others = others.into_iter();
    map_text(&mut ds, STEP, CURRENCY, |currency| {
        let other = others.next().flatten();
        let merged = match currency {
            Some(c) if c.to_lowercase().contains("other") => other,
            Some(c) => Some(c.to_string()),
            None => None,
        };
        merged.as_deref().and_then(clean_currency)
    })?;

    ds.drop_column(CURRENCY_OTHER);
    Ok(ds)
}
