//! Country, state and city.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TransformResult;
use crate::survey::{CITY, COUNTRY, STATE};
use crate::transform::column::{map_coerced, map_text};
use crate::transform::tables::{
    CITY_DENYLIST, CITY_NULL_MARKERS, COUNTRY_ALIASES, STATE_NULL_MARKERS, lookup,
};
use crate::transform::text::{collapse_whitespace, repair_latin1_mojibake, squish, title_case};
use crate::types::DataSet;

static NON_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\s]").expect("valid country regex"));

/// Map free-text country input onto the alias table. Unlisted countries become `None`.
pub fn canonical_country(raw: &str) -> Option<&'static str> {
    let lowered = raw.to_lowercase();
    let letters = collapse_whitespace(&NON_LETTER_RE.replace_all(&lowered, ""));
    lookup(COUNTRY_ALIASES, &letters)
}

/// First comma-separated segment, trimmed; placeholder answers become `None`.
pub fn clean_state(raw: &str) -> Option<String> {
    let first = raw.split(',').next().unwrap_or_default().trim();
    (!STATE_NULL_MARKERS.contains(&first)).then(|| first.to_string())
}

/// Repair encoding, squish, drop placeholders and non-city answers, title-case the rest.
pub fn clean_city(raw: &str) -> Option<String> {
    let city = squish(&repair_latin1_mojibake(raw));
    if CITY_NULL_MARKERS.contains(&city.as_str()) {
        return None;
    }
    if CITY_DENYLIST.contains(&city.to_lowercase().trim()) {
        return None;
    }
    Some(title_case(&city).trim().to_string())
}

pub fn standardize_country(mut ds: DataSet) -> TransformResult<DataSet> {
    map_text(&mut ds, "standardize_country", COUNTRY, |s| {
        s.and_then(canonical_country).map(str::to_owned)
    })?;
    Ok(ds)
}

pub fn standardize_state(mut ds: DataSet) -> TransformResult<DataSet> {
    map_coerced(&mut ds, "standardize_state", STATE, |s| {
        s.as_deref().and_then(clean_state)
    })?;
    Ok(ds)
}

pub fn standardize_city(mut ds: DataSet) -> TransformResult<DataSet> {
    map_coerced(&mut ds, "standardize_city", CITY, |s| s.as_deref().and_then(clean_city))?;
    Ok(ds)
}
