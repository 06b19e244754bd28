//! Individual cleaning steps.
//!
//! Every step is a plain function `DataSet -> TransformResult<DataSet>` that reads and writes a
//! fixed set of columns. [`PIPELINE`] lists them in execution order.

pub mod compensation;
pub mod context;
pub mod demographics;
pub mod experience;
pub mod job_title;
pub mod location;
pub mod table;
pub mod timestamp;

use crate::error::TransformResult;
use crate::types::DataSet;

/// A named cleaning step.
#[derive(Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub apply: fn(DataSet) -> TransformResult<DataSet>,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Step").field(&self.name).finish()
    }
}

const fn step(name: &'static str, apply: fn(DataSet) -> TransformResult<DataSet>) -> Step {
    Step { name, apply }
}

/// Steps run after deduplication, in order. Later steps rely on earlier renames and derivations.
pub const PIPELINE: &[Step] = &[
    step("rename_columns", table::rename_columns),
    step("normalize_job_titles", job_title::normalize_job_titles),
    step("standardize_annual_salaries", compensation::standardize_annual_salaries),
    step("standardize_additional_comp", compensation::standardize_additional_comp),
    step("standardize_currency", compensation::standardize_currency),
    step("change_time_format", timestamp::change_time_format),
    step("standardize_income_context", context::standardize_income_context),
    step("standardize_country", location::standardize_country),
    step("standardize_job_context", context::standardize_job_context),
    step("standardize_gender", demographics::standardize_gender),
    step("standardize_race", demographics::standardize_race),
    step("standardize_education", demographics::standardize_education),
    step("standardize_experience", experience::standardize_experience),
    step("standardize_overall_experience", experience::standardize_overall_experience),
    step("standardize_state", location::standardize_state),
    step("standardize_city", location::standardize_city),
    step("final_cleanup", table::final_cleanup),
    step("coerce_to_text", table::coerce_to_text),
    step("project_columns", table::project_columns),
];
