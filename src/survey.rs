//! Survey vocabulary: raw export headers and the canonical output schema.
//!
//! The raw export uses the full question text as column headers. The transformer renames them to
//! short field names and, at the end of the run, projects onto [`CANONICAL_COLUMNS`].

pub const TIMESTAMP: &str = "Timestamp";
pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const RACE: &str = "Race";
pub const EDUCATION: &str = "Education";
pub const INDUSTRY: &str = "Industry";
pub const JOB_TITLE: &str = "Job_Title";
pub const SENIORITY: &str = "Seniority";
pub const JOB_CONTEXT: &str = "Job_Context";
pub const EXPERIENCE_OVERALL: &str = "Experience_Overall";
pub const EXPERIENCE: &str = "Experience";
pub const ANNUAL_SALARY: &str = "Annual_Salary";
pub const ADDITIONAL_COMP: &str = "Additional_Comp";
pub const CURRENCY: &str = "Currency";
/// Free-text clarifier for `Currency == "Other"`; merged into [`CURRENCY`] and then dropped.
pub const CURRENCY_OTHER: &str = "Currency_Other";
pub const COUNTRY: &str = "Country";
pub const STATE: &str = "State";
pub const CITY: &str = "City";
pub const INCOME_CONTEXT: &str = "Income_Context";

/// Raw survey header → short field name.
pub const RENAME_MAP: &[(&str, &str)] = &[
    ("Timestamp", TIMESTAMP),
    ("How old are you?", AGE),
    ("What industry do you work in?", INDUSTRY),
    ("Job title", JOB_TITLE),
    (
        "If your job title needs additional context, please clarify here:",
        JOB_CONTEXT,
    ),
    (
        "What is your annual salary? (You'll indicate the currency in a later question. If you are part-time or hourly, please enter an annualized equivalent -- what you would earn if you worked the job 40 hours a week, 52 weeks a year.)",
        ANNUAL_SALARY,
    ),
    (
        "How much additional monetary compensation do you get, if any (for example, bonuses or overtime in an average year)? Please only include monetary compensation here, not the value of benefits.",
        ADDITIONAL_COMP,
    ),
    ("Please indicate the currency", CURRENCY),
    ("If \"Other,\" please indicate the currency here: ", CURRENCY_OTHER),
    (
        "If your income needs additional context, please provide it here:",
        INCOME_CONTEXT,
    ),
    ("What country do you work in?", COUNTRY),
    ("If you're in the U.S., what state do you work in?", STATE),
    ("What city do you work in?", CITY),
    (
        "How many years of professional work experience do you have overall?",
        EXPERIENCE_OVERALL,
    ),
    (
        "How many years of professional work experience do you have in your field?",
        EXPERIENCE,
    ),
    ("What is your highest level of education completed?", EDUCATION),
    ("What is your gender?", GENDER),
    ("What is your race? (Choose all that apply.)", RACE),
    ("Seniority", SENIORITY),
];

/// The 18 output columns, in output order.
pub const CANONICAL_COLUMNS: [&str; 18] = [
    TIMESTAMP,
    AGE,
    GENDER,
    RACE,
    EDUCATION,
    INDUSTRY,
    JOB_TITLE,
    SENIORITY,
    JOB_CONTEXT,
    EXPERIENCE_OVERALL,
    EXPERIENCE,
    ANNUAL_SALARY,
    ADDITIONAL_COMP,
    CURRENCY,
    COUNTRY,
    STATE,
    CITY,
    INCOME_CONTEXT,
];

/// Short field name for a raw header, if the header is part of the survey export.
pub fn canonical_name(raw_header: &str) -> Option<&'static str> {
    RENAME_MAP
        .iter()
        .find(|(raw, _)| *raw == raw_header)
        .map(|(_, name)| *name)
}

/// Raw header for a short field name.
pub fn raw_header(canonical: &str) -> Option<&'static str> {
    RENAME_MAP
        .iter()
        .find(|(_, name)| *name == canonical)
        .map(|(raw, _)| *raw)
}

/// Raw headers the extraction source requires. `Seniority` is derived, never exported.
pub fn required_raw_headers() -> impl Iterator<Item = &'static str> {
    RENAME_MAP
        .iter()
        .filter(|(_, name)| *name != SENIORITY)
        .map(|(raw, _)| *raw)
}
