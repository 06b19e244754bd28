//! Fixed lookup tables used by the cleaning steps.
//!
//! Each table is an immutable `(from, to)` slice matched on the whole (already normalized) value.

/// Find `key` in a `(from, to)` table.
pub fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(from, _)| *from == key).map(|(_, to)| *to)
}

/// Seniority keyword (lowercase, word-bounded in the title) → label.
pub const SENIORITY_LABELS: &[(&str, &str)] = &[
    ("sr", "Senior"),
    ("senior", "Senior"),
    ("lead", "Lead"),
    ("principal", "Principal"),
    ("chief", "Executive"),
    ("director", "Executive"),
    ("manager", "Manager"),
    ("assistant", "Assistant"),
    ("associate", "Associate"),
    ("head", "Executive"),
    ("coordinator", "Coordinator"),
    ("jr", "Junior"),
    ("junior", "Junior"),
    ("i", "Level I"),
    ("ii", "Level II"),
    ("iii", "Level III"),
    ("iv", "Level IV"),
    ("v", "Level V"),
];

/// Cleaned free-text currency → code. `None` means the value is discarded.
pub const CURRENCY_CODES: &[(&str, Option<&str>)] = &[
    ("US DOLLAR", Some("USD")),
    ("AMERICAN DOLLARS", Some("USD")),
    ("USD", Some("USD")),
    ("BR", Some("BRL")),
    ("BRL", Some("BRL")),
    ("BRL R", Some("BRL")),
    ("INDIAN RUPEES", Some("INR")),
    ("RUPEES", Some("INR")),
    ("INR INDIAN RUPEE", Some("INR")),
    ("RMB", Some("CNY")),
    ("CHINA RMB", Some("CNY")),
    ("RMB CHINESE YUAN", Some("CNY")),
    ("EURO", Some("EUR")),
    ("DANISH KRONER", Some("DKK")),
    ("NORWEGIAN KRONER", Some("NOK")),
    ("POLISH ZLOTY", Some("PLN")),
    ("POLISH ZWOTY", Some("PLN")),
    ("PLN ZWOTY", Some("PLN")),
    ("KOREAN WON", Some("KRW")),
    ("KRW KOREAN WON", Some("KRW")),
    ("NEW ISRAELI SHEKEL", Some("ILS")),
    ("NIS", Some("ILS")),
    ("NIS NEW ISRAELI SHEKEL", Some("ILS")),
    ("ILS SHEKEL", Some("ILS")),
    ("ISRAELI SHEKELS", Some("ILS")),
    ("ARGENTINIAN PESO", Some("ARS")),
    ("ARGENTINE PESO", Some("ARS")),
    ("PESO ARGENTINO", Some("ARS")),
    ("MEXICAN PESOS", Some("MXN")),
    ("PESOS COLOMBIANOS", Some("COP")),
    ("PHILIPPINE PESO", Some("PHP")),
    ("PHILIPPINE PESOS", Some("PHP")),
    ("PHP PHILIPPINE PESO", Some("PHP")),
    ("AUD AUSTRALIAN", Some("AUD")),
    ("AUSTRALIAN DOLLARS", Some("AUD")),
    ("AUD NZD", Some("AUD/NZD")),
    ("SINGAPORE DOLLARA", Some("SGD")),
    ("THAI BAHT", Some("THB")),
    ("MYR", Some("MYR")),
    ("RM", Some("MYR")),
    ("EQUITY", Some("EQUITY")),
    ("0", None),
];

/// Cleaned country text → canonical country name. Anything else becomes null.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("us", "United States"),
    ("usa", "United States"),
    ("u s", "United States"),
    ("u s a", "United States"),
    ("united states", "United States"),
    ("united state", "United States"),
    ("america", "United States"),
    ("the united states", "United States"),
    ("uk", "United Kingdom"),
    ("u k", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("england", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("britain", "United Kingdom"),
    ("scotland", "United Kingdom"),
    ("wales", "United Kingdom"),
    ("canada", "Canada"),
    ("australia", "Australia"),
    ("new zealand", "New Zealand"),
    ("mexico", "Mexico"),
    ("france", "France"),
    ("germany", "Germany"),
    ("netherlands", "Netherlands"),
    ("india", "India"),
    ("japan", "Japan"),
    ("global", "Global"),
    ("worldwide", "Global"),
    ("california", "United States"),
    ("europe", "Europe"),
    ("africa", "Africa"),
];

pub const GENDER_SYNONYMS: &[(&str, &str)] = &[
    ("Man", "Male"),
    ("Woman", "Female"),
    ("Non-binary", "Non-Binary"),
    ("Other or prefer not to answer", "Prefer not to say"),
    ("Prefer not to answer", "Prefer not to say"),
    ("0", "Prefer not to say"),
];

pub const GENDER_DEFAULT: &str = "Prefer not to say";

pub const RACE_SYNONYMS: &[(&str, &str)] = &[
    ("Another option not listed here or prefer not to answer", "Other"),
    ("0", "Other"),
];

pub const RACE_DEFAULT: &str = "Other";

pub const EDUCATION_LEVELS: &[(&str, &str)] = &[
    ("Master's degree", "Master's Degree"),
    ("College degree", "College Degree"),
    ("Some college", "Some College"),
    ("Professional degree (MD, JD, etc.)", "Professional Degree"),
];

pub const EDUCATION_DEFAULT: &str = "Prefer not to say";

/// Field experience answers. The survey offered "30 - 40 years" for this question.
pub const EXPERIENCE_RANGES: &[(&str, &str)] = &[
    ("1 year or less", "0-1 years"),
    ("2 - 4 years", "2-4 years"),
    ("5-7 years", "5-7 years"),
    ("8 - 10 years", "8-10 years"),
    ("11 - 20 years", "11-20 years"),
    ("21 - 30 years", "21-30 years"),
    ("30 - 40 years", "30-40 years"),
    ("41 years or more", "41+ years"),
];

/// Overall experience answers. The survey offered "31 - 40 years" for this question.
pub const OVERALL_EXPERIENCE_RANGES: &[(&str, &str)] = &[
    ("1 year or less", "0-1 years"),
    ("2 - 4 years", "2-4 years"),
    ("5-7 years", "5-7 years"),
    ("8 - 10 years", "8-10 years"),
    ("11 - 20 years", "11-20 years"),
    ("21 - 30 years", "21-30 years"),
    ("31 - 40 years", "30-40 years"),
    ("41 years or more", "41+ years"),
];

pub const EXPERIENCE_DEFAULT: &str = "0-1 years";

/// State values that mean "no answer".
pub const STATE_NULL_MARKERS: &[&str] = &["0", "nan", "NaN", "None", "", "null"];

/// City values that mean "no answer" before the denylist is applied.
pub const CITY_NULL_MARKERS: &[&str] = &["", "nan", "None", "NaN"];

/// Placeholder answers that are not cities (matched lowercase).
pub const CITY_DENYLIST: &[&str] = &[
    "n/a",
    "na",
    "none",
    "no answer",
    "prefer not to answer",
    "undisclosed",
    "test",
    "remote",
    "work remotely",
    "telecommute",
    "virtual worker",
    "home worker",
    "student",
    "small city",
    "stay",
    "unknown",
    "remove",
    "dhgbfv",
    "pubw",
    "ff",
    "s",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        assert_eq!(lookup(COUNTRY_ALIASES, "usa"), Some("United States"));
        assert_eq!(lookup(COUNTRY_ALIASES, "USA"), None);
        assert_eq!(lookup(CURRENCY_CODES, "RMB"), Some(Some("CNY")));
        assert_eq!(lookup(CURRENCY_CODES, "0"), Some(None));
        assert_eq!(lookup(CURRENCY_CODES, "CHF"), None);
    }

    #[test]
    fn experience_tables_differ_only_in_the_thirties() {
        let diffs: Vec<_> = EXPERIENCE_RANGES
            .iter()
            .zip(OVERALL_EXPERIENCE_RANGES)
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(
            diffs,
            vec![(&("30 - 40 years", "30-40 years"), &("31 - 40 years", "30-40 years"))]
        );
    }

    #[test]
    fn tables_have_unique_keys() {
        fn assert_unique<T>(table: &[(&str, T)]) {
            let mut keys: Vec<_> = table.iter().map(|(k, _)| *k).collect();
            keys.sort_unstable();
            let before = keys.len();
            keys.dedup();
            assert_eq!(before, keys.len());
        }
        assert_unique(SENIORITY_LABELS);
        assert_unique(CURRENCY_CODES);
        assert_unique(COUNTRY_ALIASES);
        assert_unique(EXPERIENCE_RANGES);
        assert_unique(OVERALL_EXPERIENCE_RANGES);
    }
}
