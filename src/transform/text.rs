//! Shared text normalization helpers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Replace every run of whitespace with a single space. Does not trim.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").into_owned()
}

/// Collapse whitespace runs and trim both ends.
pub fn squish(s: &str) -> String {
    collapse_whitespace(s).trim().to_string()
}

/// `true` for empty or whitespace-only strings.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Title-case the way survey tooling does: the first cased character after any uncased
/// character is uppercased, every other cased character is lowercased.
///
/// Digits and apostrophes are uncased, so `"3rd st"` becomes `"3Rd St"` and `"o'fallon"`
/// becomes `"O'Fallon"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// Best-effort repair of UTF-8 text that was decoded as Latin-1.
///
/// Each maximal run of Latin-1 characters is re-encoded as Latin-1 and re-read as UTF-8; a run
/// is replaced only when that round trip succeeds. `"SÃ£o Paulo"` becomes `"São Paulo"`, and
/// `"SÃ£o Paulo – Centro"` becomes `"São Paulo – Centro"`. Correct text (including
/// `"São Paulo"` itself) is returned unchanged.
pub fn repair_latin1_mojibake(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }
    let is_latin1 = |c: char| u32::from(c) <= 0xFF;

    let mut out = String::with_capacity(s.len());
    let mut changed = false;
    let mut rest = s;
    while let Some(first) = rest.chars().next() {
        let latin1 = is_latin1(first);
        let end = rest.find(|c: char| is_latin1(c) != latin1).unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        match latin1.then(|| latin1_round_trip(run)).flatten() {
            Some(repaired) if repaired != run => {
                out.push_str(&repaired);
                changed = true;
            }
            _ => out.push_str(run),
        }
        rest = tail;
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(s)
    }
}

/// `run` read back as UTF-8 after encoding it as Latin-1, if those bytes are valid UTF-8.
fn latin1_round_trip(run: &str) -> Option<String> {
    let bytes = run
        .chars()
        .map(|c| u8::try_from(u32::from(c)))
        .collect::<Result<Vec<u8>, _>>()
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// Truncate to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
