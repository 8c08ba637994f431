//! Year extraction from free-form text

use once_cell::sync::Lazy;
use regex::Regex;

/// First run of four ASCII digits anywhere in the text
static FOUR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}").expect("four-digit pattern is valid"));

/// Standalone 19xx/20xx token, as found in inscriptions
static CENTURY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("century pattern is valid"));

/// Parse a year from raw text
///
/// Returns the first four consecutive digits as an integer. A longer digit
/// run yields its first four digits. No range check: "0000" parses to 0.
///
/// # Examples
/// ```
/// use plaques_core::year::parse_year;
///
/// assert_eq!(parse_year(Some("Est. 1923")), Some(1923));
/// assert_eq!(parse_year(Some("19")), None);
/// assert_eq!(parse_year(None), None);
/// ```
pub fn parse_year(raw: Option<&str>) -> Option<i32> {
    let raw = raw?;
    let found = FOUR_DIGITS.find(raw)?;
    found.as_str().parse().ok()
}

/// Year mentioned in an inscription, restricted to the 20th and 21st century
///
/// Birth years and other earlier dates in the text are ignored.
pub fn inscription_year(inscription: &str) -> Option<i32> {
    let found = CENTURY_TOKEN.find(inscription)?;
    parse_year(Some(found.as_str()))
}
