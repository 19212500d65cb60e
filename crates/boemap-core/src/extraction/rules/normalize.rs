//! Value normalization for extracted cells.

use chrono::NaiveDate;

use super::patterns::WHITESPACE_RUN;
use crate::models::cell::CellData;

/// Input date patterns, tried in order.
pub const DATE_INPUT_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%b-%y", "%d-%b-%Y", "%d-%m-%Y"];

/// The single canonical output pattern.
pub const DATE_OUTPUT_FORMAT: &str = "%d-%m-%Y";

/// Keep only digits, `.` and `-`.
///
/// The result is not guaranteed to parse as a number.
pub fn clean_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Canonicalize a date cell to `DD-MM-YYYY`.
///
/// Structured dates are formatted directly. Text is tried against
/// [`DATE_INPUT_FORMATS`] and returned unchanged when nothing matches.
pub fn canonicalize_date(raw: &CellData) -> String {
    match raw {
        CellData::Date(dt) => dt.format(DATE_OUTPUT_FORMAT).to_string(),
        CellData::Text(text) => canonicalize_date_text(text),
        other => other.to_string(),
    }
}

pub fn canonicalize_date_text(text: &str) -> String {
    let trimmed = text.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.format(DATE_OUTPUT_FORMAT).to_string())
        .unwrap_or_else(|| text.to_string())
}

/// Collapse whitespace runs (newlines included) to single spaces and trim.
pub fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Drop a leading lone `S` token ("S Widget" becomes "Widget").
///
/// Bill-of-entry description columns carry this marker; other text is
/// returned unchanged.
pub fn strip_description_marker(text: &str) -> &str {
    match text.split_once(' ') {
        Some((first, rest)) if first.eq_ignore_ascii_case("s") => rest,
        _ => text,
    }
}
