//! Field keys shared by the extraction and insertion sides.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known field keys, already normalized.
pub mod known {
    /// Line item serial number.
    pub const SERIAL_NUMBER: &str = "sno";
    /// Unit price column.
    pub const UNIT_PRICE: &str = "unitprice";
    /// Invoice number, echoed next to every unit price.
    pub const INVOICE_NUMBER: &str = "invoiceno";
    /// Goods description column.
    pub const DESCRIPTION: &str = "description";
    /// Duty debited; written as one summed value instead of a list.
    pub const SUMMED_DUTY: &str = "debitduty";
    /// Total duty; feeds the summary block.
    pub const TOTAL_DUTY: &str = "totalduty";

    /// Fields whose run values are reduced to digits, `.` and `-`.
    pub const NUMERIC: [&str; 7] = [
        SERIAL_NUMBER,
        UNIT_PRICE,
        "bcd",
        "sws",
        "igst",
        "assessvalue",
        TOTAL_DUTY,
    ];
}

/// Normalize a raw field key: trim, lowercase, drop all whitespace.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// A normalized field key.
///
/// Every constructor normalizes, so a key read from the rule mapping and the
/// same key read from the cell location map always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(raw: &str) -> Self {
        Self(normalize_key(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is the given well-known key.
    pub fn is(&self, known: &str) -> bool {
        self.0 == known
    }

    /// Keys containing "date" get date canonicalization.
    pub fn denotes_date(&self) -> bool {
        self.0.contains("date")
    }

    pub fn is_numeric(&self) -> bool {
        known::NUMERIC.contains(&self.0.as_str())
    }
}

impl From<&str> for FieldKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FieldKey {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        key.0
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
