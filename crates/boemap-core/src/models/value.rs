//! Output cell values and the conversions applied when binding.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

/// A value written into the output template.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Integer(i64),
    Decimal(Decimal),
    /// Approximate number: a summation that fell back from exact decimals,
    /// or a numeric cell read back from a template.
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Convert one record entry.
    ///
    /// Without a `.` the entry must parse as an integer, with one it must parse
    /// as an exact decimal; anything else is kept as text.
    pub fn from_entry(entry: &str) -> Self {
        let entry = entry.trim();
        if !entry.contains('.') {
            match entry.parse::<i64>() {
                Ok(n) => CellValue::Integer(n),
                Err(_) => CellValue::Text(entry.to_string()),
            }
        } else {
            match Decimal::from_str(entry) {
                Ok(d) => CellValue::Decimal(d),
                Err(_) => CellValue::Text(entry.to_string()),
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Integer(_) | CellValue::Decimal(_) | CellValue::Float(_)
        )
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Decimal(d) => d.to_f64(),
            CellValue::Float(f) => Some(*f),
            CellValue::Empty | CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Number format reproducing the decimal places written in `entry`.
///
/// `"100.50"` gives `0.00` and `"5."` gives `0.`; entries without a `.`
/// give `None`.
pub fn decimal_format(entry: &str) -> Option<String> {
    let (_, fraction) = entry.trim().split_once('.')?;
    let places = fraction.split('.').next().unwrap_or("").chars().count();
    Some(format!("0.{}", "0".repeat(places)))
}

/// Sum record entries as exact decimals.
///
/// If any entry is not an exact decimal the whole sum is recomputed in
/// floating point; entries that parse neither way are skipped.
pub fn sum_entries<S: AsRef<str>>(entries: &[S]) -> CellValue {
    let parts: Vec<&str> = entries
        .iter()
        .map(|e| e.as_ref().trim())
        .filter(|e| !e.is_empty())
        .collect();

    let exact = parts.iter().try_fold(Decimal::ZERO, |acc, part| {
        Decimal::from_str(part).ok().and_then(|d| acc.checked_add(d))
    });
    if let Some(total) = exact {
        return CellValue::Decimal(total);
    }

    let mut total = 0.0f64;
    for part in parts {
        match part.parse::<f64>() {
            Ok(n) => total += n,
            Err(_) => warn!("Skipping non-numeric value {:?} in summation", part),
        }
    }
    CellValue::Float(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_entry() {
        assert_eq!(CellValue::from_entry("10"), CellValue::Integer(10));
        assert_eq!(CellValue::from_entry(" -7 "), CellValue::Integer(-7));
        assert_eq!(CellValue::from_entry("12.50"), CellValue::Decimal(dec("12.50")));
        assert_eq!(CellValue::from_entry("INV-99"), CellValue::Text("INV-99".into()));
        assert_eq!(CellValue::from_entry("1.2.3"), CellValue::Text("1.2.3".into()));
    }

    #[test]
    fn test_decimal_format() {
        assert_eq!(decimal_format("100.50"), Some("0.00".to_string()));
        assert_eq!(decimal_format("3.125"), Some("0.000".to_string()));
        assert_eq!(decimal_format("100"), None);
        assert_eq!(decimal_format("5."), Some("0.".to_string()));
    }

    #[test]
    fn test_sum_exact() {
        let total = sum_entries(&["100.50", "200.25"]);
        assert_eq!(total, CellValue::Decimal(dec("300.75")));
        assert_eq!(total.to_string(), "300.75");
    }

    #[test]
    fn test_sum_float_fallback() {
        let total = sum_entries(&["1e2", "0.5"]);
        assert_eq!(total, CellValue::Float(100.5));
    }

    #[test]
    fn test_sum_skips_garbage() {
        assert_eq!(sum_entries(&["1e1", "abc", "2"]), CellValue::Float(12.0));
        assert_eq!(sum_entries::<&str>(&[]), CellValue::Decimal(Decimal::ZERO));
    }
}
