//! Cell coordinates and input cell contents.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::WorkbookError;

/// Largest row index accepted by xlsx.
pub const MAX_ROW: u32 = 1_048_576;
/// Largest column index accepted by xlsx (XFD).
pub const MAX_COL: u32 = 16_384;

/// A 1-based (row, column) cell coordinate.
///
/// Ordering is row-major, which is also the order cells are exported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse A1 notation (`A12`, `AB7`). Letters must be uppercase.
    pub fn parse(a1: &str) -> Option<Self> {
        let a1 = a1.trim();
        let split = a1.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = a1.split_at(split);
        let col = column_index(letters)?;
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let row: u32 = digits.parse().ok()?;
        if row == 0 || row > MAX_ROW {
            return None;
        }
        Some(Self { row, col })
    }

    /// The cell `rows` below this one.
    pub fn down(self, rows: u32) -> Option<Self> {
        let row = self.row.checked_add(rows)?;
        (row <= MAX_ROW).then_some(Self { row, col: self.col })
    }

    pub fn to_a1(&self) -> String {
        format!("{}{}", column_letters(self.col), self.row)
    }
}

/// Convert uppercase column letters to a 1-based index (A=1, Z=26, AA=27).
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (ch as u32 - 'A' as u32 + 1);
    }
    (col <= MAX_COL).then_some(col)
}

/// Convert a 1-based column index to letters.
pub fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

impl FromStr for CellRef {
    type Err = WorkbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| WorkbookError::InvalidCoordinate(s.to_string()))
    }
}

impl TryFrom<String> for CellRef {
    type Error = WorkbookError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.to_a1()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// The contents of one input sheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellData {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl CellData {
    /// Absent, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellData::Empty => true,
            CellData::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellData::Empty => Ok(()),
            CellData::Text(s) => f.write_str(s),
            CellData::Int(n) => write!(f, "{}", n),
            // Integral floats print without decimals
            CellData::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellData::Float(n) => write!(f, "{}", n),
            CellData::Bool(true) => f.write_str("TRUE"),
            CellData::Bool(false) => f.write_str("FALSE"),
            CellData::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellData {
    fn from(s: &str) -> Self {
        CellData::Text(s.to_string())
    }
}

impl From<String> for CellData {
    fn from(s: String) -> Self {
        CellData::Text(s)
    }
}

impl From<i64> for CellData {
    fn from(n: i64) -> Self {
        CellData::Int(n)
    }
}

impl From<f64> for CellData {
    fn from(n: f64) -> Self {
        CellData::Float(n)
    }
}

impl From<NaiveDate> for CellData {
    fn from(date: NaiveDate) -> Self {
        CellData::Date(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for CellData {
    fn from(dt: NaiveDateTime) -> Self {
        CellData::Date(dt)
    }
}
