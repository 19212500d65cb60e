//! Cell location file: one `key = (row,col)` anchor per line.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FormatError;
use crate::models::cell::{MAX_COL, MAX_ROW};
use crate::models::field::FieldKey;
use crate::models::location::CellLocationMap;

lazy_static! {
    /// `(row,col)`, parentheses optional.
    static ref CELL_LOCATION: Regex = Regex::new(r"^\(?\s*(\d+)\s*,\s*(\d+)\s*\)?$").unwrap();
}

impl CellLocationMap {
    /// Parse a cell location file.
    ///
    /// Lines without `=` and `#` comments are ignored. A key may appear on
    /// several lines; each adds an anchor.
    pub fn parse(text: &str) -> Result<CellLocationMap, FormatError> {
        let mut map = CellLocationMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            if raw.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, coordinate)) = raw.split_once('=') else {
                continue;
            };

            let (row, col) =
                parse_coordinate(coordinate.trim()).ok_or_else(|| FormatError::CellLocation {
                    line,
                    text: coordinate.trim().to_string(),
                })?;
            map.add(FieldKey::new(key), row, col);
        }

        Ok(map)
    }
}

fn parse_coordinate(text: &str) -> Option<(u32, u32)> {
    let caps = CELL_LOCATION.captures(text)?;
    let row: u32 = caps[1].parse().ok()?;
    let col: u32 = caps[2].parse().ok()?;
    ((1..=MAX_ROW).contains(&row) && (1..=MAX_COL).contains(&col)).then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_locations() {
        let text = "S No = (5,1)\nUnit Price = (5, 3)\nDebit Duty = 40,9\ndebitduty = (41,9)\n\nheader line\n";
        let map = CellLocationMap::parse(text).unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.anchors("sno"), Some(&[(5, 1)][..]));
        assert_eq!(map.anchors("unitprice"), Some(&[(5, 3)][..]));
        assert_eq!(map.anchors("debitduty"), Some(&[(40, 9), (41, 9)][..]));
    }

    #[test]
    fn test_malformed_coordinate_names_line() {
        let result = CellLocationMap::parse("sno = (5,1)\n\nunitprice = (five,3)\n");
        assert_eq!(
            result,
            Err(FormatError::CellLocation {
                line: 3,
                text: "(five,3)".to_string()
            })
        );
    }

    #[test]
    fn test_zero_coordinate_rejected() {
        assert!(CellLocationMap::parse("sno = (0,1)").is_err());
    }

    #[test]
    fn test_comments_ignored() {
        let map = CellLocationMap::parse("# sno = (1,1)\nsno = (2,1)").unwrap();
        assert_eq!(map.anchors("sno"), Some(&[(2, 1)][..]));
    }
}
