//! Extraction rules and the value normalizers they use.

pub mod normalize;
pub mod patterns;

pub use normalize::{canonicalize_date, canonicalize_date_text, clean_numeric};

use std::fmt;
use std::str::FromStr;

use regex::Captures;

use crate::error::RuleError;
use crate::models::cell::{CellRef, MAX_ROW, column_index, column_letters};
use patterns::{COLUMN_RUN, SINGLE_CELL, STEPPED_COLUMN};

/// How one field's values are read from a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// One cell: `T4`.
    SingleCell(CellRef),
    /// Down a column until the first blank cell: `F38+`.
    ColumnRun { column: u32, start_row: u32 },
    /// Every `step` rows until the first blank cell: `D24:step20`.
    SteppedColumn { column: u32, start_row: u32, step: u32 },
}

impl Rule {
    /// The first cell the rule reads.
    pub fn anchor(&self) -> CellRef {
        match *self {
            Rule::SingleCell(cell) => cell,
            Rule::ColumnRun { column, start_row } => CellRef::new(start_row, column),
            Rule::SteppedColumn { column, start_row, .. } => CellRef::new(start_row, column),
        }
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    /// Shapes are tried in a fixed order: single cell, stepped, run.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule_text = s.trim();
        let unrecognized = || RuleError::Unrecognized(s.to_string());

        if let Some(caps) = SINGLE_CELL.captures(rule_text) {
            let anchor = anchor(&caps).ok_or_else(unrecognized)?;
            return Ok(Rule::SingleCell(anchor));
        }

        if let Some(caps) = STEPPED_COLUMN.captures(rule_text) {
            let anchor = anchor(&caps).ok_or_else(unrecognized)?;
            let step: u32 = caps[3].parse().map_err(|_| unrecognized())?;
            if step == 0 {
                return Err(unrecognized());
            }
            return Ok(Rule::SteppedColumn {
                column: anchor.col,
                start_row: anchor.row,
                step,
            });
        }

        if let Some(caps) = COLUMN_RUN.captures(rule_text) {
            let anchor = anchor(&caps).ok_or_else(unrecognized)?;
            return Ok(Rule::ColumnRun {
                column: anchor.col,
                start_row: anchor.row,
            });
        }

        Err(unrecognized())
    }
}

fn anchor(caps: &Captures<'_>) -> Option<CellRef> {
    let col = column_index(&caps[1])?;
    let row: u32 = caps[2].parse().ok()?;
    (1..=MAX_ROW)
        .contains(&row)
        .then(|| CellRef::new(row, col))
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Rule::SingleCell(cell) => write!(f, "{}", cell),
            Rule::ColumnRun { column, start_row } => {
                write!(f, "{}{}+", column_letters(column), start_row)
            }
            Rule::SteppedColumn { column, start_row, step } => {
                write!(f, "{}{}:step{}", column_letters(column), start_row, step)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_cell() {
        assert_eq!("T4".parse(), Ok(Rule::SingleCell(CellRef::new(4, 20))));
        assert_eq!(" D14 ".parse(), Ok(Rule::SingleCell(CellRef::new(14, 4))));
    }

    #[test]
    fn test_parse_column_run() {
        assert_eq!(
            "F38+".parse(),
            Ok(Rule::ColumnRun { column: 6, start_row: 38 })
        );
    }

    #[test]
    fn test_parse_stepped_column() {
        assert_eq!(
            "D24:step20".parse(),
            Ok(Rule::SteppedColumn { column: 4, start_row: 24, step: 20 })
        );
    }

    #[test]
    fn test_parse_unrecognized() {
        for rule_text in ["", "f38+", "D24:step0", "A0", "D24:stepx", "F38++", "38F"] {
            assert_eq!(
                rule_text.parse::<Rule>(),
                Err(RuleError::Unrecognized(rule_text.to_string())),
                "{rule_text:?}"
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for rule_text in ["T4", "F38+", "D24:step20", "AB100+"] {
            let rule: Rule = rule_text.parse().unwrap();
            assert_eq!(rule.to_string(), rule_text);
        }
    }

    #[test]
    fn test_anchor() {
        let rule: Rule = "D24:step20".parse().unwrap();
        assert_eq!(rule.anchor(), CellRef::new(24, 4));
    }
}
