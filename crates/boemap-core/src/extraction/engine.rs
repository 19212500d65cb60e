//! Applies extraction rules to worksheet cells.

use tracing::{debug, trace};

use super::rules::Rule;
use super::rules::normalize::{
    canonicalize_date, clean_numeric, collapse_whitespace, strip_description_marker,
};
use crate::models::cell::CellRef;
use crate::models::field::{FieldKey, known};
use crate::workbook::Worksheet;

/// Interprets [`Rule`]s against one worksheet at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Read the values `rule` selects for `key`.
    ///
    /// Single cells always yield one element (empty text for absent cells).
    /// Runs stop at the first cell that is absent or blank after trimming.
    pub fn extract(&self, sheet: &Worksheet, rule: &Rule, key: &FieldKey) -> Vec<String> {
        let values = match *rule {
            Rule::SingleCell(at) => vec![self.single(sheet, at, key)],
            Rule::ColumnRun { column, start_row } => {
                walk(sheet, CellRef::new(start_row, column), 1)
                    .map(|text| normalize_run_entry(&text, key))
                    .collect()
            }
            Rule::SteppedColumn {
                column,
                start_row,
                step,
            } => walk(sheet, CellRef::new(start_row, column), step)
                .map(|text| clean_numeric(&text))
                .collect(),
        };

        trace!(
            "{} {} on '{}' -> {} values",
            key,
            rule,
            sheet.name(),
            values.len()
        );
        values
    }

    /// Parse `rule_text` and extract in one call.
    ///
    /// An unrecognized rule yields no values.
    pub fn extract_text(&self, sheet: &Worksheet, rule_text: &str, key: &FieldKey) -> Vec<String> {
        match rule_text.parse::<Rule>() {
            Ok(rule) => self.extract(sheet, &rule, key),
            Err(e) => {
                debug!("{}: {}", key, e);
                Vec::new()
            }
        }
    }

    fn single(&self, sheet: &Worksheet, at: CellRef, key: &FieldKey) -> String {
        let cell = sheet.cell(at);
        if key.denotes_date() {
            canonicalize_date(cell)
        } else {
            cell.to_string()
        }
    }
}

/// Cell texts from `start` downward in strides of `step`, up to the first blank.
fn walk(sheet: &Worksheet, start: CellRef, step: u32) -> impl Iterator<Item = String> + '_ {
    std::iter::successors(Some(start), move |at| at.down(step))
        .map(|at| sheet.cell(at))
        .take_while(|cell| !cell.is_blank())
        .map(|cell| cell.to_string())
}

fn normalize_run_entry(text: &str, key: &FieldKey) -> String {
    let collapsed = collapse_whitespace(text);
    if key.is(known::DESCRIPTION) {
        strip_description_marker(&collapsed).to_string()
    } else if key.is_numeric() {
        clean_numeric(&collapsed)
    } else {
        collapsed
    }
}
