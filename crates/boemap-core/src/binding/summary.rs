//! The duty reconciliation block written below the line items.

use tracing::warn;

use crate::error::{BoemapError, Result, WorkbookError};
use crate::models::cell::MAX_ROW;
use crate::models::config::SummaryConfig;
use crate::models::field::known;
use crate::models::record::MergedRecord;
use crate::models::template::{HIGHLIGHT_FILL, TemplateDocument};
use crate::models::value::{CellValue, sum_entries};

/// One label/value row of the block.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: CellValue,
    pub highlighted: bool,
}

/// The computed block and where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBlock {
    pub anchor_row: u32,
    pub label_column: u32,
    pub value_column: u32,
    pub rows: Vec<SummaryRow>,
}

const SUMMARY_ROWS: u32 = 4;

/// Derives and writes the summary block.
#[derive(Debug, Clone)]
pub struct SummaryComputer {
    value_column: u32,
    row_offset: u32,
}

impl SummaryComputer {
    pub fn new(config: &SummaryConfig) -> Result<Self> {
        if config.value_column < 2 {
            return Err(BoemapError::Config(format!(
                "summary value column must leave room for labels, got {}",
                config.value_column
            )));
        }
        Ok(Self {
            value_column: config.value_column,
            row_offset: config.row_offset,
        })
    }

    /// The last entry of the serial number list made only of digits, or 0.
    pub fn last_serial(record: &MergedRecord) -> u64 {
        record
            .get(known::SERIAL_NUMBER)
            .unwrap_or_default()
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|s| s.parse().ok())
            .last()
            .unwrap_or(0)
    }

    /// The whole block must fit on the sheet, so the anchor row is limited
    /// to [`MAX_ROW`] less the rows below it.
    pub fn compute(&self, record: &MergedRecord) -> Result<SummaryBlock> {
        let last = Self::last_serial(record);
        let anchor_row = last
            .checked_add(u64::from(self.row_offset))
            .and_then(|row| u32::try_from(row).ok())
            .filter(|row| (1..=MAX_ROW - (SUMMARY_ROWS - 1)).contains(row))
            .ok_or_else(|| {
                WorkbookError::InvalidCoordinate(format!(
                    "summary row for serial {} + {}",
                    last, self.row_offset
                ))
            })?;

        let total_duty = match record.get(known::TOTAL_DUTY) {
            Some(values) => sum_entries(values),
            None => sum_entries(&["0"]),
        };

        Ok(SummaryBlock {
            anchor_row,
            label_column: self.value_column - 1,
            value_column: self.value_column,
            rows: vec![
                SummaryRow { label: "Total Duty", value: total_duty, highlighted: false },
                SummaryRow { label: "License", value: CellValue::Integer(0), highlighted: false },
                SummaryRow {
                    label: "As per BE Duty Amount",
                    value: CellValue::Integer(0),
                    highlighted: false,
                },
                SummaryRow {
                    label: "Diff should be Nil",
                    value: CellValue::Integer(0),
                    highlighted: true,
                },
            ],
        })
    }

    /// Write a computed block; returns the number of cells written.
    pub fn write(&self, block: &SummaryBlock, doc: &mut TemplateDocument) -> usize {
        let mut written = 0;
        for (i, item) in block.rows.iter().enumerate() {
            let Some(row) = u32::try_from(i).ok().and_then(|i| block.anchor_row.checked_add(i))
            else {
                warn!("Summary row {} below row {} is out of range", i, block.anchor_row);
                break;
            };
            let label = doc.write(row, block.label_column, CellValue::Text(item.label.to_string()));
            label.boxed();
            if item.highlighted {
                label.fill(HIGHLIGHT_FILL);
            }

            let value = doc.write(row, block.value_column, item.value.clone());
            value.boxed();
            if item.highlighted {
                value.fill(HIGHLIGHT_FILL);
            }
            written += 2;
        }
        written
    }
}

impl Default for SummaryComputer {
    fn default() -> Self {
        let config = SummaryConfig::default();
        Self {
            value_column: config.value_column,
            row_offset: config.row_offset,
        }
    }
}
