//! Cells to be written onto the output template.

use std::collections::BTreeMap;

use super::value::CellValue;

/// Green highlight used for the reconciliation row.
pub const HIGHLIGHT_FILL: u32 = 0x92D050;

/// Visual style of a template cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    /// Thin black border on all four sides.
    pub bordered: bool,
    /// Centered horizontally and vertically.
    pub centered: bool,
    /// Solid background fill, as 0xRRGGBB.
    pub fill: Option<u32>,
}

/// One cell of the template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateCell {
    pub value: CellValue,
    pub style: CellStyle,
    pub number_format: Option<String>,
}

impl TemplateCell {
    /// Apply the border and alignment every populated cell gets. Fill is kept.
    pub fn boxed(&mut self) -> &mut Self {
        self.style.bordered = true;
        self.style.centered = true;
        self
    }

    pub fn fill(&mut self, rgb: u32) -> &mut Self {
        self.style.fill = Some(rgb);
        self
    }
}

/// The cells populated on one template sheet, addressed by 1-based
/// (row, column).
///
/// An empty sheet name stands for the template's active sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateDocument {
    sheet_name: String,
    cells: BTreeMap<(u32, u32), TemplateCell>,
}

impl TemplateDocument {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&TemplateCell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    pub fn cell_mut(&mut self, row: u32, col: u32) -> &mut TemplateCell {
        self.cells.entry((row, col)).or_default()
    }

    /// Set a cell's value, keeping its existing style and number format.
    pub fn write(&mut self, row: u32, col: u32, value: CellValue) -> &mut TemplateCell {
        let cell = self.cell_mut(row, col);
        cell.value = value;
        cell
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &TemplateCell)> {
        self.cells.iter().map(|(&(row, col), cell)| (row, col, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
