//! Input workbook model and spreadsheet file adapters.

#[cfg(feature = "xlsx")]
pub mod xlsx;

use std::collections::HashMap;

use crate::models::cell::{CellData, CellRef};

static EMPTY: CellData = CellData::Empty;

/// One sheet of the input workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    name: String,
    cells: HashMap<CellRef, CellData>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell contents; cells never set read as [`CellData::Empty`].
    pub fn cell(&self, at: CellRef) -> &CellData {
        self.cells.get(&at).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, at: CellRef, value: impl Into<CellData>) {
        let value = value.into();
        if value == CellData::Empty {
            self.cells.remove(&at);
        } else {
            self.cells.insert(at, value);
        }
    }

    pub fn with_cell(mut self, at: CellRef, value: impl Into<CellData>) -> Self {
        self.set(at, value);
        self
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The input document: sheets in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sheet: Worksheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl From<Vec<Worksheet>> for Workbook {
    fn from(sheets: Vec<Worksheet>) -> Self {
        Self { sheets }
    }
}

impl FromIterator<Worksheet> for Workbook {
    fn from_iter<I: IntoIterator<Item = Worksheet>>(iter: I) -> Self {
        Self {
            sheets: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_cells_are_empty() {
        let sheet = Worksheet::new("Page_1").with_cell(CellRef::new(1, 1), "x");
        assert_eq!(sheet.cell(CellRef::new(1, 1)), &CellData::from("x"));
        assert_eq!(sheet.cell(CellRef::new(9, 9)), &CellData::Empty);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_sheet_order_preserved() {
        let workbook: Workbook = ["Page_1", "Page_2", "Page_3"]
            .into_iter()
            .map(Worksheet::new)
            .collect();
        let names: Vec<&str> = workbook.sheets().iter().map(Worksheet::name).collect();
        assert_eq!(names, vec!["Page_1", "Page_2", "Page_3"]);
        assert!(workbook.sheet("Page_2").is_some());
    }
}
