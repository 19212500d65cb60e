//! Configuration structures for the extraction and population pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::cell::CellRef;

/// Main configuration for the boemap pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoemapConfig {
    /// Input and output file locations.
    pub paths: PathConfig,

    /// Input workbook layout used for sheet classification.
    pub layout: LayoutConfig,

    /// Placement of the summary block in the output template.
    pub summary: SummaryConfig,
}

/// File locations for every stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Multi-sheet workbook converted from the bill of entry.
    pub workbook: PathBuf,

    /// Extraction rules, one section per profile.
    pub rule_mapping: PathBuf,

    /// Intermediate record written by extraction and read by population.
    pub record: PathBuf,

    /// Field key to template cell anchors.
    pub cell_locations: PathBuf,

    /// Fixed-layout output template.
    pub template: PathBuf,

    /// Destination of the populated template.
    pub output: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("Info/Data_Extracted/Extracted.xlsx"),
            rule_mapping: PathBuf::from("Info/Config/Mapping.ini"),
            record: PathBuf::from("Info/Config/output.ini"),
            cell_locations: PathBuf::from("Info/Config/Cell_Location.txt"),
            template: PathBuf::from("Info/Template/Template.xlsx"),
            output: PathBuf::from("Info/Output/Output.xlsx"),
        }
    }
}

/// Fixed cells of the input workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Cell holding each sheet's section title.
    pub title_cell: CellRef,

    /// Duties sheets with a value here use the extra-column profile.
    pub duties_marker_cell: CellRef,

    /// 1-based sheet ordinal that gets the primary invoice profile.
    pub primary_invoice_ordinal: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title_cell: CellRef::new(12, 1),        // A12
            duties_marker_cell: CellRef::new(32, 4), // D32
            primary_invoice_ordinal: 2,
        }
    }
}

/// Summary block placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Column of the summary values; labels go one column to the left.
    pub value_column: u32,

    /// Rows between the last line item number and the first summary row.
    pub row_offset: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            value_column: 15,
            row_offset: 10,
        }
    }
}

impl BoemapConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
