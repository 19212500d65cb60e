//! Rule-driven field extraction from bill-of-entry workbooks.

pub mod aggregator;
pub mod classifier;
pub mod engine;
pub mod profile;
pub mod rules;

pub use aggregator::{ExtractionResult, ResultAggregator, SheetFieldValues, flatten};
pub use classifier::{Classification, Section, SectionClassifier};
pub use engine::RuleEngine;
pub use profile::{ExtractionProfile, ProfileSet};
pub use rules::Rule;

use crate::workbook::Workbook;

/// Trait for whole-workbook extractors.
pub trait RecordExtractor {
    /// Extract a section record from every sheet of the workbook.
    fn extract(&self, workbook: &Workbook) -> ExtractionResult;
}
