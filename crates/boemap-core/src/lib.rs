//! Core library for bill-of-entry workbook processing.
//!
//! This crate provides:
//! - A small per-field rule language read against worksheet cells
//! - Section classification of input sheets by their title cell
//! - Per-section merging of extracted values into a record
//! - Template population with row expansion, duty summation and a summary block
//! - Text codecs for the rule mapping, record and cell location files
//! - XLSX import and in-place template population (feature `xlsx`)

pub mod binding;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod models;
pub mod pipeline;
pub mod workbook;

pub use binding::{SummaryBlock, SummaryComputer, TemplateBinder};
pub use error::{BoemapError, Result};
pub use extraction::{
    ExtractionProfile, ExtractionResult, ProfileSet, RecordExtractor, ResultAggregator, Rule,
    RuleEngine, Section, SectionClassifier,
};
pub use models::{
    BoemapConfig, CellData, CellLocationMap, CellRef, CellValue, FieldKey, MergedRecord,
    SectionRecord, TemplateDocument,
};
pub use pipeline::{PopulateReport, extract_record, populate_template};
pub use workbook::{Workbook, Worksheet};

#[cfg(feature = "xlsx")]
pub use workbook::xlsx::{read_workbook, write_template};
