//! The two stage entry points: workbook to record, record to template.

use tracing::info;

use crate::binding::{SummaryBlock, SummaryComputer, TemplateBinder};
use crate::error::{BoemapError, Result};
use crate::extraction::{ExtractionResult, ProfileSet, ResultAggregator, SectionClassifier};
use crate::models::config::{LayoutConfig, SummaryConfig};
use crate::models::location::CellLocationMap;
use crate::models::record::SectionRecord;
use crate::models::template::TemplateDocument;
use crate::workbook::Workbook;

/// Outcome of populating a template.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulateReport {
    /// Cells written by the binder, excluding the summary block.
    pub cells_written: usize,
    pub summary: SummaryBlock,
}

/// Run the extraction pass over every sheet of `workbook`.
pub fn extract_record(
    workbook: &Workbook,
    profiles: &ProfileSet,
    layout: &LayoutConfig,
) -> ExtractionResult {
    ResultAggregator::new(profiles)
        .with_classifier(SectionClassifier::new(layout))
        .aggregate(workbook)
}

/// Bind `record` onto `doc` and append the summary block.
///
/// Fails without touching `doc` when the record holds no values or the
/// summary block would fall off the sheet.
pub fn populate_template(
    record: &SectionRecord,
    locations: &CellLocationMap,
    summary: &SummaryConfig,
    doc: &mut TemplateDocument,
) -> Result<PopulateReport> {
    let merged = record.merged();
    if merged.is_empty() {
        return Err(BoemapError::NoRecordData);
    }

    let computer = SummaryComputer::new(summary)?;
    let block = computer.compute(&merged)?;
    let cells_written = TemplateBinder::new(locations).bind(&merged, doc);
    computer.write(&block, doc);

    info!(
        "Populated {} cells from {} keys, summary at row {}",
        cells_written,
        merged.len(),
        block.anchor_row
    );

    Ok(PopulateReport {
        cells_written,
        summary: block,
    })
}
