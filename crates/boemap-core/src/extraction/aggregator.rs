//! Runs profiles over every sheet and merges the results per section.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::classifier::{Classification, Section, SectionClassifier};
use super::engine::RuleEngine;
use super::profile::ProfileSet;
use super::RecordExtractor;
use crate::formats::VALUE_SEPARATOR;
use crate::models::field::FieldKey;
use crate::models::record::SectionRecord;
use crate::workbook::{Workbook, Worksheet};

/// Result of an extraction pass over a workbook.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Flattened values per section.
    pub record: SectionRecord,
    /// One entry per skipped sheet.
    pub warnings: Vec<String>,
    /// Sheets that were classified and extracted.
    pub sheets_processed: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Values extracted from one sheet, in profile order.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetFieldValues {
    pub sheet: String,
    pub classification: Classification,
    pub fields: Vec<(FieldKey, Vec<String>)>,
}

/// Classifies sheets, applies their profile and accumulates per-section lists.
#[derive(Debug, Clone)]
pub struct ResultAggregator<'a> {
    profiles: &'a ProfileSet,
    classifier: SectionClassifier,
    engine: RuleEngine,
}

impl<'a> ResultAggregator<'a> {
    pub fn new(profiles: &'a ProfileSet) -> Self {
        Self {
            profiles,
            classifier: SectionClassifier::default(),
            engine: RuleEngine::new(),
        }
    }

    pub fn with_classifier(mut self, classifier: SectionClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Classify one sheet and run its profile.
    ///
    /// Fields whose rule produced nothing are left out.
    pub fn extract_sheet(&self, sheet: &Worksheet, ordinal: usize) -> Option<SheetFieldValues> {
        let classification = self.classifier.classify(sheet, ordinal, self.profiles)?;
        let profile = self.profiles.get(classification.profile)?;

        let fields = profile
            .rules()
            .map(|(key, rule)| (key.clone(), self.engine.extract(sheet, rule, key)))
            .filter(|(_, values)| !values.is_empty())
            .collect();

        Some(SheetFieldValues {
            sheet: sheet.name().to_string(),
            classification,
            fields,
        })
    }

    /// Extract every sheet in order and flatten the results.
    pub fn aggregate(&self, workbook: &Workbook) -> ExtractionResult {
        let start = Instant::now();
        let mut accumulator = SectionAccumulator::default();
        let mut warnings = Vec::new();
        let mut sheets_processed = 0;

        for (idx, sheet) in workbook.sheets().iter().enumerate() {
            let ordinal = idx + 1;
            let Some(values) = self.extract_sheet(sheet, ordinal) else {
                let message = format!(
                    "Skipping {}, no mapping for title: {}",
                    sheet.name(),
                    self.classifier.title(sheet)
                );
                warn!("{}", message);
                warnings.push(message);
                continue;
            };

            debug!(
                "Sheet {} '{}' -> {} via {} ({} fields)",
                ordinal,
                values.sheet,
                values.classification.section,
                values.classification.profile,
                values.fields.len()
            );
            accumulator.absorb(values);
            sheets_processed += 1;
        }

        let record = accumulator.into_record();
        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} fields in {} sections from {} of {} sheets in {}ms",
            record.field_count(),
            record.sections().len(),
            sheets_processed,
            workbook.len(),
            processing_time_ms
        );

        ExtractionResult {
            record,
            warnings,
            sheets_processed,
            processing_time_ms,
        }
    }
}

impl RecordExtractor for ResultAggregator<'_> {
    fn extract(&self, workbook: &Workbook) -> ExtractionResult {
        self.aggregate(workbook)
    }
}

/// Concatenate appended sequences in order, dropping blank entries.
///
/// Entries are split on [`VALUE_SEPARATOR`] and trimmed first, so the result
/// is exactly what the record file reads back.
pub fn flatten(appended: &[Vec<String>]) -> Vec<String> {
    appended
        .iter()
        .flatten()
        .flat_map(|entry| entry.split(VALUE_SEPARATOR))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sequences appended per section and key, in first-seen order.
#[derive(Debug, Default)]
struct SectionAccumulator {
    sections: Vec<(Section, Vec<(FieldKey, Vec<Vec<String>>)>)>,
}

impl SectionAccumulator {
    fn absorb(&mut self, values: SheetFieldValues) {
        let section = values.classification.section;
        let index = match self.sections.iter().position(|(s, _)| *s == section) {
            Some(i) => i,
            None => {
                self.sections.push((section, Vec::new()));
                self.sections.len() - 1
            }
        };
        let fields = &mut self.sections[index].1;

        for (key, sequence) in values.fields {
            match fields.iter_mut().find(|(k, _)| *k == key) {
                Some((_, appended)) => appended.push(sequence),
                None => fields.push((key, vec![sequence])),
            }
        }
    }

    fn into_record(self) -> SectionRecord {
        let mut record = SectionRecord::new();
        for (section, fields) in self.sections {
            for (key, appended) in fields {
                record.insert(section.name(), key, flatten(&appended));
            }
        }
        record
    }
}
