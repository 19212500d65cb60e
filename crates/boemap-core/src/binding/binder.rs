//! Writes merged record values onto template anchors.

use tracing::{debug, warn};

use crate::models::field::{FieldKey, known};
use crate::models::location::CellLocationMap;
use crate::models::record::MergedRecord;
use crate::models::template::TemplateDocument;
use crate::models::value::{CellValue, decimal_format, sum_entries};

/// Projects a [`MergedRecord`] onto a template through a [`CellLocationMap`].
#[derive(Debug, Clone, Copy)]
pub struct TemplateBinder<'a> {
    locations: &'a CellLocationMap,
}

impl<'a> TemplateBinder<'a> {
    pub fn new(locations: &'a CellLocationMap) -> Self {
        Self { locations }
    }

    /// Write every located key that has values. Returns the number of cells written.
    ///
    /// Multi-value keys expand downward from each anchor. The summed duty key
    /// writes one total at every anchor instead.
    pub fn bind(&self, record: &MergedRecord, doc: &mut TemplateDocument) -> usize {
        let mut written = 0;

        for (key, anchors) in self.locations.iter() {
            let Some(values) = record.get(key.as_str()) else {
                debug!("No values for {}", key);
                continue;
            };

            written += if key.is(known::SUMMED_DUTY) {
                write_sum(doc, values, anchors)
            } else {
                let echo = if key.is(known::UNIT_PRICE) {
                    record.get(known::INVOICE_NUMBER).map(|inv| inv.join(";"))
                } else {
                    None
                };
                anchors
                    .iter()
                    .map(|&(row, col)| write_expanded(doc, key, values, row, col, echo.as_deref()))
                    .sum()
            };
        }

        debug!("Bound {} cells", written);
        written
    }
}

fn write_sum(doc: &mut TemplateDocument, values: &[String], anchors: &[(u32, u32)]) -> usize {
    let total = sum_entries(values);
    let format = values.first().and_then(|first| decimal_format(first));

    for &(row, col) in anchors {
        let cell = doc.write(row, col, total.clone());
        cell.boxed();
        if format.is_some() {
            cell.number_format = format.clone();
        }
    }
    anchors.len()
}

fn write_expanded(
    doc: &mut TemplateDocument,
    key: &FieldKey,
    values: &[String],
    row: u32,
    col: u32,
    echo: Option<&str>,
) -> usize {
    let mut written = 0;

    for (i, entry) in values.iter().enumerate() {
        let Some(target) = u32::try_from(i).ok().and_then(|i| row.checked_add(i)) else {
            warn!("{}: entry {} below ({}, {}) is out of range", key, i, row, col);
            break;
        };

        let value = CellValue::from_entry(entry);
        let format = match value {
            CellValue::Decimal(_) => decimal_format(entry),
            _ => None,
        };
        let cell = doc.write(target, col, value);
        cell.boxed();
        if format.is_some() {
            cell.number_format = format;
        }
        written += 1;

        if let (Some(invoice), Some(next)) = (echo, col.checked_add(1)) {
            doc.write(target, next, CellValue::Text(invoice.to_string())).boxed();
            written += 1;
        }
    }

    written
}
