//! Intermediate record file: `[SECTION]` headers and `key = v1;v2;...` entries.

use std::fmt::Write;

use super::ini;
use crate::error::FormatError;
use crate::models::field::FieldKey;
use crate::models::record::SectionRecord;

/// Separator between the values of one key.
pub const VALUE_SEPARATOR: &str = ";";

impl SectionRecord {
    /// Parse a record file.
    ///
    /// Values are split on `;`, trimmed, and empty elements dropped. A key
    /// repeated within a section keeps the later line.
    pub fn parse_ini(text: &str) -> Result<SectionRecord, FormatError> {
        let mut record = SectionRecord::new();

        for section in ini::parse(text)? {
            for entry in section.entries {
                let values: Vec<String> = entry
                    .value
                    .split(VALUE_SEPARATOR)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect();
                record.insert(section.name, FieldKey::new(entry.key), values);
            }
        }

        Ok(record)
    }

    /// Render the record, one block per section followed by a blank line.
    pub fn to_ini(&self) -> String {
        let mut out = String::new();
        for section in self.sections() {
            let _ = writeln!(out, "[{}]", section.name);
            for field in &section.fields {
                let joined = field.values.join(VALUE_SEPARATOR);
                let _ = writeln!(out, "{} = {}", field.key, joined);
            }
            out.push('\n');
        }
        out
    }
}
