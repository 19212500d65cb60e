//! The section-keyed record produced by extraction and consumed by binding.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::field::{FieldKey, normalize_key};

/// One field's flattened values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub key: FieldKey,
    pub values: Vec<String>,
}

/// One logical section of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub name: String,
    pub fields: Vec<FieldEntry>,
}

impl SectionEntry {
    /// Values of `key`, which is normalized before the lookup.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        let key = normalize_key(key);
        self.fields
            .iter()
            .find(|f| f.key.as_str() == key)
            .map(|f| f.values.as_slice())
    }
}

/// Section name to field key to flattened value list.
///
/// Sections keep the order they were first seen in, fields keep their
/// insertion order within a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    sections: Vec<SectionEntry>,
}

impl SectionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values of `key` in `section`, replacing any earlier list.
    ///
    /// Empty lists are ignored so that absent data never shows up as a key.
    pub fn insert(&mut self, section: &str, key: FieldKey, values: Vec<String>) {
        if values.is_empty() {
            return;
        }

        let index = match self.sections.iter().position(|s| s.name == section) {
            Some(i) => i,
            None => {
                self.sections.push(SectionEntry {
                    name: section.to_string(),
                    fields: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        let entry = &mut self.sections[index];

        match entry.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.values = values,
            None => entry.fields.push(FieldEntry { key, values }),
        }
    }

    pub fn sections(&self) -> &[SectionEntry] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SectionEntry> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&[String]> {
        self.section(section)?.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.fields.is_empty())
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Collapse all sections into one key space.
    ///
    /// A key present in several sections takes the value of the last one.
    pub fn merged(&self) -> MergedRecord {
        let mut merged = MergedRecord::default();
        for section in &self.sections {
            for field in &section.fields {
                let values: Vec<String> = field
                    .values
                    .iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                merged.insert(field.key.clone(), values);
            }
        }
        merged
    }
}

/// The flat field key to values view used for binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedRecord {
    fields: HashMap<FieldKey, Vec<String>>,
}

impl MergedRecord {
    pub fn insert(&mut self, key: FieldKey, values: Vec<String>) {
        if values.is_empty() {
            self.fields.remove(&key);
        } else {
            self.fields.insert(key, values);
        }
    }

    /// Values of `key`, which is normalized before the lookup.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(normalize_key(key).as_str()).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(normalize_key(key).as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(FieldKey, Vec<String>)> for MergedRecord {
    fn from_iter<I: IntoIterator<Item = (FieldKey, Vec<String>)>>(iter: I) -> Self {
        let mut merged = MergedRecord::default();
        for (key, values) in iter {
            merged.insert(key, values);
        }
        merged
    }
}
