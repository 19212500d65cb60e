//! Maps input sheets to bill-of-entry sections by their title cell.

use std::fmt;

use tracing::debug;

use super::profile::ProfileSet;
use crate::models::cell::CellRef;
use crate::models::config::LayoutConfig;
use crate::workbook::Worksheet;

/// Profile for invoice sheets after the first one.
pub const EXTRA_INVOICE_PROFILE: &str = "PART_II_Extra";

/// Profile for duties sheets carrying the extra column.
pub const EXTRA_DUTIES_PROFILE: &str = "PART_III_Extra_Col";

/// Logical sections of a bill of entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Invoice,
    Duties,
    AdditionalDetails,
    OtherCompliances,
    Declaration,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Summary,
        Section::Invoice,
        Section::Duties,
        Section::AdditionalDetails,
        Section::OtherCompliances,
        Section::Declaration,
    ];

    /// Record section name; also the default profile name.
    pub fn name(self) -> &'static str {
        match self {
            Section::Summary => "PART_I",
            Section::Invoice => "PART_II",
            Section::Duties => "PART_III",
            Section::AdditionalDetails => "PART_IV",
            Section::OtherCompliances => "PART_V",
            Section::Declaration => "PART_VI",
        }
    }

    /// Title prefix after uppercasing and removing spaces.
    pub fn title_prefix(self) -> &'static str {
        match self {
            Section::Summary => "PART-I-BILLOFENTRYSUMMARY",
            Section::Invoice => "PART-II-INVOICE&VALUATION",
            Section::Duties => "PART-III-DUTIES",
            Section::AdditionalDetails => "PART-IV-ADDITIONALDETAILS",
            Section::OtherCompliances => "PART-V-OTHERCOMPLIANCES",
            Section::Declaration => "PART-VI-DECLARATION",
        }
    }

    /// Match a raw title cell text.
    pub fn from_title(title: &str) -> Option<Section> {
        let normalized = title.trim().to_uppercase().replace(' ', "");
        if normalized.is_empty() {
            return None;
        }
        Section::ALL
            .into_iter()
            .find(|section| normalized.starts_with(section.title_prefix()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a sheet's values go and which rules read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub section: Section,
    pub profile: &'static str,
}

/// Title-cell heuristics over the configured sheet layout.
#[derive(Debug, Clone)]
pub struct SectionClassifier {
    title_cell: CellRef,
    duties_marker_cell: CellRef,
    primary_invoice_ordinal: usize,
}

impl SectionClassifier {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            title_cell: layout.title_cell,
            duties_marker_cell: layout.duties_marker_cell,
            primary_invoice_ordinal: layout.primary_invoice_ordinal,
        }
    }

    /// The sheet's title text, trimmed.
    pub fn title(&self, sheet: &Worksheet) -> String {
        sheet.cell(self.title_cell).to_string().trim().to_string()
    }

    /// Classify the sheet at 1-based `ordinal`.
    ///
    /// `None` when the title is missing or unknown, or when the profile it
    /// resolves to is not loaded.
    pub fn classify(
        &self,
        sheet: &Worksheet,
        ordinal: usize,
        profiles: &ProfileSet,
    ) -> Option<Classification> {
        let section = Section::from_title(&self.title(sheet))?;

        let profile = match section {
            Section::Invoice if ordinal == self.primary_invoice_ordinal => section.name(),
            Section::Invoice => EXTRA_INVOICE_PROFILE,
            Section::Duties if !sheet.cell(self.duties_marker_cell).is_blank() => {
                EXTRA_DUTIES_PROFILE
            }
            _ => section.name(),
        };

        if !profiles.contains(profile) {
            debug!("Sheet '{}' resolved to unloaded profile {}", sheet.name(), profile);
            return None;
        }

        Some(Classification { section, profile })
    }
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::profile::ExtractionProfile;
    use pretty_assertions::assert_eq;

    const TITLE: CellRef = CellRef::new(12, 1);

    fn profiles() -> ProfileSet {
        [
            "PART_I",
            "PART_II",
            EXTRA_INVOICE_PROFILE,
            "PART_III",
            EXTRA_DUTIES_PROFILE,
            "PART_IV",
            "PART_V",
        ]
        .into_iter()
        .map(ExtractionProfile::new)
        .collect()
    }

    fn titled(title: &str) -> Worksheet {
        Worksheet::new("Page").with_cell(TITLE, title)
    }

    fn classify(sheet: &Worksheet, ordinal: usize) -> Option<Classification> {
        SectionClassifier::default().classify(sheet, ordinal, &profiles())
    }

    #[test]
    fn test_title_normalization() {
        assert_eq!(
            Section::from_title("  part - i - bill of entry summary "),
            Some(Section::Summary)
        );
        assert_eq!(
            Section::from_title("PART - II - INVOICE &VALUATION DETAILS (Invoice 1 1 )"),
            Some(Section::Invoice)
        );
        assert_eq!(Section::from_title("PART - VII - NOTES"), None);
        assert_eq!(Section::from_title(""), None);
    }

    #[test]
    fn test_invoice_profile_by_ordinal() {
        let sheet = titled("PART - II - INVOICE & VALUATION DETAILS");
        assert_eq!(
            classify(&sheet, 2),
            Some(Classification { section: Section::Invoice, profile: "PART_II" })
        );
        assert_eq!(
            classify(&sheet, 3),
            Some(Classification { section: Section::Invoice, profile: EXTRA_INVOICE_PROFILE })
        );
    }

    #[test]
    fn test_duties_marker_selects_extra_column() {
        let plain = titled("PART - III - DUTIES");
        assert_eq!(classify(&plain, 4).map(|c| c.profile), Some("PART_III"));

        let blank_marker = titled("PART - III - DUTIES").with_cell(CellRef::new(32, 4), "  ");
        assert_eq!(classify(&blank_marker, 4).map(|c| c.profile), Some("PART_III"));

        let marked = titled("PART - III - DUTIES").with_cell(CellRef::new(32, 4), 0i64);
        assert_eq!(
            classify(&marked, 4),
            Some(Classification { section: Section::Duties, profile: EXTRA_DUTIES_PROFILE })
        );
    }

    #[test]
    fn test_unloaded_profile_is_unclassified() {
        assert_eq!(classify(&titled("PART - VI - DECLARATION"), 9), None);
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(classify(&Worksheet::new("Cover"), 1), None);
    }

    #[test]
    fn test_custom_layout() {
        let layout = LayoutConfig {
            title_cell: CellRef::new(1, 1),
            primary_invoice_ordinal: 1,
            ..LayoutConfig::default()
        };
        let classifier = SectionClassifier::new(&layout);
        let sheet = Worksheet::new("p1").with_cell(CellRef::new(1, 1), "PART-II-INVOICE&VALUATION");
        assert_eq!(
            classifier.classify(&sheet, 1, &profiles()).map(|c| c.profile),
            Some("PART_II")
        );
    }
}
