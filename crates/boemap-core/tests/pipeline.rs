//! End-to-end tests: generated workbook on disk, through the record file,
//! into a populated template on disk.

#![cfg(feature = "xlsx")]

use std::fs;
use std::path::{Path, PathBuf};

use boemap_core::formats::{load_cell_locations, load_profiles, load_record, save_record};
use boemap_core::models::config::{LayoutConfig, SummaryConfig};
use boemap_core::models::template::HIGHLIGHT_FILL;
use boemap_core::{
    BoemapError, CellData, CellRef, CellValue, SectionRecord, TemplateDocument, extract_record,
    populate_template, read_workbook, write_template,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook as XlsxWorkbook;

// ============================================================================
// Fixture helpers
// ============================================================================

const MAPPING: &str = "\
[PART_I]
BE No = B4
BE Date = D4

[PART_II]
S No = A38+
Description = F38+
Invoice No = T4
Unit Price = J38+

[PART_II_Extra]
S No = A20+
Description = F20+
Unit Price = J20+

[PART_III]
Debit Duty = D24:step20
Total Duty = H24:step20
";

const LOCATIONS: &str = "\
BE No = (2,2)
BE Date = (2,4)
S No = (5,1)
Description = (5,2)
Unit Price = (5,3)
Debit Duty = (30,9)
";

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        fs::write(root.join("Mapping.ini"), MAPPING).unwrap();
        fs::write(root.join("Cell_Location.txt"), LOCATIONS).unwrap();
        write_input_workbook(&root.join("Extracted.xlsx"));
        write_blank_template(&root.join("Template.xlsx"));
        Self { _dir: dir, root }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn write_input_workbook(path: &Path) {
    let mut book = XlsxWorkbook::new();

    let summary = book.add_worksheet();
    summary.write_string(11, 0, "PART - I - BILL OF ENTRY SUMMARY").unwrap();
    summary.write_string(3, 1, "2034567").unwrap();
    summary.write_string(3, 3, "05/03/2024").unwrap();

    let invoice = book.add_worksheet();
    invoice
        .write_string(11, 0, "PART - II - INVOICE & VALUATION DETAILS (Invoice 1 1 )")
        .unwrap();
    invoice.write_string(3, 19, "INV-99").unwrap();
    invoice.write_number(37, 0, 1).unwrap();
    invoice.write_number(38, 0, 2).unwrap();
    invoice.write_string(37, 5, "S Steel\npipes").unwrap();
    invoice.write_string(38, 5, "Copper wire").unwrap();
    invoice.write_string(37, 9, "12.50").unwrap();
    invoice.write_string(38, 9, "7.25").unwrap();

    let cover = book.add_worksheet();
    cover.write_string(11, 0, "ANNEXURE").unwrap();

    let extra = book.add_worksheet();
    extra
        .write_string(11, 0, "PART - II - INVOICE & VALUATION DETAILS (Invoice 1 1 )")
        .unwrap();
    extra.write_number(19, 0, 3).unwrap();
    extra.write_string(19, 5, "Brass fittings").unwrap();
    extra.write_string(19, 9, "3.10").unwrap();

    let duties = book.add_worksheet();
    duties.write_string(11, 0, "PART - III - DUTIES").unwrap();
    duties.write_string(23, 3, "100.50").unwrap();
    duties.write_string(43, 3, "200.25").unwrap();
    duties.write_string(23, 7, "150.00").unwrap();
    duties.write_string(43, 7, "160.75").unwrap();

    book.save(path).unwrap();
}

fn write_blank_template(path: &Path) {
    let mut book = XlsxWorkbook::new();
    let main = book.add_worksheet();
    main.set_name("Sheet1").unwrap();
    main.write_string(0, 0, "Bill of Entry").unwrap();
    main.write_formula(30, 9, "=I30*2").unwrap();
    book.add_worksheet().set_name("Rates").unwrap();
    book.save(path).unwrap();
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_extraction_to_record_file() {
    let fixture = Fixture::new();
    let workbook = read_workbook(&fixture.path("Extracted.xlsx")).unwrap();
    let profiles = load_profiles(&fixture.path("Mapping.ini")).unwrap();

    let result = extract_record(&workbook, &profiles, &LayoutConfig::default());
    assert_eq!(result.sheets_processed, 4);
    assert_eq!(
        result.warnings,
        vec!["Skipping Sheet3, no mapping for title: ANNEXURE".to_string()]
    );

    let record_path = fixture.path("output.ini");
    save_record(&result.record, &record_path).unwrap();
    let text = fs::read_to_string(&record_path).unwrap();
    assert!(text.contains("[PART_I]\nbeno = 2034567\nbedate = 05-03-2024\n"));
    assert!(text.contains("description = Steel pipes;Copper wire;Brass fittings\n"));
    assert!(text.contains("debitduty = 100.50;200.25\n"));

    assert_eq!(load_record(&record_path).unwrap(), result.record);
}

#[test]
fn test_full_pipeline_through_files() {
    let fixture = Fixture::new();
    let workbook = read_workbook(&fixture.path("Extracted.xlsx")).unwrap();
    let profiles = load_profiles(&fixture.path("Mapping.ini")).unwrap();
    let record = extract_record(&workbook, &profiles, &LayoutConfig::default()).record;

    let locations = load_cell_locations(&fixture.path("Cell_Location.txt")).unwrap();
    let mut doc = TemplateDocument::default();
    let report = populate_template(&record, &locations, &SummaryConfig::default(), &mut doc).unwrap();

    let output = fixture.path("Output").join("Output.xlsx");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    write_template(&doc, &fixture.path("Template.xlsx"), &output).unwrap();

    // sno, description, unit price and echo each cover three rows
    assert_eq!(report.cells_written, 2 + 3 * 4 + 1);
    assert_eq!(report.summary.anchor_row, 13);

    let cell = |row, col| doc.cell(row, col).unwrap();
    assert!(doc.cell(1, 1).is_none());
    assert_eq!(cell(7, 1).value, CellValue::Integer(3));
    assert_eq!(cell(5, 2).value, CellValue::Text("Steel pipes".into()));
    assert_eq!(cell(7, 3).value, CellValue::Decimal(Decimal::new(310, 2)));
    assert_eq!(cell(7, 4).value, CellValue::Text("INV-99".into()));
    assert_eq!(cell(30, 9).value, CellValue::Decimal(Decimal::new(30075, 2)));
    assert_eq!(cell(30, 9).number_format.as_deref(), Some("0.00"));
    assert_eq!(cell(13, 15).value, CellValue::Decimal(Decimal::new(31075, 2)));
    assert_eq!(cell(16, 14).style.fill, Some(HIGHLIGHT_FILL));

    let saved = read_workbook(&output).unwrap();
    assert_eq!(saved.len(), 2);
    let sheet = &saved.sheets()[0];
    let at = |row, col| sheet.cell(CellRef::new(row, col));
    assert_eq!(at(1, 1), &CellData::from("Bill of Entry"));
    assert_eq!(at(6, 2), &CellData::from("Copper wire"));
    assert_eq!(at(30, 9), &CellData::Float(300.75));
    assert_eq!(at(16, 14), &CellData::from("Diff should be Nil"));

    // The template's own formula is untouched
    let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    let formula = book
        .get_sheet_by_name("Sheet1")
        .and_then(|s| s.get_cell("J31"))
        .map(|c| c.get_formula().to_string());
    assert!(formula.is_some_and(|f| f.contains("I30*2")));
}

#[test]
fn test_empty_record_writes_nothing() {
    let fixture = Fixture::new();
    let locations = load_cell_locations(&fixture.path("Cell_Location.txt")).unwrap();
    let mut doc = TemplateDocument::default();

    let result = populate_template(
        &SectionRecord::new(),
        &locations,
        &SummaryConfig::default(),
        &mut doc,
    );
    assert!(matches!(result, Err(BoemapError::NoRecordData)));
    assert!(doc.is_empty());
}
