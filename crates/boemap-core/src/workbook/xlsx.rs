//! XLSX import via calamine and template population via umya-spreadsheet.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, info};
use umya_spreadsheet::{
    Border, Color, HorizontalAlignmentValues, Style, VerticalAlignmentValues,
};

use super::{Workbook, Worksheet};
use crate::error::WorkbookError;
use crate::models::cell::{CellData, CellRef, MAX_COL, MAX_ROW};
use crate::models::template::{TemplateCell, TemplateDocument};
use crate::models::value::CellValue;

type Result<T> = std::result::Result<T, WorkbookError>;

/// Read every worksheet of a spreadsheet, in workbook order.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let mut source = open_workbook_auto(path)
        .map_err(|e| WorkbookError::Read(format!("{}: {}", path.display(), e)))?;

    let sheet_names = source.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(WorkbookError::NoSheets);
    }

    let mut workbook = Workbook::new();
    for name in sheet_names {
        let range = source
            .worksheet_range(&name)
            .map_err(|e| WorkbookError::Read(format!("sheet '{}': {}", name, e)))?;

        let mut sheet = Worksheet::new(name.as_str());
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        for (row_idx, row) in range.rows().enumerate() {
            for (col_idx, data) in row.iter().enumerate() {
                let at = CellRef::new(
                    start_row + row_idx as u32 + 1,
                    start_col + col_idx as u32 + 1,
                );
                sheet.set(at, data_to_cell(data));
            }
        }

        debug!("Read sheet '{}' with {} cells", sheet.name(), sheet.len());
        workbook.push(sheet);
    }

    info!("Read {} sheets from {}", workbook.len(), path.display());
    Ok(workbook)
}

/// Copy `template` to `output` with the cells of `doc` applied.
///
/// The template is loaded in full, so other sheets, formulas, merged ranges,
/// column widths and existing cell styles survive. Cells land on the sheet
/// named by [`TemplateDocument::sheet_name`], or on the active sheet when the
/// name is empty. Border, alignment, fill and number format are layered onto
/// whatever style the template cell already has.
pub fn write_template(doc: &TemplateDocument, template: &Path, output: &Path) -> Result<()> {
    let mut book = umya_spreadsheet::reader::xlsx::read(template)
        .map_err(|e| WorkbookError::Read(format!("{}: {}", template.display(), e)))?;

    let sheet = if doc.sheet_name().is_empty() {
        if book.get_sheet_collection().is_empty() {
            return Err(WorkbookError::NoSheets);
        }
        book.get_active_sheet_mut()
    } else {
        book.get_sheet_by_name_mut(doc.sheet_name()).ok_or_else(|| {
            WorkbookError::Write(format!(
                "{}: no sheet named '{}'",
                template.display(),
                doc.sheet_name()
            ))
        })?
    };

    for (row, col, cell) in doc.cells() {
        if !(1..=MAX_ROW).contains(&row) || !(1..=MAX_COL).contains(&col) {
            return Err(WorkbookError::InvalidCoordinate(format!("({}, {})", row, col)));
        }

        let target = sheet.get_cell_mut((col, row));
        match &cell.value {
            CellValue::Empty => {}
            CellValue::Text(s) => {
                target.set_value_string(s.as_str());
            }
            numeric => {
                target.set_value_number(numeric.as_f64().unwrap_or_default());
            }
        }
        apply_style(target.get_style_mut(), cell);
    }

    umya_spreadsheet::writer::xlsx::write(&book, output)
        .map_err(|e| WorkbookError::Write(format!("{}: {}", output.display(), e)))?;

    info!(
        "Wrote {} cells from {} to {}",
        doc.len(),
        template.display(),
        output.display()
    );
    Ok(())
}

fn apply_style(style: &mut Style, cell: &TemplateCell) {
    if cell.style.bordered {
        let borders = style.get_borders_mut();
        // `Borders` is not publicly exported by umya-spreadsheet, so the
        // sides are selected by index instead of via fn pointers.
        for side in 0..4 {
            let border = match side {
                0 => borders.get_left_mut(),
                1 => borders.get_right_mut(),
                2 => borders.get_top_mut(),
                _ => borders.get_bottom_mut(),
            };
            border.set_border_style(Border::BORDER_THIN);
            border.get_color_mut().set_argb(Color::COLOR_BLACK);
        }
    }
    if cell.style.centered {
        let alignment = style.get_alignment_mut();
        alignment.set_horizontal(HorizontalAlignmentValues::Center);
        alignment.set_vertical(VerticalAlignmentValues::Center);
    }
    if let Some(rgb) = cell.style.fill {
        style.set_background_color(format!("FF{:06X}", rgb));
    }
    if let Some(code) = &cell.number_format {
        style.get_number_format_mut().set_format_code(code.as_str());
    }
}

fn data_to_cell(data: &Data) -> CellData {
    match data {
        Data::Empty => CellData::Empty,
        Data::String(s) => CellData::Text(s.clone()),
        Data::Int(n) => CellData::Int(*n),
        Data::Float(n) => CellData::Float(*n),
        Data::Bool(b) => CellData::Bool(*b),
        Data::DateTime(dt) => match excel_serial_to_datetime(dt.as_f64()) {
            Some(date) => CellData::Date(date),
            None => CellData::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .map(|d| d.and_time(chrono::NaiveTime::MIN))
            })
            .map(CellData::Date)
            .unwrap_or_else(|| CellData::Text(s.clone())),
        Data::DurationIso(s) => CellData::Text(s.clone()),
        Data::Error(e) => CellData::Text(format!("#{:?}", e)),
    }
}

/// Convert a 1900-system Excel serial to a date-time.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::template::HIGHLIGHT_FILL;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook as XlsxWorkbook;

    #[test]
    fn test_excel_serial_to_datetime() {
        let dt = excel_serial_to_datetime(45356.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(excel_serial_to_datetime(-1.0).is_none());
    }

    #[test]
    fn test_read_workbook_keeps_sheet_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted.xlsx");

        let mut book = XlsxWorkbook::new();
        let first = book.add_worksheet();
        first.set_name("Page_1").unwrap();
        first.write_string(11, 0, "PART - I - BILL OF ENTRY SUMMARY").unwrap();
        let second = book.add_worksheet();
        second.set_name("Page_2").unwrap();
        second.write_number(37, 5, 12.5).unwrap();
        second.write_string(38, 5, "S Widget").unwrap();
        book.save(&path).unwrap();

        let workbook = read_workbook(&path).unwrap();
        assert_eq!(workbook.len(), 2);
        assert_eq!(workbook.sheets()[0].name(), "Page_1");
        assert_eq!(
            workbook.sheets()[0].cell(CellRef::new(12, 1)),
            &CellData::from("PART - I - BILL OF ENTRY SUMMARY")
        );
        assert_eq!(workbook.sheets()[1].cell(CellRef::new(38, 6)), &CellData::Float(12.5));
        assert_eq!(workbook.sheets()[1].cell(CellRef::new(39, 6)), &CellData::from("S Widget"));
    }

    /// Template with a formula on the first sheet and a second sheet.
    fn write_template_fixture(path: &Path) {
        let mut book = XlsxWorkbook::new();
        let main = book.add_worksheet();
        main.set_name("Sheet1").unwrap();
        main.write_string(0, 0, "Bill of Entry").unwrap();
        main.write_number(1, 0, 21).unwrap();
        main.write_formula(1, 1, "=A2*2").unwrap();
        let rates = book.add_worksheet();
        rates.set_name("Rates").unwrap();
        rates.write_string(0, 0, "USD").unwrap();
        book.save(path).unwrap();
    }

    #[test]
    fn test_template_populated_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("Template.xlsx");
        let output = dir.path().join("Output.xlsx");
        write_template_fixture(&template);

        let mut doc = TemplateDocument::default();
        doc.write(5, 3, CellValue::Integer(10)).boxed();
        doc.write(6, 3, CellValue::Text("INV-99".into())).boxed().fill(HIGHLIGHT_FILL);
        doc.write(7, 3, CellValue::Float(300.75)).number_format = Some("0.00".into());
        write_template(&doc, &template, &output).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
        assert_eq!(book.get_sheet_collection().len(), 2);
        assert!(book.get_sheet_by_name("Rates").is_some());

        let sheet = book.get_sheet_by_name("Sheet1").unwrap();
        let formula = sheet.get_cell("B2").map(|c| c.get_formula().to_string());
        assert!(formula.as_ref().is_some_and(|f| f.contains("A2*2")), "{formula:?}");
        let fill = sheet
            .get_cell("C6")
            .and_then(|c| c.get_style().get_background_color())
            .map(|c| c.get_argb().to_string());
        assert_eq!(fill.as_deref(), Some("FF92D050"));

        let saved = read_workbook(&output).unwrap();
        let first = &saved.sheets()[0];
        assert_eq!(first.cell(CellRef::new(1, 1)), &CellData::from("Bill of Entry"));
        assert_eq!(first.cell(CellRef::new(5, 3)), &CellData::Float(10.0));
        assert_eq!(first.cell(CellRef::new(6, 3)), &CellData::from("INV-99"));
        assert_eq!(first.cell(CellRef::new(7, 3)), &CellData::Float(300.75));
        assert_eq!(saved.sheets()[1].cell(CellRef::new(1, 1)), &CellData::from("USD"));
    }

    #[test]
    fn test_named_sheet_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("Template.xlsx");
        write_template_fixture(&template);

        let mut doc = TemplateDocument::new("Summary");
        doc.write(1, 1, CellValue::Integer(1));
        let result = write_template(&doc, &template, &dir.path().join("Output.xlsx"));
        assert!(matches!(result, Err(WorkbookError::Write(_))));
        assert!(!dir.path().join("Output.xlsx").exists());
    }

    #[test]
    fn test_missing_file() {
        let result = read_workbook(Path::new("/nonexistent/extracted.xlsx"));
        assert!(matches!(result, Err(WorkbookError::Read(_))));
    }
}
