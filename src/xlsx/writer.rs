//! Flush a [`SheetBuffer`] to the weekly plan workbook.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::error::Result;
use crate::xlsx::sheet::{CellStyle, SheetBuffer};

/// First and last grid columns (C through P) holding session values.
const FIRST_SLOT_COL: u16 = 2;
const LAST_SLOT_COL: u16 = 15;

/// Write the plan sheet to disk. The worksheet keeps the original template's
/// sheet name so downstream consumers find their cells where they expect.
pub fn write_plan_workbook(sheet: &SheetBuffer, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Template")?;

    worksheet.set_column_width(0, 26)?;
    worksheet.set_column_width(1, 4)?;
    for col in FIRST_SLOT_COL..=LAST_SLOT_COL {
        worksheet.set_column_width(col, 18)?;
    }

    let banner = Format::new().set_bold().set_font_size(14);
    let label = Format::new()
        .set_bold()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    let date_header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let slot_header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin);
    let week_heading = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();
    // The center/center/wrap contract every placed value carries
    let session = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    for (at, cell) in sheet.iter() {
        let format = match cell.style {
            CellStyle::Banner => &banner,
            CellStyle::Label => &label,
            CellStyle::DateHeader => &date_header,
            CellStyle::SlotHeader => &slot_header,
            CellStyle::WeekHeading => &week_heading,
            CellStyle::Session => &session,
        };
        worksheet.write_string_with_format(at.row, at.col, &cell.value, format)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xlsx::sheet::CellRef;

    #[test]
    fn test_write_plan_workbook() {
        let mut sheet = SheetBuffer::new();
        sheet.set(CellRef::parse("O2").unwrap(), "Week beginning", CellStyle::WeekHeading);
        sheet.set(CellRef::parse("C6").unwrap(), "Track\n09:00-10:00", CellStyle::Session);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.xlsx");
        write_plan_workbook(&sheet, &path).unwrap();
        assert!(path.exists());
    }
}
