//! XLSX rendering: every report line in column A of a single worksheet

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::debug;

use crate::errors::{StatsError, StatsResult};
use crate::report::Report;

const SHEET_NAME: &str = "Summary";

fn xlsx_error(e: XlsxError) -> StatsError {
    StatsError::Export(format!("XLSX: {}", e))
}

/// Render the report as a workbook
///
/// Rows follow a cumulative offset, so each section starts directly below
/// the previous one and line order matches `Report::lines()`.
pub fn render_xlsx(report: &Report) -> StatsResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let mono = Format::new().set_font_name("Courier New");
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(xlsx_error)?;
    sheet.set_column_width(0, 100).map_err(xlsx_error)?;

    let mut row: u32 = 0;
    for section in &report.sections {
        for line in section.lines() {
            if !line.is_empty() {
                sheet
                    .write_string_with_format(row, 0, line, &mono)
                    .map_err(xlsx_error)?;
            }
            row += 1;
        }
    }

    let bytes = workbook.save_to_buffer().map_err(xlsx_error)?;
    debug!(rows = row, bytes = bytes.len(), "rendered XLSX");
    Ok(bytes)
}
