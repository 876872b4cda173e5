//! Excel writer for [`AnalysisReport`].

use std::path::{Path, PathBuf};

use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use snafu::ResultExt;
use tracing::{debug, info};

use super::{
    AnalysisReport, Cell, DEFAULT_REPORT_FILE, ReportSink, SaveSnafu, SheetTable, SinkError,
    WorksheetSnafu, build_workbook_layout,
};

const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Writes the report to an `.xlsx` file, replacing any existing file.
#[derive(Debug, Clone)]
pub struct XlsxReportSink {
    path: PathBuf,
}

impl XlsxReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for XlsxReportSink {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_FILE)
    }
}

struct Formats {
    header: Format,
    date: Format,
}

impl ReportSink for XlsxReportSink {
    type Output = PathBuf;

    fn write(&self, report: &AnalysisReport<'_>) -> Result<PathBuf, SinkError> {
        let formats = Formats {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format(DATE_FORMAT),
        };

        let mut workbook = Workbook::new();
        for table in build_workbook_layout(report) {
            write_sheet(&mut workbook, &table, &formats).context(WorksheetSnafu {
                sheet: table.name.clone(),
            })?;
            debug!(sheet = %table.name, rows = table.rows.len(), "sheet written");
        }

        workbook.save(&self.path).context(SaveSnafu {
            path: self.path.clone(),
        })?;
        info!(path = %self.path.display(), "report exported");
        Ok(self.path.clone())
    }
}

fn write_sheet(workbook: &mut Workbook, table: &SheetTable, formats: &Formats) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(&table.name)?;

    for (col, title) in table.header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title, &formats.header)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Date(d) => {
                    let date = ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)?;
                    sheet.write_datetime_with_format(r, c, &date, &formats.date)?;
                }
                Cell::Text(s) => {
                    sheet.write_string_with_format(r, c, s, &formats.header)?;
                }
                Cell::Number(n) if n.is_finite() => {
                    sheet.write_number(r, c, *n)?;
                }
                Cell::Number(_) => {}
            }
        }
    }

    for (col, width) in table.column_widths().into_iter().enumerate() {
        sheet.set_column_width(col as u16, width)?;
    }
    Ok(())
}
