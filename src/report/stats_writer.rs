use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::model::{Metric, Variable};
use crate::services::StatisticsTable;

pub const STATISTICS_SHEET: &str = "Statistics";
pub const SUMMARY_SHEET: &str = "Summary";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Output file already exists: {0}")]
    FileExists(String),

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Writes a statistics table to an xlsx workbook
///
/// The `Statistics` sheet holds one `name | value` row per statistic in table
/// order. The `Summary` sheet pivots the same values to one row per site and
/// variable, with the sample count used.
pub struct StatsWriter {
    path: PathBuf,
    overwrite: bool,
    title: Option<String>,
}

impl StatsWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            overwrite: true,
            title: None,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, stats: &StatisticsTable) -> Result<(), ReportError> {
        if !self.overwrite && self.path.exists() {
            return Err(ReportError::FileExists(self.path.display().to_string()));
        }

        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        self.write_statistics(sheet, stats, &bold)?;

        let sheet = workbook.add_worksheet();
        Self::write_summary(sheet, stats, &bold)?;

        workbook.save(&self.path)?;
        info!(
            "Wrote {} statistics to {}",
            stats.len(),
            self.path.display()
        );
        Ok(())
    }

    fn write_statistics(
        &self,
        sheet: &mut Worksheet,
        stats: &StatisticsTable,
        bold: &Format,
    ) -> Result<(), XlsxError> {
        sheet.set_name(STATISTICS_SHEET)?;
        sheet.set_column_width(0, 18)?;
        sheet.set_column_width(1, 22)?;

        let mut row: u32 = 0;
        if let Some(title) = &self.title {
            sheet.write_string_with_format(row, 0, title, bold)?;
            sheet.write_string(
                row,
                1,
                format!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
            )?;
            row += 2;
        }

        sheet.write_string_with_format(row, 0, "Statistic", bold)?;
        sheet.write_string_with_format(row, 1, "Value", bold)?;

        for entry in stats.entries() {
            row += 1;
            sheet.write_string(row, 0, &entry.name)?;
            write_value(sheet, row, 1, entry.value)?;
        }
        Ok(())
    }

    fn write_summary(
        sheet: &mut Worksheet,
        stats: &StatisticsTable,
        bold: &Format,
    ) -> Result<(), XlsxError> {
        sheet.set_name(SUMMARY_SHEET)?;
        sheet.set_column_width(0, 14)?;
        sheet.set_column_width(1, 18)?;

        let mut headers = vec!["Site", "Variable", "N"];
        headers.extend(Metric::ALL.iter().map(|m| m.label()));
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, bold)?;
        }

        let mut row: u32 = 0;
        for site in stats.sites() {
            for variable in Variable::ALL {
                row += 1;
                sheet.write_string(row, 0, &site.name)?;
                sheet.write_string(row, 1, variable.label())?;
                sheet.write_number(row, 2, site.samples as f64)?;

                for (offset, metric) in Metric::ALL.iter().enumerate() {
                    if let Some(value) = stats.value(*metric, &site.site, variable) {
                        write_value(sheet, row, 3 + offset as u16, value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// xlsx has no NaN/inf number cells; those are written as text
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<(), XlsxError> {
    if value.is_nan() {
        sheet.write_string(row, col, "NaN")?;
    } else if value.is_infinite() {
        sheet.write_string(row, col, if value > 0.0 { "inf" } else { "-inf" })?;
    } else {
        sheet.write_number(row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_defaults_to_overwrite() {
        let writer = StatsWriter::new("all_met.xlsx");
        assert!(writer.overwrite);
        assert!(writer.title.is_none());
        assert_eq!(writer.path(), Path::new("all_met.xlsx"));
    }

    #[test]
    fn test_writer_builder() {
        let writer = StatsWriter::new("out.xlsx")
            .overwrite(false)
            .title(Some("Skill scores".to_string()));
        assert!(!writer.overwrite);
        assert_eq!(writer.title.as_deref(), Some("Skill scores"));
    }
}
