// Statistics workbook output

pub mod stats_writer;

pub use stats_writer::{ReportError, StatsWriter, STATISTICS_SHEET, SUMMARY_SHEET};
