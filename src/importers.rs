// ! Readers for the per-site observed/modeled workbooks

pub mod site_workbook;

// Re-export commonly used items
pub use site_workbook::{ExcelImportError, ObservationTable, SiteWorkbookImporter, VariableSeries};
