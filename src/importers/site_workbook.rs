use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::Variable;
use crate::utils::{is_missing_marker, normalize_header};

#[derive(Error, Debug)]
pub enum ExcelImportError {
    #[error("Failed to open workbook {path}: {msg}")]
    WorkbookOpen { path: String, msg: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet {0} has no header row")]
    EmptySheet(String),

    #[error("Missing column in header row: {0}")]
    MissingColumn(String),

    #[error("Invalid data at row {row}, col {col}: {msg}")]
    InvalidData { row: usize, col: usize, msg: String },
}

/// Paired observed/modeled values for one variable, complete rows only
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSeries {
    pub variable: Variable,
    pub observed: Vec<f64>,
    pub modeled: Vec<f64>,
}

/// Complete rows of one site workbook, split per variable
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    pub site_code: String,
    /// Data rows found below the header, before dropping
    pub rows_read: usize,
    /// Rows discarded because at least one column was missing
    pub rows_dropped: usize,
    series: Vec<VariableSeries>,
}

impl ObservationTable {
    pub fn new(
        site_code: impl Into<String>,
        series: Vec<VariableSeries>,
        rows_read: usize,
        rows_dropped: usize,
    ) -> Self {
        Self {
            site_code: site_code.into(),
            rows_read,
            rows_dropped,
            series,
        }
    }

    pub fn series(&self, variable: Variable) -> Option<&VariableSeries> {
        self.series.iter().find(|s| s.variable == variable)
    }

    /// Number of complete rows kept
    pub fn len(&self) -> usize {
        self.series.first().map(|s| s.observed.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reader for per-site workbooks of observed vs modeled readings
///
/// # Expected Sheet Structure:
/// ```text
/// Row 1: Header (Date | Temp_Obs | Temp_Mod | RH_Obs | RH_Mod | WS_Obs | WS_Mod ...)
/// Row 2+: One time-aligned sample per row
/// ```
/// Column order does not matter; columns are located by header name. Extra
/// columns are allowed, with or without a header, and a missing value in any
/// of them drops the row.
pub struct SiteWorkbookImporter {
    workbook_path: PathBuf,
    sheet_name: String,
}

/// Column positions of the six required value columns
#[derive(Debug)]
struct ColumnLayout {
    /// (variable, observed col, modeled col)
    pairs: Vec<(Variable, usize, usize)>,
}

impl SiteWorkbookImporter {
    pub fn new(workbook_path: impl AsRef<Path>, sheet_name: impl Into<String>) -> Self {
        Self {
            workbook_path: workbook_path.as_ref().to_path_buf(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook_path
    }

    /// Load the sheet and keep only rows where every column of the sheet has a value
    pub fn load(&self, site_code: &str) -> Result<ObservationTable, ExcelImportError> {
        let path = self.workbook_path();
        info!(
            "Loading site {} from {} (sheet {})",
            site_code,
            path.display(),
            self.sheet_name
        );

        let mut workbook: Xlsx<BufReader<File>> = match open_workbook(path) {
            Ok(wb) => wb,
            Err(e) => {
                return Err(ExcelImportError::WorkbookOpen {
                    path: path.display().to_string(),
                    msg: e.to_string(),
                })
            }
        };

        let range = match workbook.worksheet_range(&self.sheet_name) {
            Ok(range) => range,
            Err(_) => return Err(ExcelImportError::SheetNotFound(self.sheet_name.clone())),
        };

        let table = self.parse_range(site_code, &range)?;

        if table.rows_dropped > 0 {
            warn!(
                "Site {}: dropped {} of {} rows with missing values",
                site_code, table.rows_dropped, table.rows_read
            );
        }
        info!(
            "Site {}: {} complete rows loaded",
            site_code,
            table.len()
        );
        Ok(table)
    }

    fn parse_range(
        &self,
        site_code: &str,
        range: &Range<Data>,
    ) -> Result<ObservationTable, ExcelImportError> {
        let mut rows = range.rows();
        let header = match rows.next() {
            Some(row) => row,
            None => return Err(ExcelImportError::EmptySheet(self.sheet_name.clone())),
        };

        let layout = Self::locate_columns(header)?;
        debug!(
            "Header spans {} columns for site {}",
            header.len(),
            site_code
        );

        let mut series: Vec<VariableSeries> = layout
            .pairs
            .iter()
            .map(|(variable, _, _)| VariableSeries {
                variable: *variable,
                observed: Vec::new(),
                modeled: Vec::new(),
            })
            .collect();

        let mut rows_read = 0;
        let mut rows_dropped = 0;

        // Sheet row 2 onwards; row numbers reported 1-based
        for (offset, row) in rows.enumerate() {
            let sheet_row = offset + 2;
            rows_read += 1;

            let mut values = Vec::with_capacity(layout.pairs.len());
            for (_, obs_col, mod_col) in &layout.pairs {
                let observed = Self::parse_value(row, sheet_row, *obs_col)?;
                let modeled = Self::parse_value(row, sheet_row, *mod_col)?;
                values.push((observed, modeled));
            }

            // Headerless columns count too
            let complete = row.iter().all(|cell| !Self::is_missing(Some(cell)));

            if !complete {
                rows_dropped += 1;
                continue;
            }

            // Complete rows have both sides of every pair
            for (target, pair) in series.iter_mut().zip(values) {
                if let (Some(o), Some(m)) = pair {
                    target.observed.push(o);
                    target.modeled.push(m);
                }
            }
        }

        Ok(ObservationTable::new(
            site_code,
            series,
            rows_read,
            rows_dropped,
        ))
    }

    fn locate_columns(header: &[Data]) -> Result<ColumnLayout, ExcelImportError> {
        let names: Vec<Option<String>> = header
            .iter()
            .map(|cell| match cell {
                Data::String(s) if !s.trim().is_empty() => Some(normalize_header(s)),
                Data::Int(i) => Some(i.to_string()),
                Data::Float(f) => Some(f.to_string()),
                _ => None,
            })
            .collect();

        let find = |name: &str| -> Result<usize, ExcelImportError> {
            names
                .iter()
                .position(|n| n.as_deref() == Some(name))
                .ok_or_else(|| ExcelImportError::MissingColumn(name.to_string()))
        };

        let mut pairs = Vec::with_capacity(Variable::ALL.len());
        for variable in Variable::ALL {
            let obs_col = find(variable.observed_column())?;
            let mod_col = find(variable.modeled_column())?;
            pairs.push((variable, obs_col, mod_col));
        }

        Ok(ColumnLayout { pairs })
    }

    fn is_missing(cell: Option<&Data>) -> bool {
        match cell {
            None | Some(Data::Empty) | Some(Data::Error(_)) => true,
            Some(Data::String(s)) => is_missing_marker(s),
            Some(Data::Float(f)) => f.is_nan(),
            Some(_) => false,
        }
    }

    /// Parse a numeric reading; `None` means the cell is missing
    fn parse_value(
        row: &[Data],
        sheet_row: usize,
        col: usize,
    ) -> Result<Option<f64>, ExcelImportError> {
        let cell = row.get(col);
        if Self::is_missing(cell) {
            return Ok(None);
        }
        match cell {
            Some(Data::Float(f)) => Ok(Some(*f)),
            Some(Data::Int(i)) => Ok(Some(*i as f64)),
            Some(Data::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ExcelImportError::InvalidData {
                    row: sheet_row,
                    col: col + 1,
                    msg: format!("Cannot parse numeric value: {s}"),
                }),
            other => Err(ExcelImportError::InvalidData {
                row: sheet_row,
                col: col + 1,
                msg: format!("Expected number, got: {other:?}"),
            }),
        }
    }
}
