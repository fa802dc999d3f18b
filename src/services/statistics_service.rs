use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::importers::{ExcelImportError, ObservationTable, SiteWorkbookImporter};
use crate::metrics::{self, MetricError};
use crate::model::{Metric, StatKey, Variable};
use crate::report::ReportError;
use crate::sites::Site;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Import failed: {0}")]
    Import(#[from] ExcelImportError),

    #[error("Statistics for site {site} failed: {source}")]
    Metric {
        site: String,
        #[source]
        source: MetricError,
    },

    #[error("Report failed: {0}")]
    Report(#[from] ReportError),

    #[error("Unknown site code: {0}")]
    UnknownSite(String),
}

/// One computed statistic, e.g. `rms_bei_temp = 1.42`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatEntry {
    pub name: String,
    #[serde(flatten)]
    pub key: StatKey,
    pub value: f64,
}

impl StatEntry {
    pub fn new(key: StatKey, value: f64) -> Self {
        Self {
            name: key.to_string(),
            key,
            value,
        }
    }
}

/// Row accounting for one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub site: String,
    pub name: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub samples: usize,
}

/// Ordered statistics for all processed sites
///
/// Entries stay in insertion order: site, then metric, then variable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatisticsTable {
    entries: Vec<StatEntry>,
    sites: Vec<SiteSummary>,
}

impl StatisticsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_site(&mut self, summary: SiteSummary, entries: Vec<StatEntry>) {
        self.sites.push(summary);
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    pub fn sites(&self) -> &[SiteSummary] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a statistic by its rendered name (e.g. `cc_lan_rh`)
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value)
    }

    pub fn value(&self, metric: Metric, site: &str, variable: Variable) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.key.metric == metric && e.key.site == site && e.key.variable == variable)
            .map(|e| e.value)
    }
}

/// Loads site workbooks and reduces them to the statistics table
#[derive(Debug, Clone)]
pub struct StatisticsService {
    data_dir: PathBuf,
    sheet_name: String,
}

impl StatisticsService {
    pub fn new(data_dir: impl AsRef<Path>, sheet_name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn load_site(&self, site: &Site) -> Result<ObservationTable, ExcelImportError> {
        SiteWorkbookImporter::new(site.workbook_path(&self.data_dir), self.sheet_name.clone())
            .load(site.code)
    }

    /// Compute all metrics for every variable of one site (15 entries)
    pub fn compute_site(
        site_code: &str,
        table: &ObservationTable,
    ) -> Result<Vec<StatEntry>, MetricError> {
        let mut entries = Vec::with_capacity(Metric::ALL.len() * Variable::ALL.len());

        for metric in Metric::ALL {
            for variable in Variable::ALL {
                let (observed, modeled) = match table.series(variable) {
                    Some(s) => (s.observed.as_slice(), s.modeled.as_slice()),
                    None => (&[][..], &[][..]),
                };
                let value = metrics::compute(metric, observed, modeled)?;
                let key = StatKey::new(metric, site_code, variable);
                debug!("{} = {}", key, value);
                entries.push(StatEntry::new(key, value));
            }
        }

        Ok(entries)
    }

    /// Process the given sites in order
    pub fn run(&self, sites: &[Site]) -> Result<StatisticsTable, PipelineError> {
        self.run_with(sites, |_| {})
    }

    /// Process the given sites in order, calling `on_site_done` after each one
    #[instrument(skip(self, sites, on_site_done), fields(sites = sites.len()))]
    pub fn run_with<F>(
        &self,
        sites: &[Site],
        mut on_site_done: F,
    ) -> Result<StatisticsTable, PipelineError>
    where
        F: FnMut(&Site),
    {
        let mut stats = StatisticsTable::new();

        for site in sites {
            let table = self.load_site(site)?;
            if table.is_empty() {
                warn!("Site {} has no complete rows", site.code);
            }
            let entries =
                Self::compute_site(site.code, &table).map_err(|source| PipelineError::Metric {
                    site: site.code.to_string(),
                    source,
                })?;

            info!(
                "Computed {} statistics for {} from {} samples",
                entries.len(),
                site.name,
                table.len()
            );

            stats.extend_site(
                SiteSummary {
                    site: site.code.to_string(),
                    name: site.name.to_string(),
                    rows_read: table.rows_read,
                    rows_dropped: table.rows_dropped,
                    samples: table.len(),
                },
                entries,
            );
            on_site_done(site);
        }

        Ok(stats)
    }
}
