pub mod statistics_service;

pub use statistics_service::{
    PipelineError, SiteSummary, StatEntry, StatisticsService, StatisticsTable,
};
