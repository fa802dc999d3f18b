pub mod config;
pub mod importers;
pub mod metrics;
pub mod model;
pub mod report;
pub mod services;
pub mod sites;
pub mod utils;
