use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use met_skill_stats::config::Config;
use met_skill_stats::report::StatsWriter;
use met_skill_stats::services::{PipelineError, StatisticsService, StatisticsTable};
use met_skill_stats::sites::{find_site, Site, SITE_REGISTRY};

#[derive(Parser, Debug)]
#[command(name = "met-skill-stats")]
#[command(about = "Compute observed vs modeled skill statistics for each site and write them to xlsx", long_about = None)]
struct Cli {
    /// Directory holding the site workbooks (overrides MET_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Sheet to read from every site workbook (overrides MET_SHEET_NAME)
    #[arg(long)]
    sheet: Option<String>,

    /// Output workbook path (overrides MET_OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Title written above the statistics (overrides MET_REPORT_TITLE)
    #[arg(long)]
    title: Option<String>,

    /// Only process these site codes (e.g. --site bei --site kar)
    #[arg(long = "site")]
    sites: Vec<String>,

    /// Fail instead of replacing an existing output file
    #[arg(long)]
    no_overwrite: bool,

    /// Also print the statistics as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn selected_sites(codes: &[String]) -> Result<Vec<Site>, PipelineError> {
    if codes.is_empty() {
        return Ok(SITE_REGISTRY.to_vec());
    }
    codes
        .iter()
        .map(|code| {
            find_site(code)
                .copied()
                .ok_or_else(|| PipelineError::UnknownSite(code.clone()))
        })
        .collect()
}

#[instrument(skip(cli, config))]
fn run(cli: &Cli, config: &Config) -> Result<StatisticsTable, PipelineError> {
    let sites = selected_sites(&cli.sites)?;
    let service = StatisticsService::new(&config.data_dir, config.sheet_name.clone());

    let pb = ProgressBar::new(sites.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let stats = service.run_with(&sites, |site| {
        pb.set_message(site.name.to_string());
        pb.inc(1);
    })?;
    pb.finish_with_message("done");

    StatsWriter::new(&config.output_path)
        .overwrite(!cli.no_overwrite)
        .title(config.report_title.clone())
        .write(&stats)?;

    Ok(stats)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,met_skill_stats=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(sheet) = &cli.sheet {
        config.sheet_name = sheet.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if cli.title.is_some() {
        config.report_title = cli.title.clone();
    }
    info!("Starting statistics run with config: {:?}", config);

    let stats = run(&cli, &config)?;
    info!(
        "Finished: {} statistics for {} sites written to {}",
        stats.len(),
        stats.sites().len(),
        config.output_path.display()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}
