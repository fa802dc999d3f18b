use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub sheet_name: String,
    pub output_path: PathBuf,
    pub report_title: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            data_dir: env::var("MET_DATA_DIR")
                .unwrap_or_else(|_| "/mnt/h/Paper_work".to_string())
                .into(),
            sheet_name: env::var("MET_SHEET_NAME").unwrap_or_else(|_| "Sheet1".to_string()),
            output_path: env::var("MET_OUTPUT_PATH")
                .unwrap_or_else(|_| "all_met.xlsx".to_string())
                .into(),
            report_title: env::var("MET_REPORT_TITLE")
                .ok()
                .filter(|t| !t.trim().is_empty()),
        }
    }
}
