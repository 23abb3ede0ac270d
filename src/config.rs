//! `clima.toml` file configuration: `[download]` and `[analysis]` sections.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "clima.toml";

/// Top-level clima configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimaConfig {
    /// Acquisition settings.
    #[serde(default)]
    pub download: DownloadToml,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisToml,
}

/// Load `path`, or `./clima.toml` when it exists, or the built-in defaults.
pub fn load(path: Option<&Path>) -> Result<ClimaConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                debug!("no config file, using defaults");
                return Ok(ClimaConfig::default());
            }
            fallback
        }
    };
    let toml_str = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: ClimaConfig = toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadToml {
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// `[north, west, south, east]` in degrees.
    #[serde(default = "default_area")]
    pub area: [f64; 4],
    #[serde(default = "default_variables")]
    pub variables: Vec<String>,
    #[serde(default = "default_download_experiments")]
    pub experiments: Vec<String>,
    /// `[start, end]`, inclusive.
    #[serde(default = "default_historical_years")]
    pub historical: [i32; 2],
    /// `[start, end]`, inclusive.
    #[serde(default = "default_scenario_years")]
    pub scenario: [i32; 2],
    #[serde(default = "default_data_dir")]
    pub output_base: PathBuf,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: f64,
    #[serde(default = "default_max_poll_interval_secs")]
    pub max_poll_interval_secs: f64,
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for DownloadToml {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            model: default_model(),
            area: default_area(),
            variables: default_variables(),
            experiments: default_download_experiments(),
            historical: default_historical_years(),
            scenario: default_scenario_years(),
            output_base: default_data_dir(),
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_interval_secs: default_max_poll_interval_secs(),
            fail_fast: false,
        }
    }
}

fn default_dataset() -> String {
    "projections-cmip6".to_string()
}
fn default_model() -> String {
    "ipsl_cm6a_lr".to_string()
}
fn default_area() -> [f64; 4] {
    [0.25, -94.68, -23.09, -71.04]
}
fn default_variables() -> Vec<String> {
    vec![
        "near_surface_air_temperature".to_string(),
        "near_surface_wind_speed".to_string(),
    ]
}
fn default_download_experiments() -> Vec<String> {
    vec![
        "historical".to_string(),
        "ssp1_2_6".to_string(),
        "ssp5_8_5".to_string(),
    ]
}
fn default_historical_years() -> [i32; 2] {
    [1980, 2014]
}
fn default_scenario_years() -> [i32; 2] {
    [2015, 2049]
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_poll_interval_secs() -> f64 {
    2.0
}
fn default_max_poll_interval_secs() -> f64 {
    60.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisToml {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Scenario experiments compared against the historical run.
    #[serde(default = "default_analysis_experiments")]
    pub experiments: Vec<String>,
    #[serde(default = "default_return_periods")]
    pub return_periods: Vec<u32>,
    /// Variables aggregated by sum; replaces the built-in list when set.
    #[serde(default)]
    pub accumulative: Option<Vec<String>>,
    #[serde(default = "default_wind_sectors")]
    pub wind_sectors: usize,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Extra variable aliases, merged over the built-in table.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Default for AnalysisToml {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            experiments: default_analysis_experiments(),
            return_periods: default_return_periods(),
            accumulative: None,
            wind_sectors: default_wind_sectors(),
            width: default_width(),
            height: default_height(),
            aliases: BTreeMap::new(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("img")
}
fn default_analysis_experiments() -> Vec<String> {
    vec!["ssp1_2_6".to_string(), "ssp5_8_5".to_string()]
}
fn default_return_periods() -> Vec<u32> {
    clima_extremes::DEFAULT_RETURN_PERIODS.to_vec()
}
fn default_wind_sectors() -> usize {
    16
}
fn default_width() -> u32 {
    1600
}
fn default_height() -> u32 {
    1000
}
