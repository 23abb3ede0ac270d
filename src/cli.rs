//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Download CMIP6 projections and chart their climatology.
#[derive(Parser)]
#[command(
    name = "clima",
    version,
    about = "Download CMIP6 projections and chart climatology, anomalies and return levels"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (default: ./clima.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Retrieve model output from the Climate Data Store.
    Download(DownloadArgs),
    /// Chart climatology, anomalies and return levels from downloaded files.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `download` subcommand. Unset options fall back to the
/// `[download]` config section.
#[derive(clap::Args)]
pub struct DownloadArgs {
    /// Variables to request.
    #[arg(long, num_args = 1..)]
    pub variables: Vec<String>,

    /// Experiments to request (e.g. historical ssp1_2_6 ssp5_8_5).
    #[arg(long, num_args = 1..)]
    pub experiments: Vec<String>,

    /// Bounding box as NORTH WEST SOUTH EAST in degrees.
    #[arg(
        long,
        num_args = 4,
        value_names = ["NORTH", "WEST", "SOUTH", "EAST"],
        allow_negative_numbers = true
    )]
    pub area: Option<Vec<f64>>,

    /// Climate model id.
    #[arg(long)]
    pub model: Option<String>,

    /// First year of the historical experiment.
    #[arg(long)]
    pub historical_start: Option<i32>,

    /// Last year of the historical experiment.
    #[arg(long)]
    pub historical_end: Option<i32>,

    /// First year of every scenario experiment.
    #[arg(long)]
    pub scenario_start: Option<i32>,

    /// Last year of every scenario experiment.
    #[arg(long)]
    pub scenario_end: Option<i32>,

    /// Root directory for downloaded files.
    #[arg(short, long)]
    pub output_base: Option<PathBuf>,

    /// Archive dataset name.
    #[arg(long)]
    pub dataset: Option<String>,

    /// Stop at the first failed retrieval.
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Variable to analyze (e.g. near_surface_air_temperature).
    #[arg(long)]
    pub variable: String,

    /// Historical file; discovered under the data directory if omitted.
    #[arg(long)]
    pub historical_file: Option<PathBuf>,

    /// Scenario file as EXPERIMENT=PATH. Repeatable.
    #[arg(long = "scenario-file", value_parser = parse_scenario_file)]
    pub scenario_files: Vec<(String, PathBuf)>,

    /// Scenario experiments to compare against the historical run.
    #[arg(long, num_args = 1..)]
    pub experiments: Vec<String>,

    /// Directory holding the historico/ and projecao/ folders.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for charts and the JSON summary.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Return periods in years.
    #[arg(long, num_args = 1..)]
    pub return_periods: Vec<u32>,
}

/// Parse `EXPERIMENT=PATH`.
fn parse_scenario_file(s: &str) -> Result<(String, PathBuf), String> {
    let (experiment, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected EXPERIMENT=PATH, got {s:?}"))?;
    let experiment = experiment.trim();
    if experiment.is_empty() || path.is_empty() {
        return Err(format!("expected EXPERIMENT=PATH, got {s:?}"));
    }
    Ok((experiment.to_string(), PathBuf::from(path)))
}
