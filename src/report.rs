//! JSON summary of every analysis product.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use clima_climatology::{AnnualValue, MonthlyClimatology};

/// Written to `<output>/<variable>_summary.json`. Missing values are `null`.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub variable: String,
    pub units: Option<String>,
    /// `"sum"` or `"mean"`.
    pub aggregation: &'static str,
    pub historical: SeriesSummary,
    pub scenarios: Vec<ScenarioSummary>,
    /// Percent per sector, clockwise from north, keyed by experiment.
    pub wind_rose: BTreeMap<String, Vec<f64>>,
    /// Return period (years) -> level, keyed by experiment.
    pub return_levels: BTreeMap<String, BTreeMap<u32, f64>>,
}

#[derive(Debug, Serialize)]
pub struct SeriesSummary {
    pub experiment: String,
    pub file: PathBuf,
    pub monthly_climatology: [f64; 12],
    pub annual: Vec<YearValue>,
    pub annual_mean: f64,
}

#[derive(Debug, Serialize)]
pub struct ScenarioSummary {
    #[serde(flatten)]
    pub series: SeriesSummary,
    pub monthly_anomaly: [f64; 12],
    pub annual_anomaly: Vec<YearValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

pub fn year_values(annual: &[AnnualValue]) -> Vec<YearValue> {
    annual
        .iter()
        .map(|a| YearValue {
            year: a.year,
            value: a.value,
        })
        .collect()
}

pub fn months(clim: &MonthlyClimatology) -> [f64; 12] {
    *clim.values()
}

pub fn summary_path(output_dir: &Path, variable: &str) -> PathBuf {
    output_dir.join(format!("{variable}_summary.json"))
}

pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write summary: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_serializes_as_null_and_scenarios_flatten() {
        let mut clim = [1.0; 12];
        clim[1] = f64::NAN;
        let series = SeriesSummary {
            experiment: "ssp5_8_5".to_string(),
            file: PathBuf::from("data/projecao/x.nc"),
            monthly_climatology: clim,
            annual: vec![YearValue {
                year: 2015,
                value: 2.0,
            }],
            annual_mean: 2.0,
        };
        let scenario = ScenarioSummary {
            series,
            monthly_anomaly: [0.5; 12],
            annual_anomaly: Vec::new(),
        };
        let value = serde_json::to_value(&scenario).unwrap();
        assert_eq!(value["experiment"], "ssp5_8_5");
        assert!(value["monthly_climatology"][1].is_null());
        assert_eq!(value["annual"][0]["year"], 2015);
        assert_eq!(value["monthly_anomaly"][0], 0.5);
    }

    #[test]
    fn summary_file_name() {
        assert_eq!(
            summary_path(Path::new("img"), "tas"),
            PathBuf::from("img/tas_summary.json")
        );
    }
}
