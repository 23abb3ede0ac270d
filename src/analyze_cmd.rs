//! Analyze command: climatology, anomalies, wind rose and return levels for
//! one variable across the historical run and each scenario.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use clima_climatology::{
    Aggregation, AggregationPolicy, AnnualValue, MonthlyClimatology, WindRose, annual_aggregate,
    annual_anomaly, annual_maxima, monthly_anomaly, monthly_climatology, series_mean,
    wind_direction,
};
use clima_extremes::return_levels;
use clima_fetch::ExperimentKind;
use clima_io::{ReaderConfig, Series, discover, read_series, read_wind_components};
use clima_plot::{
    ChartSink, HLine, LineChart, LineSeries, LineStyle, PngRenderer, Rgb, WindRoseChart,
    WindRosePanel, series_color,
};

use crate::cli::AnalyzeArgs;
use crate::config::ClimaConfig;
use crate::convert;
use crate::report::{self, ScenarioSummary, SeriesSummary, Summary};

const HISTORICAL: &str = "historical";
const ZERO_LINE: Rgb = Rgb(0, 0, 0);

/// Resolved inputs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub variable: String,
    pub historical_file: Option<PathBuf>,
    /// Explicit `(experiment, path)` pairs; the last one wins per experiment.
    pub scenario_files: Vec<(String, PathBuf)>,
    pub experiments: Vec<String>,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub return_periods: Vec<u32>,
    pub wind_sectors: usize,
    pub reader: ReaderConfig,
    pub policy: AggregationPolicy,
}

/// Run the analysis and render PNG charts.
pub fn run(args: AnalyzeArgs, config: &ClimaConfig) -> Result<()> {
    let _cmd = info_span!("analyze", variable = %args.variable).entered();
    let settings = convert::build_analysis_settings(&config.analysis, &args)?;
    let mut renderer =
        PngRenderer::default().with_size(config.analysis.width, config.analysis.height);

    let written = execute(&settings, &mut renderer)?;
    info!(
        n_files = written.len(),
        dir = %settings.output_dir.display(),
        "analysis complete"
    );
    Ok(())
}

/// Per-experiment aggregates.
struct Products {
    experiment: String,
    path: PathBuf,
    climatology: MonthlyClimatology,
    annual: Vec<AnnualValue>,
    annual_mean: f64,
    /// Finite annual maxima, for GEV fitting.
    maxima: Vec<f64>,
}

impl Products {
    fn compute(experiment: &str, path: &Path, series: &Series, aggregation: Aggregation) -> Result<Self> {
        let (dates, values) = (series.dates(), series.values());
        let climatology = monthly_climatology(dates, values, aggregation)
            .with_context(|| format!("monthly climatology failed for {experiment}"))?;
        let annual = annual_aggregate(dates, values, aggregation)
            .with_context(|| format!("annual aggregation failed for {experiment}"))?;
        let maxima = annual_maxima(dates, values)
            .with_context(|| format!("annual maxima failed for {experiment}"))?
            .into_iter()
            .map(|a| a.value)
            .filter(|v| v.is_finite())
            .collect();
        let annual_mean = series_mean(&annual);
        debug!(experiment, years = annual.len(), annual_mean, "aggregated");

        Ok(Self {
            experiment: experiment.to_string(),
            path: path.to_path_buf(),
            climatology,
            annual,
            annual_mean,
            maxima,
        })
    }

    fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            experiment: self.experiment.clone(),
            file: self.path.clone(),
            monthly_climatology: report::months(&self.climatology),
            annual: report::year_values(&self.annual),
            annual_mean: self.annual_mean,
        }
    }
}

/// A scenario's aggregates and its departures from the historical run.
struct Scenario {
    products: Products,
    monthly_anomaly: MonthlyClimatology,
    annual_anomaly: Vec<AnnualValue>,
}

/// Load every input, compute the products and hand each chart to `sink`.
///
/// Returns the paths of the charts and summary written.
pub fn execute(settings: &AnalysisSettings, sink: &mut dyn ChartSink) -> Result<Vec<PathBuf>> {
    let variable = settings.variable.as_str();
    let aggregation = settings.policy.for_variable(variable);
    info!(variable, aggregation = aggregation.name(), "aggregation policy");

    // 1. Historical baseline
    let hist_path = resolve_historical(settings)?;
    let hist_series = read_series(&hist_path, variable, &settings.reader)
        .with_context(|| format!("failed to read {variable} from {}", hist_path.display()))?;
    let axis = hist_series.axis_label();
    let historical = Products::compute(HISTORICAL, &hist_path, &hist_series, aggregation)?;

    // 2. Scenarios
    let mut scenarios = Vec::new();
    for experiment in experiment_order(settings) {
        let Some(path) = resolve_scenario(settings, &experiment) else {
            warn!(experiment = %experiment, variable, "no file found, skipping experiment");
            continue;
        };
        let series = read_series(&path, variable, &settings.reader)
            .with_context(|| format!("failed to read {variable} from {}", path.display()))?;
        let products = Products::compute(&experiment, &path, &series, aggregation)?;
        scenarios.push(Scenario {
            monthly_anomaly: monthly_anomaly(&products.climatology, &historical.climatology),
            annual_anomaly: annual_anomaly(&products.annual, historical.annual_mean),
            products,
        });
    }
    if scenarios.is_empty() {
        bail!(
            "no scenario file found for {variable} (experiments: {})",
            experiment_order(settings).join(", ")
        );
    }

    // 3. Optional products
    let all: Vec<&Products> = std::iter::once(&historical)
        .chain(scenarios.iter().map(|s| &s.products))
        .collect();
    let roses = wind_roses(settings, &all)?;
    let levels = fit_return_levels(&settings.return_periods, &all);

    // 4. Charts
    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!("failed to create output dir: {}", settings.output_dir.display())
    })?;
    let chart_path = |name: &str| settings.output_dir.join(format!("{variable}_{name}.png"));
    let mut written = Vec::new();

    let charts = [
        ("monthly_climatology", climatology_chart(variable, &axis, &all)),
        ("annual_series", annual_chart(variable, &axis, &all)),
        ("monthly_anomalies", monthly_anomaly_chart(variable, &axis, &scenarios)),
        ("annual_anomalies", annual_anomaly_chart(variable, &axis, &scenarios)),
    ];
    for (name, chart) in charts {
        let path = chart_path(name);
        sink.line_chart(&chart, &path)
            .with_context(|| format!("failed to draw {}", path.display()))?;
        written.push(path);
    }

    if roses.is_empty() {
        warn!(variable, "no input has u/v wind components, skipping wind rose");
    } else {
        let path = chart_path("wind_rose");
        sink.wind_rose(&wind_rose_chart(variable, &roses), &path)
            .with_context(|| format!("failed to draw {}", path.display()))?;
        written.push(path);
    }

    if levels.is_empty() {
        warn!(variable, "no series could be fitted, skipping return levels");
    } else {
        let path = chart_path("return_levels");
        sink.line_chart(&return_level_chart(variable, &axis, &levels), &path)
            .with_context(|| format!("failed to draw {}", path.display()))?;
        written.push(path);
    }

    // 5. Summary
    let summary = Summary {
        variable: variable.to_string(),
        units: hist_series.units().map(str::to_string),
        aggregation: aggregation.name(),
        historical: historical.summary(),
        scenarios: scenarios
            .iter()
            .map(|s| ScenarioSummary {
                series: s.products.summary(),
                monthly_anomaly: report::months(&s.monthly_anomaly),
                annual_anomaly: report::year_values(&s.annual_anomaly),
            })
            .collect(),
        wind_rose: roses
            .iter()
            .map(|(exp, rose)| (exp.clone(), rose.frequencies().to_vec()))
            .collect(),
        return_levels: levels,
    };
    let summary_path = report::summary_path(&settings.output_dir, variable);
    report::write_summary(&summary_path, &summary)?;
    written.push(summary_path);

    Ok(written)
}

fn resolve_historical(settings: &AnalysisSettings) -> Result<PathBuf> {
    if let Some(path) = &settings.historical_file {
        return Ok(path.clone());
    }
    let folder = settings.data_dir.join(ExperimentKind::Historical.subdir());
    match discover(&folder, HISTORICAL, &settings.variable) {
        Some(path) => Ok(path),
        None => bail!(
            "no historical file for {} in {} (pass --historical-file)",
            settings.variable,
            folder.display()
        ),
    }
}

fn resolve_scenario(settings: &AnalysisSettings, experiment: &str) -> Option<PathBuf> {
    settings
        .scenario_files
        .iter()
        .rev()
        .find(|(e, _)| e == experiment)
        .map(|(_, p)| p.clone())
        .or_else(|| {
            let folder = settings.data_dir.join(ExperimentKind::of(experiment).subdir());
            discover(&folder, experiment, &settings.variable)
        })
}

/// Configured experiments, then any extra `--scenario-file` keys, without
/// repeats or the historical run.
fn experiment_order(settings: &AnalysisSettings) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let extra = settings.scenario_files.iter().map(|(e, _)| e);
    for experiment in settings.experiments.iter().chain(extra) {
        if ExperimentKind::of(experiment) == ExperimentKind::Historical {
            debug!("historical listed as a scenario, ignoring");
            continue;
        }
        if !order.contains(experiment) {
            order.push(experiment.clone());
        }
    }
    order
}

/// Wind roses for every input that carries u/v components.
fn wind_roses(settings: &AnalysisSettings, inputs: &[&Products]) -> Result<Vec<(String, WindRose)>> {
    let mut roses = Vec::new();
    for p in inputs {
        let wind = match read_wind_components(&p.path, &settings.reader) {
            Ok(Some(wind)) => wind,
            Ok(None) => continue,
            Err(e) => {
                warn!(experiment = %p.experiment, error = %e, "could not read wind components");
                continue;
            }
        };
        let directions = wind_direction(&wind.u, &wind.v)?;
        if let Some(rose) = WindRose::from_directions(&directions, settings.wind_sectors)? {
            debug!(experiment = %p.experiment, n = rose.count(), "wind rose");
            roses.push((p.experiment.clone(), rose));
        }
    }
    Ok(roses)
}

/// GEV return levels per experiment; series whose fit fails are left out.
fn fit_return_levels(periods: &[u32], inputs: &[&Products]) -> BTreeMap<String, BTreeMap<u32, f64>> {
    let mut levels = BTreeMap::new();
    if periods.is_empty() {
        debug!("no return periods requested");
        return levels;
    }
    for p in inputs {
        match return_levels(&p.maxima, periods) {
            Ok(map) => {
                levels.insert(p.experiment.clone(), map);
            }
            Err(e) => {
                warn!(experiment = %p.experiment, error = %e, "GEV fit failed, skipping series");
            }
        }
    }
    levels
}

// ---------------------------------------------------------------------------
// Chart builders
// ---------------------------------------------------------------------------

fn climatology_chart(variable: &str, axis: &str, inputs: &[&Products]) -> LineChart {
    inputs.iter().fold(
        LineChart::new(format!("Monthly climatology: {variable}"), "Month", axis)
            .with_integer_x(12),
        |chart, p| chart.with_series(monthly_line(&p.experiment, &p.climatology)),
    )
}

/// Annual aggregates, each with a dashed line at its period mean.
fn annual_chart(variable: &str, axis: &str, inputs: &[&Products]) -> LineChart {
    let mut chart =
        LineChart::new(format!("Annual series: {variable}"), "Year", axis).with_integer_x(10);
    for p in inputs {
        chart = chart.with_series(annual_line(&p.experiment, &p.annual));
        let years = p.annual.iter().filter(|a| a.value.is_finite()).map(|a| a.year);
        if let (Some(first), Some(last)) = (years.clone().min(), years.max()) {
            let mean = vec![
                (f64::from(first), p.annual_mean),
                (f64::from(last), p.annual_mean),
            ];
            chart = chart.with_series(
                LineSeries::new(
                    format!("{} mean", p.experiment),
                    mean,
                    series_color(&p.experiment),
                )
                .dashed()
                .without_markers(),
            );
        }
    }
    chart
}

fn monthly_anomaly_chart(variable: &str, axis: &str, scenarios: &[Scenario]) -> LineChart {
    scenarios.iter().fold(
        LineChart::new(
            format!("Monthly anomaly vs historical: {variable}"),
            "Month",
            format!("{axis} anomaly"),
        )
        .with_integer_x(12)
        .with_hline(zero_line()),
        |chart, s| chart.with_series(monthly_line(&s.products.experiment, &s.monthly_anomaly)),
    )
}

fn annual_anomaly_chart(variable: &str, axis: &str, scenarios: &[Scenario]) -> LineChart {
    scenarios.iter().fold(
        LineChart::new(
            format!("Annual anomaly vs historical mean: {variable}"),
            "Year",
            format!("{axis} anomaly"),
        )
        .with_integer_x(10)
        .with_hline(zero_line()),
        |chart, s| chart.with_series(annual_line(&s.products.experiment, &s.annual_anomaly)),
    )
}

fn return_level_chart(
    variable: &str,
    axis: &str,
    levels: &BTreeMap<String, BTreeMap<u32, f64>>,
) -> LineChart {
    let ticks = levels.values().map(BTreeMap::len).max().unwrap_or(0).max(2);
    levels.iter().fold(
        LineChart::new(
            format!("GEV return levels of annual maxima: {variable}"),
            "Return period (years)",
            axis,
        )
        .with_integer_x(ticks),
        |chart, (experiment, map)| {
            let points = map.iter().map(|(&t, &v)| (f64::from(t), v)).collect();
            chart.with_series(LineSeries::new(
                experiment.as_str(),
                points,
                series_color(experiment),
            ))
        },
    )
}

fn wind_rose_chart(variable: &str, roses: &[(String, WindRose)]) -> WindRoseChart {
    WindRoseChart {
        title: format!("Wind rose ({variable} files)"),
        panels: roses
            .iter()
            .map(|(experiment, rose)| WindRosePanel {
                label: experiment.clone(),
                frequencies: rose.frequencies().to_vec(),
                color: series_color(experiment),
            })
            .collect(),
    }
}

fn monthly_line(experiment: &str, clim: &MonthlyClimatology) -> LineSeries {
    let points = clim.iter().map(|(m, v)| (f64::from(m), v)).collect();
    LineSeries::new(experiment, points, series_color(experiment))
}

fn annual_line(experiment: &str, annual: &[AnnualValue]) -> LineSeries {
    let points = annual.iter().map(|a| (f64::from(a.year), a.value)).collect();
    LineSeries::new(experiment, points, series_color(experiment))
}

fn zero_line() -> HLine {
    HLine {
        value: 0.0,
        color: ZERO_LINE,
        style: LineStyle::Solid,
        label: None,
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;
    use clima_plot::PlotError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tempfile::tempdir;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<(PathBuf, LineChart)>,
        roses: Vec<(PathBuf, WindRoseChart)>,
    }

    impl RecordingSink {
        fn file_names(&self) -> Vec<String> {
            self.lines
                .iter()
                .map(|(p, _)| p)
                .chain(self.roses.iter().map(|(p, _)| p))
                .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
                .collect()
        }

        fn line(&self, suffix: &str) -> &LineChart {
            self.lines
                .iter()
                .find(|(p, _)| p.to_string_lossy().ends_with(suffix))
                .map(|(_, c)| c)
                .unwrap()
        }
    }

    impl ChartSink for RecordingSink {
        fn line_chart(&mut self, chart: &LineChart, path: &Path) -> Result<(), PlotError> {
            self.lines.push((path.to_path_buf(), chart.clone()));
            Ok(())
        }

        fn wind_rose(&mut self, chart: &WindRoseChart, path: &Path) -> Result<(), PlotError> {
            self.roses.push((path.to_path_buf(), chart.clone()));
            Ok(())
        }
    }

    const VAR: &str = "near_surface_air_temperature";

    /// Daily `tas` in Kelvin on a noleap 1x2 grid: a seasonal cycle peaking
    /// in July, a per-year offset, and daily noise. Optionally adds a steady
    /// westerly `uas`/`vas` pair.
    fn write_tas(
        dir: &Path,
        name: &str,
        start_year: i32,
        years: usize,
        offset: f64,
        with_wind: bool,
        rng: &mut StdRng,
    ) -> PathBuf {
        let nt = years * 365;
        let path = dir.join(name);
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("time", nt).unwrap();
        file.add_dimension("lat", 1).unwrap();
        file.add_dimension("lon", 2).unwrap();
        {
            let mut var = file.add_variable::<f64>("time", &["time"]).unwrap();
            var.put_attribute("units", format!("days since {start_year}-01-01").as_str())
                .unwrap();
            var.put_attribute("calendar", "noleap").unwrap();
            let time: Vec<f64> = (0..nt).map(|t| t as f64 + 0.5).collect();
            var.put_values(&time, ..).unwrap();
        }

        let mut tas = Vec::with_capacity(nt * 2);
        let mut bump = 0.0;
        for t in 0..nt {
            if t % 365 == 0 {
                bump = rng.random::<f64>() * 2.0;
            }
            let doy = (t % 365) as f64;
            let v = 288.15
                + offset
                + bump
                + 10.0 * (2.0 * PI * (doy - 105.0) / 365.0).sin()
                + rng.random::<f64>()
                - 0.5;
            tas.extend([v, v]);
        }
        let mut var = file
            .add_variable::<f64>("tas", &["time", "lat", "lon"])
            .unwrap();
        var.put_attribute("units", "K").unwrap();
        var.put_values(&tas, ..).unwrap();

        if with_wind {
            for (name, value) in [("uas", 3.0), ("vas", 0.0)] {
                let mut var = file
                    .add_variable::<f64>(name, &["time", "lat", "lon"])
                    .unwrap();
                var.put_attribute("units", "m s-1").unwrap();
                var.put_values(&vec![value; nt * 2], ..).unwrap();
            }
        }
        path
    }

    fn settings(data_dir: &Path, output_dir: &Path) -> AnalysisSettings {
        AnalysisSettings {
            variable: VAR.to_string(),
            historical_file: None,
            scenario_files: Vec::new(),
            experiments: vec!["ssp1_2_6".to_string(), "ssp5_8_5".to_string()],
            data_dir: data_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            return_periods: vec![10, 20, 50],
            wind_sectors: 16,
            reader: ReaderConfig::default(),
            policy: AggregationPolicy::default(),
        }
    }

    #[test]
    fn temperature_run_without_wind() {
        let dir = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let hist = write_tas(dir.path(), "hist.nc", 1980, 35, 0.0, false, &mut rng);
        let scen = write_tas(dir.path(), "scen.nc", 2015, 35, 2.0, false, &mut rng);

        let out = dir.path().join("img");
        let mut s = settings(dir.path(), &out);
        s.historical_file = Some(hist);
        s.experiments = vec!["ssp5_8_5".to_string()];
        s.scenario_files = vec![("ssp5_8_5".to_string(), scen)];

        let mut sink = RecordingSink::default();
        let written = execute(&s, &mut sink).unwrap();

        let names = sink.file_names();
        for chart in [
            "monthly_climatology",
            "annual_series",
            "monthly_anomalies",
            "annual_anomalies",
            "return_levels",
        ] {
            assert!(names.contains(&format!("{VAR}_{chart}.png")), "{chart} missing");
        }
        assert!(sink.roses.is_empty());
        assert!(!names.iter().any(|n| n.contains("wind_rose")));

        let clim = sink.line("monthly_climatology.png");
        assert!(clim.y_label.contains("degC"));
        let hist_line = clim
            .series
            .iter()
            .find(|l| l.label == "historical")
            .unwrap();
        let jan = hist_line.points[0].1;
        let jul = hist_line.points[6].1;
        assert!(jul > jan + 10.0, "jan={jan} jul={jul}");
        let mean = hist_line.points.iter().map(|p| p.1).sum::<f64>() / 12.0;
        assert_abs_diff_eq!(mean, 16.0, epsilon = 1.0);

        let anomalies = sink.line("monthly_anomalies.png");
        assert_eq!(anomalies.hlines.len(), 1);
        assert_eq!(anomalies.series.len(), 1);
        for &(_, v) in &anomalies.series[0].points {
            assert_abs_diff_eq!(v, 2.0, epsilon = 0.6);
        }

        let summary_path = out.join(format!("{VAR}_summary.json"));
        assert!(written.contains(&summary_path));
        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
        assert_eq!(summary["units"], "degC");
        assert_eq!(summary["aggregation"], "mean");
        assert_eq!(summary["scenarios"][0]["experiment"], "ssp5_8_5");
        assert_eq!(summary["historical"]["annual"].as_array().unwrap().len(), 35);
        assert!(summary["wind_rose"].as_object().unwrap().is_empty());
    }

    #[test]
    fn monthly_anomaly_is_scenario_minus_historical() {
        let dir = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let hist = write_tas(dir.path(), "hist.nc", 1980, 10, 0.0, false, &mut rng);
        let scen = write_tas(dir.path(), "scen.nc", 2015, 10, 1.0, false, &mut rng);

        let mut s = settings(dir.path(), &dir.path().join("out"));
        s.historical_file = Some(hist);
        s.experiments.clear();
        s.scenario_files = vec![("ssp1_2_6".to_string(), scen)];

        let mut sink = RecordingSink::default();
        execute(&s, &mut sink).unwrap();

        let clim = sink.line("monthly_climatology.png");
        let anomaly = sink.line("monthly_anomalies.png");
        let by_label = |label: &str| {
            clim.series
                .iter()
                .find(|l| l.label == label)
                .map(|l| l.points.clone())
                .unwrap()
        };
        let (h, sc) = (by_label("historical"), by_label("ssp1_2_6"));
        for m in 0..12 {
            assert_abs_diff_eq!(anomaly.series[0].points[m].1, sc[m].1 - h[m].1, epsilon = 1e-9);
        }
    }

    #[test]
    fn discovers_files_and_draws_wind_rose() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let hist_dir = data.join("historico");
        let proj_dir = data.join("projecao");
        fs::create_dir_all(&hist_dir).unwrap();
        fs::create_dir_all(&proj_dir).unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        write_tas(
            &hist_dir,
            &format!("historical_{VAR}_1980-1989_ipsl_cm6a_lr.nc"),
            1980,
            10,
            0.0,
            true,
            &mut rng,
        );
        write_tas(
            &proj_dir,
            &format!("ssp1_2_6_{VAR}_2015-2024_ipsl_cm6a_lr.nc"),
            2015,
            10,
            1.0,
            false,
            &mut rng,
        );

        let mut sink = RecordingSink::default();
        execute(&settings(&data, &dir.path().join("img")), &mut sink).unwrap();

        // ssp5_8_5 has no file and is skipped
        let clim = sink.line("monthly_climatology.png");
        let labels: Vec<&str> = clim.series.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["historical", "ssp1_2_6"]);

        assert_eq!(sink.roses.len(), 1);
        let (path, rose) = &sink.roses[0];
        assert!(path.ends_with(format!("{VAR}_wind_rose.png")));
        assert_eq!(rose.panels.len(), 1);
        assert_eq!(rose.panels[0].label, "historical");
        // Steady westerly: everything in the sector starting at 270 degrees.
        assert_abs_diff_eq!(rose.panels[0].frequencies[12], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_historical_is_an_error() {
        let dir = tempdir().unwrap();
        let mut sink = RecordingSink::default();
        let err = execute(&settings(dir.path(), &dir.path().join("img")), &mut sink).unwrap_err();
        assert!(err.to_string().contains("no historical file"), "{err:#}");
        assert!(sink.lines.is_empty());
    }

    #[test]
    fn no_scenarios_is_an_error() {
        let dir = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let hist = write_tas(dir.path(), "hist.nc", 1980, 5, 0.0, false, &mut rng);
        let mut s = settings(dir.path(), &dir.path().join("img"));
        s.historical_file = Some(hist);

        let mut sink = RecordingSink::default();
        let err = execute(&s, &mut sink).unwrap_err();
        assert!(err.to_string().contains("no scenario file"), "{err:#}");
    }

    #[test]
    fn experiment_order_appends_extra_scenario_files() {
        let mut s = settings(Path::new("data"), Path::new("img"));
        s.experiments.push("historical".to_string());
        s.scenario_files = vec![
            ("ssp5_8_5".to_string(), PathBuf::from("a.nc")),
            ("ssp2_4_5".to_string(), PathBuf::from("b.nc")),
        ];
        assert_eq!(experiment_order(&s), ["ssp1_2_6", "ssp5_8_5", "ssp2_4_5"]);
        assert_eq!(resolve_scenario(&s, "ssp2_4_5"), Some(PathBuf::from("b.nc")));
    }
}
