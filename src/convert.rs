//! Pure conversion functions: TOML config structs and CLI overrides -> crate
//! API config types.

use std::time::Duration;

use anyhow::{Result, bail};

use clima_climatology::AggregationPolicy;
use clima_fetch::{BoundingBox, DownloadSettings, FailurePolicy, PollSettings, YearRange};
use clima_io::ReaderConfig;

use crate::analyze_cmd::AnalysisSettings;
use crate::cli::{AnalyzeArgs, DownloadArgs};
use crate::config::{AnalysisToml, DownloadToml};

/// Builds [`DownloadSettings`] from the `[download]` section, with any CLI
/// option taking precedence. Validation happens when the plan is built.
pub fn build_download_settings(toml: &DownloadToml, args: &DownloadArgs) -> Result<DownloadSettings> {
    let area = match args.area.as_deref() {
        Some(&[north, west, south, east]) => BoundingBox {
            north,
            west,
            south,
            east,
        },
        Some(other) => bail!("--area takes 4 values, got {}", other.len()),
        None => {
            let [north, west, south, east] = toml.area;
            BoundingBox {
                north,
                west,
                south,
                east,
            }
        }
    };

    Ok(DownloadSettings {
        dataset: args.dataset.clone().unwrap_or_else(|| toml.dataset.clone()),
        model: args.model.clone().unwrap_or_else(|| toml.model.clone()),
        area,
        variables: or_config(&args.variables, &toml.variables),
        experiments: or_config(&args.experiments, &toml.experiments),
        historical: YearRange {
            start: args.historical_start.unwrap_or(toml.historical[0]),
            end: args.historical_end.unwrap_or(toml.historical[1]),
        },
        scenario: YearRange {
            start: args.scenario_start.unwrap_or(toml.scenario[0]),
            end: args.scenario_end.unwrap_or(toml.scenario[1]),
        },
        output_base: args
            .output_base
            .clone()
            .unwrap_or_else(|| toml.output_base.clone()),
    })
}

/// Builds [`PollSettings`] from the `[download]` section.
pub fn build_poll_settings(toml: &DownloadToml) -> Result<PollSettings> {
    let interval = positive_secs("poll_interval_secs", toml.poll_interval_secs)?;
    let max_interval = positive_secs("max_poll_interval_secs", toml.max_poll_interval_secs)?;
    if max_interval < interval {
        bail!(
            "max_poll_interval_secs ({}) is below poll_interval_secs ({})",
            toml.max_poll_interval_secs,
            toml.poll_interval_secs
        );
    }
    Ok(PollSettings {
        interval,
        max_interval,
    })
}

fn positive_secs(name: &str, secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => bail!("{name} must be a positive number of seconds, got {secs}"),
    }
}

pub fn failure_policy(fail_fast: bool) -> FailurePolicy {
    if fail_fast {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Continue
    }
}

/// Builds a [`ReaderConfig`] with the configured aliases merged over the
/// built-in table.
pub fn build_reader_config(analysis: &AnalysisToml) -> ReaderConfig {
    analysis
        .aliases
        .iter()
        .fold(ReaderConfig::default(), |cfg, (name, aliases)| {
            cfg.with_alias(name.clone(), aliases.clone())
        })
}

/// Builds the sum-vs-mean policy; a configured list replaces the built-in one.
pub fn build_aggregation_policy(analysis: &AnalysisToml) -> AggregationPolicy {
    match &analysis.accumulative {
        Some(names) => AggregationPolicy::new(names.iter().cloned()),
        None => AggregationPolicy::default(),
    }
}

/// Builds [`AnalysisSettings`] from the `[analysis]` section and CLI options.
pub fn build_analysis_settings(analysis: &AnalysisToml, args: &AnalyzeArgs) -> Result<AnalysisSettings> {
    if args.variable.trim().is_empty() {
        bail!("--variable is empty");
    }
    let return_periods = or_config(&args.return_periods, &analysis.return_periods);
    if let Some(bad) = return_periods.iter().find(|&&p| p < 2) {
        bail!("return periods must be at least 2 years, got {bad}");
    }
    if analysis.wind_sectors == 0 {
        bail!("wind_sectors must be positive");
    }

    Ok(AnalysisSettings {
        variable: args.variable.clone(),
        historical_file: args.historical_file.clone(),
        scenario_files: args.scenario_files.clone(),
        experiments: or_config(&args.experiments, &analysis.experiments),
        data_dir: args
            .data_dir
            .clone()
            .unwrap_or_else(|| analysis.data_dir.clone()),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| analysis.output_dir.clone()),
        return_periods,
        wind_sectors: analysis.wind_sectors,
        reader: build_reader_config(analysis),
        policy: build_aggregation_policy(analysis),
    })
}

fn or_config<T: Clone>(cli: &[T], config: &[T]) -> Vec<T> {
    if cli.is_empty() {
        config.to_vec()
    } else {
        cli.to_vec()
    }
}
