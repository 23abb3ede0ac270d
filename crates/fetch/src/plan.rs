//! Download settings and their expansion into request descriptors.

use std::path::PathBuf;

use crate::error::FetchError;
use crate::request::{BoundingBox, ExperimentKind, RequestDescriptor, YearRange, output_path};
use crate::validate::ValidationCollector;

/// Everything needed to plan a batch of retrievals.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    pub dataset: String,
    pub model: String,
    pub area: BoundingBox,
    pub variables: Vec<String>,
    pub experiments: Vec<String>,
    /// Years requested for the historical experiment.
    pub historical: YearRange,
    /// Years requested for every other experiment.
    pub scenario: YearRange,
    pub output_base: PathBuf,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            dataset: "projections-cmip6".to_string(),
            model: "ipsl_cm6a_lr".to_string(),
            area: BoundingBox {
                north: 0.25,
                west: -94.68,
                south: -23.09,
                east: -71.04,
            },
            variables: vec![
                "near_surface_air_temperature".to_string(),
                "near_surface_wind_speed".to_string(),
            ],
            experiments: vec![
                "historical".to_string(),
                "ssp1_2_6".to_string(),
                "ssp5_8_5".to_string(),
            ],
            historical: YearRange {
                start: 1980,
                end: 2014,
            },
            scenario: YearRange {
                start: 2015,
                end: 2049,
            },
            output_base: PathBuf::from("data"),
        }
    }
}

/// Validated settings expanded to one descriptor per (experiment, variable).
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    dataset: String,
    descriptors: Vec<RequestDescriptor>,
}

impl DownloadPlan {
    /// Validate `settings` and expand them, experiments outermost.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] listing every violation.
    pub fn new(settings: &DownloadSettings) -> Result<Self, FetchError> {
        let mut c = ValidationCollector::new();
        c.check(!settings.dataset.trim().is_empty(), || "dataset is empty".to_string());
        c.check(!settings.model.trim().is_empty(), || "model is empty".to_string());
        c.check(!settings.variables.is_empty(), || "no variables".to_string());
        c.check(!settings.experiments.is_empty(), || "no experiments".to_string());
        for name in settings.variables.iter().chain(&settings.experiments) {
            c.check(!name.trim().is_empty(), || "empty variable or experiment name".to_string());
        }
        settings.area.check(&mut c);
        settings.historical.check("historical", &mut c);
        settings.scenario.check("scenario", &mut c);
        c.finish()?;

        let mut descriptors = Vec::with_capacity(settings.experiments.len() * settings.variables.len());
        for experiment in &settings.experiments {
            let years = match ExperimentKind::of(experiment) {
                ExperimentKind::Historical => settings.historical,
                ExperimentKind::Projection => settings.scenario,
            };
            for variable in &settings.variables {
                descriptors.push(RequestDescriptor {
                    variable: variable.clone(),
                    experiment: experiment.clone(),
                    model: settings.model.clone(),
                    area: settings.area,
                    years,
                    target: output_path(
                        &settings.output_base,
                        experiment,
                        variable,
                        years,
                        &settings.model,
                    ),
                });
            }
        }

        Ok(Self {
            dataset: settings.dataset.clone(),
            descriptors,
        })
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn descriptors(&self) -> &[RequestDescriptor] {
        &self.descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn default_plan_has_six_requests() {
        let plan = DownloadPlan::new(&DownloadSettings::default()).unwrap();
        assert_eq!(plan.dataset(), "projections-cmip6");
        assert_eq!(plan.descriptors().len(), 6);

        let first = &plan.descriptors()[0];
        assert_eq!(first.experiment, "historical");
        assert_eq!(first.variable, "near_surface_air_temperature");
        assert_eq!(first.years, YearRange { start: 1980, end: 2014 });
        assert_eq!(
            first.target,
            Path::new("data/historico/historical_near_surface_air_temperature_1980-2014_ipsl_cm6a_lr.nc")
        );

        let last = &plan.descriptors()[5];
        assert_eq!(last.experiment, "ssp5_8_5");
        assert_eq!(last.years, YearRange { start: 2015, end: 2049 });
        assert!(last.target.starts_with("data/projecao"));
    }

    #[test]
    fn every_violation_reported() {
        let settings = DownloadSettings {
            variables: vec![],
            experiments: vec![],
            historical: YearRange { start: 2014, end: 1980 },
            ..DownloadSettings::default()
        };
        match DownloadPlan::new(&settings) {
            Err(FetchError::InvalidRequest { count, details }) => {
                assert_eq!(count, 3, "{details}");
                assert!(details.contains("no variables"));
                assert!(details.contains("no experiments"));
                assert!(details.contains("historical start 2014 after end 1980"));
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }
}
