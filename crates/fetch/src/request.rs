//! Request descriptors and the CDS request body.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::FetchError;
use crate::validate::ValidationCollector;

/// Geographic subset `[north, west, south, east]` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl BoundingBox {
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] listing every violated bound.
    pub fn new(north: f64, west: f64, south: f64, east: f64) -> Result<Self, FetchError> {
        let bbox = Self {
            north,
            west,
            south,
            east,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        let mut c = ValidationCollector::new();
        self.check(&mut c);
        c.finish()
    }

    pub(crate) fn check(&self, c: &mut ValidationCollector) {
        let all = [self.north, self.west, self.south, self.east];
        if all.iter().any(|v| !v.is_finite()) {
            c.push(format!("area {self} has non-finite values"));
            return;
        }
        for (name, lat) in [("north", self.north), ("south", self.south)] {
            c.check((-90.0..=90.0).contains(&lat), || {
                format!("{name}={lat} outside [-90, 90]")
            });
        }
        for (name, lon) in [("west", self.west), ("east", self.east)] {
            c.check((-180.0..=360.0).contains(&lon), || {
                format!("{name}={lon} outside [-180, 360]")
            });
        }
        c.check(self.north >= self.south, || {
            format!("north={} below south={}", self.north, self.south)
        });
    }

    /// `[N, W, S, E]`, the order the archive expects.
    pub fn as_array(&self) -> [f64; 4] {
        [self.north, self.west, self.south, self.east]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.north, self.west, self.south, self.east
        )
    }
}

/// Inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, FetchError> {
        let range = Self { start, end };
        let mut c = ValidationCollector::new();
        range.check("years", &mut c);
        c.finish()?;
        Ok(range)
    }

    pub(crate) fn check(&self, what: &str, c: &mut ValidationCollector) {
        c.check(self.start <= self.end, || {
            format!("{what} start {} after end {}", self.start, self.end)
        });
    }

    /// Every year in the range, as strings.
    pub fn years(&self) -> Vec<String> {
        (self.start..=self.end).map(|y| y.to_string()).collect()
    }

    /// `"start-end"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Whether an experiment is the historical run or a future projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    Historical,
    Projection,
}

impl ExperimentKind {
    pub fn of(experiment: &str) -> Self {
        if experiment == "historical" {
            Self::Historical
        } else {
            Self::Projection
        }
    }

    /// Output subdirectory for this kind.
    pub fn subdir(self) -> &'static str {
        match self {
            Self::Historical => "historico",
            Self::Projection => "projecao",
        }
    }
}

/// `<base>/<historico|projecao>/<experiment>_<variable>_<start>-<end>_<model>.nc`
pub fn output_path(
    base: &Path,
    experiment: &str,
    variable: &str,
    years: YearRange,
    model: &str,
) -> PathBuf {
    base.join(ExperimentKind::of(experiment).subdir()).join(format!(
        "{experiment}_{variable}_{}_{model}.nc",
        years.label()
    ))
}

/// One (experiment, variable) retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub variable: String,
    pub experiment: String,
    pub model: String,
    pub area: BoundingBox,
    pub years: YearRange,
    pub target: PathBuf,
}

impl RequestDescriptor {
    /// Request body for the archive.
    pub fn cds_request(&self) -> CdsRequest {
        CdsRequest {
            temporal_resolution: "daily".to_string(),
            experiment: self.experiment.clone(),
            variable: self.variable.clone(),
            model: self.model.clone(),
            year: self.years.years(),
            month: (1..=12).map(|m| format!("{m:02}")).collect(),
            day: (1..=31).map(|d| format!("{d:02}")).collect(),
            area: self.area.as_array(),
        }
    }
}

/// JSON body of a `projections-cmip6` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdsRequest {
    pub temporal_resolution: String,
    pub experiment: String,
    pub variable: String,
    pub model: String,
    pub year: Vec<String>,
    pub month: Vec<String>,
    pub day: Vec<String>,
    pub area: [f64; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_accepts_default_area() {
        assert!(BoundingBox::new(0.25, -94.68, -23.09, -71.04).is_ok());
    }

    #[test]
    fn bbox_collects_every_violation() {
        match BoundingBox::new(-95.0, -200.0, 10.0, 400.0) {
            Err(FetchError::InvalidRequest { count, details }) => {
                assert_eq!(count, 4, "{details}");
                assert!(details.contains("north=-95"));
                assert!(details.contains("below south"));
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn bbox_non_finite() {
        assert!(BoundingBox::new(f64::NAN, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn year_range() {
        let r = YearRange::new(1980, 1982).unwrap();
        assert_eq!(r.years(), vec!["1980", "1981", "1982"]);
        assert_eq!(r.label(), "1980-1982");
        assert!(YearRange::new(2000, 1999).is_err());
    }

    #[test]
    fn experiment_kind() {
        assert_eq!(ExperimentKind::of("historical"), ExperimentKind::Historical);
        assert_eq!(ExperimentKind::of("ssp5_8_5").subdir(), "projecao");
        assert_eq!(ExperimentKind::Historical.subdir(), "historico");
    }

    #[test]
    fn output_path_layout() {
        let path = output_path(
            Path::new("data"),
            "ssp1_2_6",
            "near_surface_wind_speed",
            YearRange::new(2015, 2049).unwrap(),
            "ipsl_cm6a_lr",
        );
        assert_eq!(
            path,
            Path::new("data/projecao/ssp1_2_6_near_surface_wind_speed_2015-2049_ipsl_cm6a_lr.nc")
        );
    }

    #[test]
    fn request_body_json() {
        let d = RequestDescriptor {
            variable: "near_surface_air_temperature".to_string(),
            experiment: "historical".to_string(),
            model: "ipsl_cm6a_lr".to_string(),
            area: BoundingBox::new(0.25, -94.68, -23.09, -71.04).unwrap(),
            years: YearRange::new(1980, 1981).unwrap(),
            target: PathBuf::from("x.nc"),
        };
        let json = serde_json::to_value(d.cds_request()).unwrap();
        assert_eq!(json["temporal_resolution"], "daily");
        assert_eq!(json["year"], serde_json::json!(["1980", "1981"]));
        assert_eq!(json["month"].as_array().unwrap().len(), 12);
        assert_eq!(json["month"][0], "01");
        assert_eq!(json["day"].as_array().unwrap().len(), 31);
        assert_eq!(json["area"], serde_json::json!([0.25, -94.68, -23.09, -71.04]));
    }
}
