//! Reader configuration and series loading.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use clima_calendar::{CfCalendar, ModelDate, TimeUnits, decode_offsets};
use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::IoError;
use crate::netcdf_read::{attr_f64, attr_string, data_variables, first_present};
use crate::units::{CELSIUS, is_kelvin, kelvin_to_celsius};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for resolving and normalizing variables in model files.
///
/// Use the builder methods (`with_*`) to customise names. The [`Default`]
/// implementation supplies the names used by CMIP6 and ERA5 downloads.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Requested name -> names to try inside the file, in order.
    aliases: BTreeMap<String, Vec<String>>,
    /// Names whose Kelvin values are converted to Celsius.
    temperature_names: BTreeSet<String>,
    /// Candidate names for the eastward wind component.
    wind_u_aliases: Vec<String>,
    /// Candidate names for the northward wind component.
    wind_v_aliases: Vec<String>,
    /// Candidate names for the time dimension.
    time_aliases: Vec<String>,
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        let aliases = BTreeMap::from([
            (
                "near_surface_air_temperature".to_string(),
                strings(&["tas", "t2m"]),
            ),
            (
                "near_surface_wind_speed".to_string(),
                strings(&["sfcWind", "wind_speed", "wind"]),
            ),
            (
                "total_precipitation".to_string(),
                strings(&["tp", "pr", "precipitation"]),
            ),
        ]);
        Self {
            aliases,
            temperature_names: strings(&["near_surface_air_temperature", "tas", "t2m"])
                .into_iter()
                .collect(),
            wind_u_aliases: strings(&["uas", "u10", "eastward_wind", "eastward_near_surface_wind"]),
            wind_v_aliases: strings(&[
                "vas",
                "v10",
                "northward_wind",
                "northward_near_surface_wind",
            ]),
            time_aliases: strings(&["time", "valid_time", "t"]),
        }
    }
}

impl ReaderConfig {
    /// Set (or replace) the aliases tried for `name`.
    pub fn with_alias(mut self, name: impl Into<String>, aliases: Vec<String>) -> Self {
        self.aliases.insert(name.into(), aliases);
        self
    }

    /// Replace the whole alias table.
    pub fn with_aliases(mut self, aliases: BTreeMap<String, Vec<String>>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set the names treated as temperature for Kelvin conversion.
    pub fn with_temperature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.temperature_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the candidate names for the u and v wind components.
    pub fn with_wind_aliases(mut self, u: Vec<String>, v: Vec<String>) -> Self {
        self.wind_u_aliases = u;
        self.wind_v_aliases = v;
        self
    }

    /// Set the candidate names for the time dimension.
    pub fn with_time_aliases(mut self, names: Vec<String>) -> Self {
        self.time_aliases = names;
        self
    }

    /// Aliases configured for `name` (empty if none).
    pub fn aliases_for(&self, name: &str) -> &[String] {
        self.aliases.get(name).map_or(&[], Vec::as_slice)
    }

    /// Whether `name` is a temperature variable.
    pub fn is_temperature(&self, name: &str) -> bool {
        self.temperature_names.contains(name)
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// A spatially averaged daily series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    variable: String,
    source_variable: String,
    units: Option<String>,
    dates: Vec<ModelDate>,
    values: Vec<f64>,
}

impl Series {
    /// Name the caller asked for.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Name actually read from the file.
    pub fn source_variable(&self) -> &str {
        &self.source_variable
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn dates(&self) -> &[ModelDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Axis label: `"<variable> (<units>)"`, or just the variable.
    pub fn axis_label(&self) -> String {
        match &self.units {
            Some(u) if !u.is_empty() => format!("{} ({u})", self.variable),
            _ => self.variable.clone(),
        }
    }
}

/// Spatially averaged eastward and northward wind on a shared time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct WindComponents {
    pub dates: Vec<ModelDate>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

// ---------------------------------------------------------------------------
// read_series
// ---------------------------------------------------------------------------

/// Load `variable` from a `.nc` (or zipped `.nc`) file as a daily series
/// averaged over every non-time dimension.
///
/// The variable is resolved by literal name, then by configured aliases,
/// then as the file's only data variable. Temperatures in Kelvin are
/// converted to Celsius.
///
/// # Errors
///
/// Returns [`IoError`] if the file is missing or unreadable, the variable
/// cannot be resolved, it has no time dimension, or its time axis cannot be
/// decoded.
pub fn read_series(path: &Path, variable: &str, config: &ReaderConfig) -> Result<Series, IoError> {
    let dataset = Dataset::open(path)?;
    let source = resolve_variable(&dataset, variable, config)?;
    let raw = read_averaged(&dataset, &source, config)?;

    let mut values = raw.values;
    let mut units = raw.units;
    let is_temperature = config.is_temperature(variable) || config.is_temperature(&source);
    if is_temperature && units.as_deref().is_some_and(is_kelvin) {
        debug!(variable, "converting Kelvin to Celsius");
        kelvin_to_celsius(&mut values);
        units = Some(CELSIUS.to_string());
    }

    info!(
        path = %path.display(),
        variable,
        source = %source,
        n = values.len(),
        "loaded series"
    );

    Ok(Series {
        variable: variable.to_string(),
        source_variable: source,
        units,
        dates: raw.dates,
        values,
    })
}

/// Load the u/v wind components, if the file has both.
///
/// # Errors
///
/// Returns [`IoError`] if the file cannot be opened or a component that is
/// present cannot be read.
pub fn read_wind_components(
    path: &Path,
    config: &ReaderConfig,
) -> Result<Option<WindComponents>, IoError> {
    let dataset = Dataset::open(path)?;
    let file = dataset.file();

    let (Some(u_name), Some(v_name)) = (
        first_present(file, &config.wind_u_aliases),
        first_present(file, &config.wind_v_aliases),
    ) else {
        debug!(path = %path.display(), "no wind components");
        return Ok(None);
    };

    let u = read_averaged(&dataset, &u_name, config)?;
    let v = read_averaged(&dataset, &v_name, config)?;
    if u.dates != v.dates {
        return Err(IoError::DimensionMismatch {
            name: v_name,
            reason: format!("time axis differs from '{u_name}'"),
        });
    }

    debug!(u = %u_name, v = %v_name, n = u.values.len(), "loaded wind components");
    Ok(Some(WindComponents {
        dates: u.dates,
        u: u.values,
        v: v.values,
    }))
}

fn resolve_variable(
    dataset: &Dataset,
    requested: &str,
    config: &ReaderConfig,
) -> Result<String, IoError> {
    let file = dataset.file();
    if file.variable(requested).is_some() {
        return Ok(requested.to_string());
    }
    if let Some(alias) = first_present(file, config.aliases_for(requested)) {
        debug!(requested, alias = %alias, "resolved variable by alias");
        return Ok(alias);
    }

    let available = data_variables(file);
    if let [only] = available.as_slice() {
        debug!(requested, only = %only, "resolved variable as sole data variable");
        return Ok(only.clone());
    }

    Err(IoError::MissingVariable {
        name: requested.to_string(),
        path: dataset.path().to_path_buf(),
        available,
    })
}

/// Decoded, masked, spatially averaged, date-sorted values of one variable.
struct RawSeries {
    dates: Vec<ModelDate>,
    values: Vec<f64>,
    units: Option<String>,
}

fn read_averaged(dataset: &Dataset, name: &str, config: &ReaderConfig) -> Result<RawSeries, IoError> {
    let file = dataset.file();
    let var = file
        .variable(name)
        .ok_or_else(|| IoError::MissingVariable {
            name: name.to_string(),
            path: dataset.path().to_path_buf(),
            available: data_variables(file),
        })?;

    // -- Time axis ----------------------------------------------------------

    let dims = var.dimensions();
    let time_idx = dims
        .iter()
        .position(|d| config.time_aliases.contains(&d.name()))
        .ok_or_else(|| IoError::DimensionMismatch {
            name: name.to_string(),
            reason: format!(
                "no time dimension (looked for {})",
                config.time_aliases.join(", ")
            ),
        })?;
    let time_name = dims[time_idx].name();
    let nt = dims[time_idx].len();
    let stride: usize = dims[time_idx + 1..].iter().map(|d| d.len()).product();

    let dates = decode_time(file, &time_name)?;
    if dates.len() != nt {
        return Err(IoError::DimensionMismatch {
            name: name.to_string(),
            reason: format!("{nt} time steps but {} time values", dates.len()),
        });
    }

    // -- Data ---------------------------------------------------------------

    let data = var.get_values::<f64, _>(..)?;
    let fill = attr_f64(&var, "_FillValue");
    let missing = attr_f64(&var, "missing_value");
    let scale = attr_f64(&var, "scale_factor").unwrap_or(1.0);
    let offset = attr_f64(&var, "add_offset").unwrap_or(0.0);

    let mut sums = vec![0.0; nt];
    let mut counts = vec![0usize; nt];
    for (i, &raw) in data.iter().enumerate() {
        if raw.is_nan() || Some(raw) == fill || Some(raw) == missing {
            continue;
        }
        let t = (i / stride.max(1)) % nt;
        sums[t] += raw * scale + offset;
        counts[t] += 1;
    }
    let values: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c == 0 { f64::NAN } else { s / c as f64 })
        .collect();

    // -- Sort by date -------------------------------------------------------

    let mut pairs: Vec<(ModelDate, f64)> = dates.into_iter().zip(values).collect();
    pairs.sort_by_key(|(d, _)| *d);
    let (dates, values) = pairs.into_iter().unzip();

    Ok(RawSeries {
        dates,
        values,
        units: attr_string(&var, "units"),
    })
}

fn decode_time(file: &netcdf::File, time_name: &str) -> Result<Vec<ModelDate>, IoError> {
    let time_var = file
        .variable(time_name)
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("no coordinate variable for time dimension '{time_name}'"),
        })?;
    let units = attr_string(&time_var, "units").ok_or_else(|| IoError::InvalidTime {
        reason: format!("time variable '{time_name}' has no 'units' attribute"),
    })?;
    let calendar = match attr_string(&time_var, "calendar") {
        Some(name) => CfCalendar::parse(&name)?,
        None => CfCalendar::default(),
    };
    let offsets = time_var.get_values::<f64, _>(..)?;
    let units = TimeUnits::parse(&units)?;
    Ok(decode_offsets(&units, calendar, &offsets)?)
}
