//! # clima-io
//!
//! Load daily climate-model series from NetCDF files (plain or zipped) into
//! the `&[ModelDate]` / `&[f64]` slices the analysis crates work on.
//!
//! Every load resolves the requested variable through an alias table,
//! masks fill values, averages over all non-time dimensions, and converts
//! Kelvin temperatures to Celsius.

mod dataset;
mod discover;
mod error;
mod netcdf_read;
mod reader;
mod units;

pub use discover::discover;
pub use error::IoError;
pub use reader::{ReaderConfig, Series, WindComponents, read_series, read_wind_components};
pub use units::{CELSIUS, KELVIN_OFFSET, is_kelvin, kelvin_to_celsius};
