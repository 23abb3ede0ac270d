//! Error types for clima-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the clima-io crate.
///
/// Covers missing files, NetCDF and zip failures, time-axis decoding, and
/// variables that cannot be resolved or have the wrong shape.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the clima-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when neither the requested name, its aliases, nor a sole
    /// data variable can be found.
    #[error(
        "variable '{name}' not found in {} (available: {})",
        path.display(),
        available.join(", ")
    )]
    MissingVariable {
        /// Requested variable name.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
        /// Data variables present in the file.
        available: Vec<String>,
    },

    /// Returned when a variable does not have the expected dimensions.
    #[error("variable '{name}' has unexpected dimensions: {reason}")]
    DimensionMismatch {
        /// Name of the variable.
        name: String,
        /// What was wrong with its shape.
        reason: String,
    },

    /// Returned when a time axis cannot be read or decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a zip archive holds no `.nc` member.
    #[error("no .nc member in archive {}", path.display())]
    EmptyArchive {
        /// Path to the archive.
        path: PathBuf,
    },

    /// Returned when a zip archive cannot be read or extracted.
    #[error("archive error in {}: {reason}", path.display())]
    Archive {
        /// Path to the archive.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<clima_calendar::CalendarError> for IoError {
    fn from(e: clima_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}
