//! Error types for clima-fetch.

use std::path::PathBuf;

/// Error type for request building and retrieval.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Returned when one or more settings or request checks fail.
    #[error("{count} invalid request setting(s): {details}")]
    InvalidRequest {
        /// Number of accumulated violations.
        count: usize,
        /// All violations joined with `"; "`.
        details: String,
    },

    /// Returned when no API key can be found.
    #[error("missing CDS credentials: {reason}")]
    MissingCredentials {
        /// Where the key was looked for.
        reason: String,
    },

    /// Wraps a transport or HTTP status error.
    #[error("http error: {reason}")]
    Http {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when the archive reports a failed or unexpected job.
    #[error("job {id} failed: {reason}")]
    Job {
        /// Job identifier assigned by the archive.
        id: String,
        /// Status or message reported.
        reason: String,
    },

    /// Returned when a local file operation fails.
    #[error("i/o error at {}: {reason}", path.display())]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a downloaded zip payload cannot be unpacked.
    #[error("archive error in {}: {reason}", path.display())]
    Archive {
        /// Path to the payload.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http {
            reason: e.to_string(),
        }
    }
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, e: &dyn std::fmt::Display) -> Self {
        FetchError::Io {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_request() {
        let err = FetchError::InvalidRequest {
            count: 2,
            details: "no variables; north < south".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 invalid request setting(s): no variables; north < south"
        );
    }

    #[test]
    fn display_job() {
        let err = FetchError::Job {
            id: "abc".to_string(),
            reason: "status failed".to_string(),
        };
        assert_eq!(err.to_string(), "job abc failed: status failed");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<FetchError>();
    }
}
