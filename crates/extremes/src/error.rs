//! Error types for the clima-extremes crate.

/// Error type for GEV fitting and return-level evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtremesError {
    /// Fewer finite observations than the fit needs.
    #[error("insufficient data: got {n} finite values, need at least {min}")]
    InsufficientData {
        /// Number of finite observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// All finite observations are equal.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// The likelihood optimiser did not produce parameters.
    #[error("optimisation failed to converge")]
    OptimizationFailed,

    /// Parameters outside the GEV domain.
    #[error("invalid GEV parameters: {reason}")]
    InvalidParams { reason: String },

    /// Return periods must exceed one year.
    #[error("invalid return period {period}: must be greater than 1")]
    InvalidReturnPeriod { period: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let err = ExtremesError::InsufficientData { n: 3, min: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 3 finite values, need at least 5"
        );
    }

    #[test]
    fn error_invalid_return_period() {
        let err = ExtremesError::InvalidReturnPeriod { period: 1.0 };
        assert_eq!(
            err.to_string(),
            "invalid return period 1: must be greater than 1"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<ExtremesError>();
    }
}
